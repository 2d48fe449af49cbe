//! Todo Input Component
//!
//! Form for adding new todos.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::action::Action;
use crate::context::use_app_context;

/// Form for adding a new todo; blank or whitespace-only titles are ignored
#[component]
pub fn TodoInput() -> impl IntoView {
    let ctx = use_app_context();

    let (draft, set_draft) = signal(String::new());

    let add_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = draft.get().trim().to_string();
        if title.is_empty() {
            return;
        }
        ctx.store.dispatch(Action::AddTodo { title });
        set_draft.set(String::new());
    };

    view! {
        <form class="todo-list-input" on:submit=add_todo>
            <input
                type="text"
                class="todo-list-input-text"
                placeholder="What needs doing?"
                prop:value=move || draft.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_draft.set(input.value());
                }
            />
            <button type="submit" class="todo-list-input-button">"Add"</button>
        </form>
    }
}
