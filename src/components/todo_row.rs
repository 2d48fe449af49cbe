//! Todo Row Component
//!
//! One list row: checkbox, title, delete button. Pending rows are
//! drag handles; the sorter's guards keep completed rows and the
//! interactive children inert.

use leptos::prelude::*;
use leptos_dragsort::{make_on_mousedown, DragSort};

use crate::action::Action;
use crate::context::use_app_context;
use crate::models::TodoItem;

#[component]
pub fn TodoRow(todo: TodoItem, sorter: DragSort) -> impl IntoView {
    let ctx = use_app_context();

    let toggle_store = ctx.store.clone();
    let toggle_id = todo.id.clone();
    let toggle = move |_| {
        toggle_store.dispatch(Action::ToggleTodo { id: toggle_id.clone() });
    };

    let delete_store = ctx.store.clone();
    let delete_id = todo.id.clone();
    let delete = move |_| {
        delete_store.dispatch(Action::DeleteTodo { id: delete_id.clone() });
    };

    let row_class = if todo.is_done { "todo-item completed" } else { "todo-item draggable" };
    let text_class = if todo.is_done { "todo-text completed" } else { "todo-text" };

    view! {
        <li
            class=row_class
            data-id=todo.id.to_string()
            on:mousedown=make_on_mousedown(sorter)
        >
            <input
                type="checkbox"
                class="check-mark"
                prop:checked=todo.is_done
                on:change=toggle
            />
            <span class=text_class>{todo.title}</span>
            <button type="button" class="delete-button" on:click=delete>
                <span>"Delete"</span>
            </button>
        </li>
    }
}
