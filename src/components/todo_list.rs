//! Todo List Component
//!
//! Renders the filtered rows and owns the drag-sort coordinator. Every
//! store notification re-renders the whole list, so a committed drag
//! settles into the same order the reducer produced.

use leptos::prelude::*;
use leptos_dragsort::{DragSort, DragSortOptions};

use crate::action::Action;
use crate::components::TodoRow;
use crate::context::use_app_context;
use crate::models::TodoId;
use crate::selectors::active_todos;

#[component]
pub fn TodoListView() -> impl IntoView {
    let ctx = use_app_context();
    let state = ctx.state;

    let store = ctx.store.clone();
    let sorter = DragSort::new(DragSortOptions::default(), move |new_order: Vec<String>| {
        web_sys::console::log_1(&format!("[dnd] commit order: {:?}", new_order).into());
        store.dispatch(Action::ReorderTodos {
            new_order: new_order.into_iter().map(TodoId::from).collect(),
        });
    });
    let dragging = sorter.active();

    view! {
        <ul
            class="todo-list-items"
            class:dragging=move || dragging.get()
        >
            {move || {
                active_todos(&state.get())
                    .into_iter()
                    .map(|todo| view! { <TodoRow todo=todo sorter=sorter.clone() /> })
                    .collect_view()
            }}
        </ul>
    }
}
