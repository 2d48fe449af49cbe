//! Leptodo Frontend App
//!
//! Root component: owns the store, mirrors it into a signal, and
//! provides both to the component tree via context.

use leptos::prelude::*;

use crate::components::{TodoFilters, TodoInput, TodoListView};
use crate::context::AppContext;
use crate::store::TodoStore;

#[component]
pub fn App() -> impl IntoView {
    let store = TodoStore::new();

    // One subscriber bridges the store into Leptos reactivity; every
    // dispatch pushes a fresh snapshot through this signal.
    let (state, set_state) = signal(store.get_state());
    store.subscribe("app", move |next| set_state.set(next.clone()));

    provide_context(AppContext::new(store, state));

    view! {
        <div class="todo-list-container">
            <div class="todo-list-header">
                <h1 class="todo-list-header-title">"ToDo List"</h1>
            </div>

            <TodoInput />

            <TodoListView />

            <TodoFilters />
        </div>
    }
}
