//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::store::{AppState, TodoStore};

/// App-wide handles provided via context: the store for dispatching,
/// and a read signal mirroring its state for reactive rendering
#[derive(Clone)]
pub struct AppContext {
    pub store: TodoStore,
    pub state: ReadSignal<AppState>,
}

impl AppContext {
    pub fn new(store: TodoStore, state: ReadSignal<AppState>) -> Self {
        Self { store, state }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
