//! Store Selectors
//!
//! Named read-only projections over the state. The set is closed: every
//! selector is an enum variant, and string lookups go through `FromStr`
//! so an unknown name fails fast instead of failing silently.

use std::str::FromStr;

use crate::models::{FilterCounts, TodoFilter, TodoItem};
use crate::store::{AppState, StoreError};

/// Every projection the store can answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    TodoList,
    CurrentFilter,
    PendingTodos,
    CompletedTodos,
    ActiveTodos,
    FilterCounts,
}

/// Result of evaluating a selector
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Todos(Vec<TodoItem>),
    Filter(TodoFilter),
    Counts(FilterCounts),
}

impl Selector {
    pub const ALL: [Selector; 6] = [
        Selector::TodoList,
        Selector::CurrentFilter,
        Selector::PendingTodos,
        Selector::CompletedTodos,
        Selector::ActiveTodos,
        Selector::FilterCounts,
    ];

    /// Wire name, matching the string registry this replaced
    pub fn name(self) -> &'static str {
        match self {
            Selector::TodoList => "todoList",
            Selector::CurrentFilter => "currentFilter",
            Selector::PendingTodos => "pendingTodos",
            Selector::CompletedTodos => "completedTodos",
            Selector::ActiveTodos => "activeTodos",
            Selector::FilterCounts => "filterCounts",
        }
    }
}

impl FromStr for Selector {
    type Err = StoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Selector::ALL
            .into_iter()
            .find(|selector| selector.name() == name)
            .ok_or_else(|| StoreError::SelectorNotFound(name.to_string()))
    }
}

/// Evaluate a selector against a state snapshot
pub fn evaluate(state: &AppState, selector: Selector) -> Selection {
    match selector {
        Selector::TodoList => Selection::Todos(todo_list(state)),
        Selector::CurrentFilter => Selection::Filter(current_filter(state)),
        Selector::PendingTodos => Selection::Todos(pending_todos(state)),
        Selector::CompletedTodos => Selection::Todos(completed_todos(state)),
        Selector::ActiveTodos => Selection::Todos(active_todos(state)),
        Selector::FilterCounts => Selection::Counts(filter_counts(state)),
    }
}

pub fn todo_list(state: &AppState) -> Vec<TodoItem> {
    state.todos.clone()
}

pub fn current_filter(state: &AppState) -> TodoFilter {
    state.filter
}

pub fn pending_todos(state: &AppState) -> Vec<TodoItem> {
    state.todos.iter().filter(|todo| !todo.is_done).cloned().collect()
}

pub fn completed_todos(state: &AppState) -> Vec<TodoItem> {
    state.todos.iter().filter(|todo| todo.is_done).cloned().collect()
}

/// The slice visible under the current filter, in list order
pub fn active_todos(state: &AppState) -> Vec<TodoItem> {
    match state.filter {
        TodoFilter::All => todo_list(state),
        TodoFilter::Pending => pending_todos(state),
        TodoFilter::Completed => completed_todos(state),
    }
}

pub fn filter_counts(state: &AppState) -> FilterCounts {
    let completed = state.todos.iter().filter(|todo| todo.is_done).count();
    FilterCounts {
        all: state.todos.len(),
        pending: state.todos.len() - completed,
        completed,
    }
}
