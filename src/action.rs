//! Store Actions
//!
//! Every state change is one of these intents, applied by the reducer.

use crate::models::{TodoFilter, TodoId};

/// All mutations the store understands
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Create a new pending todo at the top of the list
    AddTodo { title: String },
    /// Flip completion; unknown ids are a no-op
    ToggleTodo { id: TodoId },
    /// Rename; unknown ids are a no-op
    UpdateTodo { id: TodoId, title: String },
    /// Hard-remove one item
    DeleteTodo { id: TodoId },
    SetFilter { filter: TodoFilter },
    /// Hard-remove every completed item
    ClearCompleted,
    /// Rebuild the list in the given id order; ids left out are dropped,
    /// so callers must pass every id they intend to keep
    ReorderTodos { new_order: Vec<TodoId> },
}
