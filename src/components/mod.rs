//! UI Components
//!
//! Reusable Leptos components.

mod todo_filters;
mod todo_input;
mod todo_list;
mod todo_row;

pub use todo_filters::TodoFilters;
pub use todo_input::TodoInput;
pub use todo_list::TodoListView;
pub use todo_row::TodoRow;
