//! State Reducer
//!
//! Pure transition function from (state, action) to the next state.
//! The only side effect is reading the clock for `updated_at`.

use std::collections::HashMap;
use std::mem;

use chrono::Utc;

use crate::action::Action;
use crate::models::{TodoId, TodoItem};
use crate::store::AppState;

/// Apply one action, returning the next state.
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    match action {
        Action::AddTodo { title } => {
            let (pending, completed) = partition_done(mem::take(&mut state.todos));
            let mut todos = Vec::with_capacity(pending.len() + completed.len() + 1);
            todos.push(TodoItem::new(title.clone()));
            todos.extend(pending);
            todos.extend(completed);
            state.todos = todos;
        }
        Action::ToggleTodo { id } => {
            if state.todos.iter().any(|todo| todo.id == *id) {
                let mut now_done = false;
                for todo in &mut state.todos {
                    if todo.id == *id {
                        todo.is_done = !todo.is_done;
                        todo.updated_at = Utc::now();
                        now_done = todo.is_done;
                    }
                }

                let (mut pending, mut completed) = partition_done(mem::take(&mut state.todos));
                pending.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                if now_done {
                    // freshly completed items land at the end of the done group
                    if let Some(pos) = completed.iter().position(|todo| todo.id == *id) {
                        let toggled = completed.remove(pos);
                        completed.push(toggled);
                    }
                }

                pending.extend(completed);
                state.todos = pending;
            }
        }
        Action::UpdateTodo { id, title } => {
            for todo in &mut state.todos {
                if todo.id == *id {
                    todo.title = title.clone();
                    todo.updated_at = Utc::now();
                }
            }
        }
        Action::DeleteTodo { id } => {
            state.todos.retain(|todo| todo.id != *id);
        }
        Action::SetFilter { filter } => {
            state.filter = *filter;
        }
        Action::ClearCompleted => {
            state.todos.retain(|todo| !todo.is_done);
        }
        Action::ReorderTodos { new_order } => {
            let mut by_id: HashMap<TodoId, TodoItem> = mem::take(&mut state.todos)
                .into_iter()
                .map(|todo| (todo.id.clone(), todo))
                .collect();
            // unknown ids are skipped, repeated ids count once
            state.todos = new_order
                .iter()
                .filter_map(|id| by_id.remove(id))
                .collect();
        }
    }
    state
}

/// Split into (pending, completed), keeping relative order on both sides
fn partition_done(todos: Vec<TodoItem>) -> (Vec<TodoItem>, Vec<TodoItem>) {
    todos.into_iter().partition(|todo| !todo.is_done)
}
