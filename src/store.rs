//! Application Store
//!
//! Single owner of the state: `dispatch` runs the pure reducer, swaps
//! the state, then synchronously notifies subscribers in registration
//! order. Handles are cheap clones sharing one cell (single-threaded
//! WASM model, so `Rc<RefCell>` rather than locks).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::action::Action;
use crate::models::{TodoFilter, TodoId, TodoItem};
use crate::reducer::reduce;
use crate::selectors::{self, Selection, Selector};

/// Complete application state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// All todos in display order; pending items precede completed ones
    pub todos: Vec<TodoItem>,
    /// Currently selected display filter
    pub filter: TodoFilter,
}

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// A string selector lookup missed the registry; programmer error,
    /// surfaced loudly instead of returning something empty
    #[error("selector '{0}' not found")]
    SelectorNotFound(String),
}

type SubscriberFn = Rc<dyn Fn(&AppState)>;

struct StoreInner {
    state: AppState,
    subscribers: Vec<(String, SubscriberFn)>,
}

/// Shared handle to the application store
#[derive(Clone)]
pub struct TodoStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    /// Start from a prepared state (tests, seeding)
    pub fn with_state(state: AppState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                state,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Snapshot of the current state; callers own the copy
    pub fn get_state(&self) -> AppState {
        self.inner.borrow().state.clone()
    }

    /// Apply one action and notify every subscriber with a fresh
    /// snapshot. A subscriber may dispatch again: the nested dispatch,
    /// including its own notification pass, completes before the outer
    /// pass resumes, and the outer pass then sees the newer state.
    pub fn dispatch(&self, action: Action) {
        let next = reduce(self.get_state(), &action);
        self.inner.borrow_mut().state = next;
        self.notify();
    }

    fn notify(&self) {
        // snapshot the list so callbacks may (un)subscribe while we run;
        // no borrow is held while a callback executes
        let subscribers: Vec<SubscriberFn> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            (*subscriber)(&self.get_state());
        }
    }

    /// Register a callback under `id`. Re-using an id replaces the old
    /// callback in place, keeping its notification position. Returns an
    /// unsubscribe closure; dropping the closure does not unsubscribe.
    pub fn subscribe(
        &self,
        id: impl Into<String>,
        subscriber: impl Fn(&AppState) + 'static,
    ) -> impl FnOnce() {
        let id = id.into();
        let subscriber: SubscriberFn = Rc::new(subscriber);
        {
            let mut inner = self.inner.borrow_mut();
            match inner.subscribers.iter_mut().find(|(sid, _)| *sid == id) {
                Some(slot) => slot.1 = subscriber,
                None => inner.subscribers.push((id.clone(), subscriber)),
            }
        }

        let inner = Rc::clone(&self.inner);
        move || {
            inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
        }
    }

    /// Evaluate an enum selector against the current state
    pub fn select(&self, selector: Selector) -> Selection {
        selectors::evaluate(&self.inner.borrow().state, selector)
    }

    /// String-keyed selector lookup; unknown names fail fast
    pub fn select_named(&self, name: &str) -> Result<Selection, StoreError> {
        Ok(self.select(name.parse::<Selector>()?))
    }

    pub fn set_filter(&self, filter: TodoFilter) {
        self.dispatch(Action::SetFilter { filter });
    }

    pub fn clear_completed(&self) {
        self.dispatch(Action::ClearCompleted);
    }

    pub fn current_filter(&self) -> TodoFilter {
        self.inner.borrow().state.filter
    }

    pub fn todo_by_id(&self, id: &TodoId) -> Option<TodoItem> {
        self.inner
            .borrow()
            .state
            .todos
            .iter()
            .find(|todo| todo.id == *id)
            .cloned()
    }

    /// Back to the initial state, with the usual notification
    pub fn reset(&self) {
        self.inner.borrow_mut().state = AppState::default();
        self.notify();
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        let subscriber_ids: Vec<&str> =
            inner.subscribers.iter().map(|(id, _)| id.as_str()).collect();
        f.debug_struct("TodoStore")
            .field("state", &inner.state)
            .field("subscribers", &subscriber_ids)
            .finish()
    }
}
