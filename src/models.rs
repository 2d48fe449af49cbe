//! Todo Models
//!
//! Core data structures for the todo list.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque todo identifier, unique for the lifetime of the page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

impl TodoId {
    /// Fresh id: creation millis plus a session-wide sequence number,
    /// so ids stay unique even within one millisecond
    pub fn generate() -> Self {
        let seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
        let millis = Utc::now().timestamp_millis();
        TodoId(format!("{millis:x}-{seq:x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TodoId {
    fn from(raw: String) -> Self {
        TodoId(raw)
    }
}

impl From<&str> for TodoId {
    fn from(raw: &str) -> Self {
        TodoId(raw.to_string())
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    /// Refreshed whenever the item's own fields change; reordering the
    /// list does not count
    pub updated_at: DateTime<Utc>,
}

impl TodoItem {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: TodoId::generate(),
            title: title.into(),
            is_done: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Which slice of the list is displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TodoFilter {
    /// Wire name, as carried in `data-filter` attributes
    pub fn as_str(self) -> &'static str {
        match self {
            TodoFilter::All => "all",
            TodoFilter::Pending => "pending",
            TodoFilter::Completed => "completed",
        }
    }
}

/// Item tallies per filter, for the footer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCounts {
    pub all: usize,
    pub pending: usize,
    pub completed: usize,
}
