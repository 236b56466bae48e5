//! Data models for tasklist
//!
//! Defines the shapes exchanged with the task service: `Task`, the create
//! request body and the mark-done response. Every field is required on the
//! wire; deserialization fails on a missing or mistyped field, so malformed
//! payloads never reach the local list.

use serde::{Deserialize, Serialize};

/// Server-assigned task identifier
///
/// Stable for the lifetime of a task and used as the reconciliation key
/// between the local list and the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Get the raw numeric id
    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A task as returned by the task service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Server-assigned identifier
    pub id: TaskId,
    /// User-supplied description
    pub title: String,
    /// Completion flag
    pub done: bool,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, done: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            done,
        }
    }
}

/// Request body for creating a task
///
/// Carries only the title; the server is the sole authority on ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Mark-done response body
///
/// The service may return the whole task; only `id` is read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoneMarker {
    pub id: TaskId,
}
