//! Requests and their completions
//!
//! A `Request` is what a flow decided to send, captured from the state
//! snapshot at dispatch time. Sending it yields a `Completion`, which is
//! handed back to `TaskList::apply` on whatever the state looks like when
//! the response arrives.

use tracing::debug;

use super::client::TaskClient;
use crate::error::SyncResult;
use crate::models::{DoneMarker, Task, TaskId};

/// A request ready to be sent to the task service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Fetch the whole collection
    Load,
    /// Create a task with this title
    Create { title: String },
    /// Set the done marker on a task
    MarkDone(TaskId),
    /// Remove the done marker from a task
    UnmarkDone(TaskId),
    /// Delete a task
    Delete(TaskId),
}

/// Outcome of a sent request
#[derive(Debug)]
pub enum Completion {
    Load(SyncResult<Vec<Task>>),
    Create(SyncResult<Task>),
    /// Carries the marker from the response, not the targeted id
    MarkDone(SyncResult<DoneMarker>),
    UnmarkDone {
        id: TaskId,
        result: SyncResult<()>,
    },
    /// `Ok` holds the HTTP status, which is never inspected by the reducer
    Delete {
        id: TaskId,
        result: SyncResult<u16>,
    },
}

impl Request {
    /// Send this request and wrap the outcome
    pub async fn send(self, client: &TaskClient) -> Completion {
        debug!("Sending {:?}", self);
        match self {
            Request::Load => Completion::Load(client.list().await),
            Request::Create { title } => Completion::Create(client.create(&title).await),
            Request::MarkDone(id) => Completion::MarkDone(client.mark_done(id).await),
            Request::UnmarkDone(id) => Completion::UnmarkDone {
                id,
                result: client.unmark_done(id).await,
            },
            Request::Delete(id) => Completion::Delete {
                id,
                result: client.delete(id).await.map(|status| status.as_u16()),
            },
        }
    }

    /// Short verb for status messages
    pub fn describe(&self) -> &'static str {
        match self {
            Request::Load => "Loading tasks",
            Request::Create { .. } => "Adding task",
            Request::MarkDone(_) => "Completing task",
            Request::UnmarkDone(_) => "Reopening task",
            Request::Delete(_) => "Deleting task",
        }
    }
}
