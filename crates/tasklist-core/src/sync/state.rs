//! Local task list state
//!
//! `TaskList` owns the three pieces of client state: the task collection,
//! the pending input and the error slot. Dispatch methods read the current
//! snapshot and return the `Request` to send; `apply` folds a `Completion`
//! into whatever the state is when the response arrives. `apply` is the
//! only place the collection changes.

use tracing::{info, warn};

use super::request::{Completion, Request};
use crate::error::SyncError;
use crate::models::{Task, TaskId};

/// Client-side view of the remote task collection
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskList {
    /// Tasks in load order, then append order
    tasks: Vec<Task>,
    /// Title being composed before submission
    pending_input: String,
    /// Most recent operation error, if any
    error: Option<String>,
}

impl TaskList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Find a task by id
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Current error slot contents
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clear the error slot (e.g. when the user dismisses it)
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ==================== Pending Input ====================

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_pending_input(&mut self, input: impl Into<String>) {
        self.pending_input = input.into();
    }

    pub fn push_input(&mut self, c: char) {
        self.pending_input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.pending_input.pop();
    }

    // ==================== Dispatch ====================

    /// Request for the initial load
    pub fn load(&self) -> Request {
        Request::Load
    }

    /// Request that submits the pending input as a new task
    ///
    /// The input is not validated and is left in place until the create
    /// succeeds.
    pub fn submit(&self) -> Request {
        Request::Create {
            title: self.pending_input.clone(),
        }
    }

    /// Request that flips the done flag of `id`
    ///
    /// Picks mark-done or unmark-done from the flag in the current snapshot.
    /// When `id` is unknown the error slot is set and nothing is returned.
    pub fn toggle(&mut self, id: TaskId) -> Option<Request> {
        match self.get(id) {
            Some(task) if task.done => Some(Request::UnmarkDone(id)),
            Some(_) => Some(Request::MarkDone(id)),
            None => {
                self.set_error(&SyncError::NotFound { id });
                None
            }
        }
    }

    /// Request that deletes `id`
    pub fn delete(&self, id: TaskId) -> Request {
        Request::Delete(id)
    }

    // ==================== Completion ====================

    /// Fold a completed request into the current state
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Load(Ok(tasks)) => {
                info!("Loaded {} task(s)", tasks.len());
                self.tasks = tasks;
            }
            Completion::Load(Err(e)) => {
                // Load failures leave the list and the error slot alone
                warn!("Loading tasks failed: {}", e);
            }
            Completion::Create(Ok(task)) => {
                if self.get(task.id).is_some() {
                    warn!("Created task {} already present locally, replacing", task.id);
                    self.tasks.retain(|t| t.id != task.id);
                }
                self.tasks.push(task);
                self.pending_input.clear();
                self.error = None;
            }
            Completion::MarkDone(Ok(marker)) => {
                self.set_done(marker.id, true);
                self.error = None;
            }
            Completion::UnmarkDone { id, result: Ok(()) } => {
                self.set_done(id, false);
                self.error = None;
            }
            Completion::Create(Err(e))
            | Completion::MarkDone(Err(e))
            | Completion::UnmarkDone { result: Err(e), .. } => {
                self.set_error(&e);
            }
            Completion::Delete { id, result: Ok(_) } => {
                self.tasks.retain(|t| t.id != id);
            }
            Completion::Delete { id, result: Err(e) } => {
                warn!("Deleting task {} failed: {}", id, e);
            }
        }
    }

    fn set_done(&mut self, id: TaskId, done: bool) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.done = done;
        }
    }

    fn set_error(&mut self, error: &SyncError) {
        warn!("{}", error);
        self.error = Some(error.to_string());
    }
}
