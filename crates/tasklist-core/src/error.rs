//! Synchronization error handling
//!
//! Typed errors for the four request flows. The `Display` text of each
//! variant is what ends up in the error slot, so server and lookup errors
//! render as short user-facing messages.

use thiserror::Error;

use crate::models::TaskId;

/// Message shown when creating a task is rejected by the service
pub const ADD_FAILED: &str = "failed to add task";
/// Message shown when removing the done marker is rejected by the service
pub const UNMARK_FAILED: &str = "failed to delete task";
/// Message shown when marking a task done is rejected by the service
pub const MARK_FAILED: &str = "failed to complete task";
/// Message shown when listing tasks is rejected by the service
pub const LOAD_FAILED: &str = "failed to load tasks";
/// Message shown when a toggle targets an unknown task
pub const NOT_FOUND: &str = "task not found";

/// Broad error class, independent of the concrete cause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request not sent, or response unreadable
    Network,
    /// Response received with a non-success status
    Server,
    /// Local lookup failed; nothing was sent
    NotFound,
}

/// Errors that can occur while talking to the task service
#[derive(Error, Debug)]
pub enum SyncError {
    /// Transport failure or undecodable response body
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response decoded but violates the task schema
    #[error("invalid response from task service: {0}")]
    InvalidResponse(String),

    /// Non-success HTTP status
    #[error("{message}")]
    Server { status: u16, message: &'static str },

    /// Toggle target is not in the local list
    #[error("task not found")]
    NotFound { id: TaskId },
}

impl SyncError {
    /// Get the broad class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Network(_) | SyncError::InvalidResponse(_) => ErrorKind::Network,
            SyncError::Server { .. } => ErrorKind::Server,
            SyncError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Server { status, .. } => Some(*status),
            SyncError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn server(status: reqwest::StatusCode, message: &'static str) -> Self {
        SyncError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

/// Result type for synchronization operations
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_displays_message_only() {
        let err = SyncError::Server {
            status: 500,
            message: ADD_FAILED,
        };
        assert_eq!(err.to_string(), "failed to add task");
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_not_found_display() {
        let err = SyncError::NotFound { id: TaskId(999) };
        assert_eq!(err.to_string(), NOT_FOUND);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_invalid_response_is_network_class() {
        let err = SyncError::InvalidResponse("duplicate task id 3".to_string());
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.to_string().contains("duplicate task id 3"));
    }
}
