//! tasklist Core Library
//!
//! This crate keeps a client-side task list consistent with a remote task
//! service that exposes a small REST API under `/tasks/`.
//!
//! # Architecture
//!
//! - **Task service**: source of truth; every task id is assigned there
//! - **TaskList**: the in-memory collection, pending input and error slot
//!
//! Local state is rehydrated from the service on every start; nothing is
//! persisted locally.
//!
//! # Quick Start
//!
//! ```text
//! let mut sync = Synchronizer::open(&Config::load()?)?;
//! sync.load().await?;
//!
//! sync.create("buy milk").await;
//! sync.toggle(TaskId(7)).await;
//!
//! for task in sync.list().tasks() {
//!     println!("{} {}", task.id, task.title);
//! }
//! ```
//!
//! # Modules
//!
//! - `synchronizer`: Sequential driver (main entry point)
//! - `sync`: HTTP client, requests and the state reducer
//! - `models`: Task and wire shapes
//! - `error`: Error taxonomy and user-facing messages
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod sync;
pub mod synchronizer;

pub use config::Config;
pub use error::{ErrorKind, SyncError, SyncResult};
pub use models::{DoneMarker, NewTask, Task, TaskId};
pub use sync::{Completion, Request, TaskClient, TaskList};
pub use synchronizer::Synchronizer;
