//! Synchronization with the remote task service
//!
//! ## Flow
//!
//! Every operation runs in three steps:
//! 1. Dispatch: `TaskList` reads its current snapshot and returns a `Request`
//! 2. Send: `Request::send` performs one HTTP call and yields a `Completion`
//! 3. Apply: `TaskList::apply` folds the completion into the latest state
//!
//! Requests are independent; when several are in flight the one that
//! resolves last wins.
//!
//! ## Usage
//!
//! ```ignore
//! let client = TaskClient::new("http://localhost:8000")?;
//! let mut list = TaskList::new();
//! let completion = list.load().send(&client).await;
//! list.apply(completion);
//! ```

mod client;
mod request;
mod state;

pub use client::TaskClient;
pub use request::{Completion, Request};
pub use state::TaskList;
