//! Sequential synchronizer
//!
//! The `Synchronizer` pairs a `TaskList` with a `TaskClient` and runs each
//! operation to completion before returning. One-shot commands and tests
//! use it; the TUI drives `TaskList` and `Request` directly so requests can
//! overlap.
//!
//! ## Usage
//!
//! ```ignore
//! let mut sync = Synchronizer::open(&Config::load()?)?;
//! sync.load().await?;
//! sync.toggle(TaskId(3)).await;
//! if let Some(err) = sync.list().error() {
//!     eprintln!("{}", err);
//! }
//! ```

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::SyncResult;
use crate::models::TaskId;
use crate::sync::{Completion, Request, TaskClient, TaskList};

/// Task list kept in step with the remote service
pub struct Synchronizer {
    /// Service client
    client: TaskClient,
    /// Local state
    list: TaskList,
    /// Whether the initial load already ran
    loaded: bool,
}

impl Synchronizer {
    /// Create a synchronizer with an empty list
    pub fn new(client: TaskClient) -> Self {
        Self {
            client,
            list: TaskList::new(),
            loaded: false,
        }
    }

    /// Create a synchronizer for the configured server
    pub fn open(config: &Config) -> SyncResult<Self> {
        Ok(Self::new(TaskClient::new(&config.server_url)?))
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut TaskList {
        &mut self.list
    }

    /// Run the initial load
    ///
    /// Only the first call sends a request. A failure leaves the list and
    /// the error slot untouched and is returned to the caller.
    pub async fn load(&mut self) -> SyncResult<()> {
        if self.loaded {
            debug!("Initial load already ran, skipping");
            return Ok(());
        }
        self.loaded = true;

        match self.list.load().send(&self.client).await {
            Completion::Load(Err(e)) => {
                warn!("Loading tasks failed: {}", e);
                Err(e)
            }
            completion => {
                self.list.apply(completion);
                Ok(())
            }
        }
    }

    /// Submit the pending input as a new task
    pub async fn submit(&mut self) {
        let request = self.list.submit();
        self.run(request).await;
    }

    /// Stage `title` as the pending input and submit it
    pub async fn create(&mut self, title: impl Into<String>) {
        self.list.set_pending_input(title);
        self.submit().await;
    }

    /// Flip the done flag of `id`
    pub async fn toggle(&mut self, id: TaskId) {
        if let Some(request) = self.list.toggle(id) {
            self.run(request).await;
        }
    }

    /// Delete `id` remotely and locally
    ///
    /// Any answer from the service removes the task. Only a transport
    /// failure is returned; it leaves the list and the error slot untouched.
    pub async fn delete(&mut self, id: TaskId) -> SyncResult<()> {
        match self.list.delete(id).send(&self.client).await {
            Completion::Delete { result: Err(e), .. } => {
                warn!("Deleting task {} failed: {}", id, e);
                Err(e)
            }
            completion => {
                self.list.apply(completion);
                Ok(())
            }
        }
    }

    async fn run(&mut self, request: Request) {
        let completion = request.send(&self.client).await;
        self.list.apply(completion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use mockito::{Matcher, Server, ServerGuard};

    const JSON: &str = "application/json";

    async fn loaded_sync(server: &mut ServerGuard, body: &str) -> Synchronizer {
        let _m = server
            .mock("GET", "/tasks/")
            .with_status(200)
            .with_header("content-type", JSON)
            .with_body(body)
            .create_async()
            .await;

        let mut sync = Synchronizer::new(TaskClient::new(&server.url()).unwrap());
        sync.load().await.unwrap();
        sync
    }

    #[tokio::test]
    async fn test_load_replaces_collection() {
        let mut server = Server::new_async().await;
        let sync = loaded_sync(&mut server, r#"[{"id":1,"title":"a","done":false}]"#).await;

        assert_eq!(sync.list().tasks(), &[Task::new(1, "a", false)]);
        assert!(sync.list().error().is_none());
    }

    #[tokio::test]
    async fn test_load_failure_leaves_state_untouched() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks/")
            .with_status(500)
            .create_async()
            .await;

        let mut sync = Synchronizer::new(TaskClient::new(&server.url()).unwrap());
        assert!(sync.load().await.is_err());
        assert!(sync.list().is_empty());
        assert!(sync.list().error().is_none());
    }

    #[tokio::test]
    async fn test_load_runs_once() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/tasks/")
            .with_status(200)
            .with_header("content-type", JSON)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;

        let mut sync = Synchronizer::new(TaskClient::new(&server.url()).unwrap());
        sync.load().await.unwrap();
        sync.load().await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_appends_server_task() {
        let mut server = Server::new_async().await;
        let mut sync = loaded_sync(&mut server, r#"[{"id":1,"title":"a","done":false}]"#).await;

        let m = server
            .mock("POST", "/tasks/")
            .match_body(Matcher::Json(serde_json::json!({"title": "buy milk"})))
            .with_status(201)
            .with_header("content-type", JSON)
            .with_body(r#"{"id":7,"title":"buy milk","done":false}"#)
            .create_async()
            .await;

        sync.create("buy milk").await;

        m.assert_async().await;
        assert_eq!(
            sync.list().tasks(),
            &[Task::new(1, "a", false), Task::new(7, "buy milk", false)]
        );
        assert_eq!(sync.list().pending_input(), "");
        assert!(sync.list().error().is_none());
    }

    #[tokio::test]
    async fn test_create_failure_preserves_state() {
        let mut server = Server::new_async().await;
        let mut sync = loaded_sync(&mut server, r#"[{"id":1,"title":"a","done":false}]"#).await;

        let _m = server
            .mock("POST", "/tasks/")
            .with_status(500)
            .create_async()
            .await;

        sync.create("buy milk").await;

        assert_eq!(sync.list().tasks(), &[Task::new(1, "a", false)]);
        assert_eq!(sync.list().error(), Some("failed to add task"));
        assert_eq!(sync.list().pending_input(), "buy milk");
    }

    #[tokio::test]
    async fn test_create_unparseable_body_is_network_error() {
        let mut server = Server::new_async().await;
        let mut sync = loaded_sync(&mut server, "[]").await;

        let _m = server
            .mock("POST", "/tasks/")
            .with_status(200)
            .with_header("content-type", JSON)
            .with_body(r#"{"title":"no id"}"#)
            .create_async()
            .await;

        sync.create("no id").await;

        assert!(sync.list().is_empty());
        let error = sync.list().error().unwrap();
        assert!(error.starts_with("network error"));
        assert_eq!(sync.list().pending_input(), "no id");
    }

    #[tokio::test]
    async fn test_toggle_done_to_not_done() {
        let mut server = Server::new_async().await;
        let mut sync = loaded_sync(&mut server, r#"[{"id":3,"title":"a","done":true}]"#).await;

        let m = server
            .mock("DELETE", "/tasks/3/done")
            .with_status(200)
            .create_async()
            .await;

        sync.toggle(TaskId(3)).await;

        m.assert_async().await;
        assert!(!sync.list().get(TaskId(3)).unwrap().done);
        assert!(sync.list().error().is_none());
    }

    #[tokio::test]
    async fn test_toggle_unmark_failure_keeps_done() {
        let mut server = Server::new_async().await;
        let mut sync = loaded_sync(&mut server, r#"[{"id":3,"title":"a","done":true}]"#).await;

        let _m = server
            .mock("DELETE", "/tasks/3/done")
            .with_status(500)
            .create_async()
            .await;

        sync.toggle(TaskId(3)).await;

        assert!(sync.list().get(TaskId(3)).unwrap().done);
        assert_eq!(sync.list().error(), Some("failed to delete task"));
    }

    #[tokio::test]
    async fn test_toggle_not_done_uses_response_id() {
        let mut server = Server::new_async().await;
        let mut sync = loaded_sync(&mut server, r#"[{"id":5,"title":"a","done":false}]"#).await;

        let m = server
            .mock("PUT", "/tasks/5/done")
            .with_status(200)
            .with_header("content-type", JSON)
            .with_body(r#"{"id":5}"#)
            .create_async()
            .await;

        sync.toggle(TaskId(5)).await;

        m.assert_async().await;
        assert!(sync.list().get(TaskId(5)).unwrap().done);
        assert!(sync.list().error().is_none());
    }

    #[tokio::test]
    async fn test_toggle_mark_failure() {
        let mut server = Server::new_async().await;
        let mut sync = loaded_sync(&mut server, r#"[{"id":5,"title":"a","done":false}]"#).await;

        let _m = server
            .mock("PUT", "/tasks/5/done")
            .with_status(503)
            .create_async()
            .await;

        sync.toggle(TaskId(5)).await;

        assert!(!sync.list().get(TaskId(5)).unwrap().done);
        assert_eq!(sync.list().error(), Some("failed to complete task"));
    }

    #[tokio::test]
    async fn test_toggle_missing_id_sends_nothing() {
        let mut server = Server::new_async().await;
        let mut sync = loaded_sync(&mut server, r#"[{"id":1,"title":"a","done":false}]"#).await;

        let put = server
            .mock("PUT", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        sync.toggle(TaskId(999)).await;

        put.assert_async().await;
        delete.assert_async().await;
        assert_eq!(sync.list().error(), Some("task not found"));
        assert_eq!(sync.list().tasks(), &[Task::new(1, "a", false)]);
    }

    #[tokio::test]
    async fn test_delete_removes_regardless_of_status() {
        let mut server = Server::new_async().await;
        let mut sync = loaded_sync(
            &mut server,
            r#"[{"id":1,"title":"a","done":false},{"id":2,"title":"b","done":true}]"#,
        )
        .await;

        let _m = server
            .mock("DELETE", "/tasks/1")
            .with_status(500)
            .create_async()
            .await;

        sync.delete(TaskId(1)).await.unwrap();

        assert_eq!(sync.list().tasks(), &[Task::new(2, "b", true)]);
        assert!(sync.list().error().is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_noop() {
        let mut server = Server::new_async().await;
        let mut sync = loaded_sync(&mut server, r#"[{"id":1,"title":"a","done":false}]"#).await;

        let _m = server
            .mock("DELETE", "/tasks/42")
            .with_status(404)
            .create_async()
            .await;

        sync.delete(TaskId(42)).await.unwrap();

        assert_eq!(sync.list().tasks(), &[Task::new(1, "a", false)]);
        assert!(sync.list().error().is_none());
    }

    #[tokio::test]
    async fn test_delete_transport_failure_keeps_task() {
        // Reserve a free port, then release it so nothing is listening
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = TaskClient::new(&format!("http://127.0.0.1:{}", port)).unwrap();
        let mut sync = Synchronizer::new(client);
        sync.list_mut()
            .apply(Completion::Load(Ok(vec![Task::new(1, "a", false)])));

        assert!(sync.delete(TaskId(1)).await.is_err());
        assert_eq!(sync.list().tasks(), &[Task::new(1, "a", false)]);
        assert!(sync.list().error().is_none());
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let mut server = Server::new_async().await;
        let mut sync = loaded_sync(&mut server, r#"[{"id":1,"title":"a","done":false}]"#).await;

        sync.toggle(TaskId(999)).await;
        assert_eq!(sync.list().error(), Some("task not found"));

        let _m = server
            .mock("PUT", "/tasks/1/done")
            .with_status(200)
            .with_header("content-type", JSON)
            .with_body(r#"{"id":1,"title":"a","done":true}"#)
            .create_async()
            .await;

        sync.toggle(TaskId(1)).await;
        assert!(sync.list().error().is_none());
        assert!(sync.list().get(TaskId(1)).unwrap().done);
    }
}
