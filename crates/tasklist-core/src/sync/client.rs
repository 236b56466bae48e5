//! Task service client implementation
//!
//! Thin async HTTP client over the task service's REST endpoints. Each
//! method issues exactly one request; nothing is retried and no timeout is
//! applied, so a hung request simply never completes.

use std::collections::HashSet;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::{
    SyncError, SyncResult, ADD_FAILED, LOAD_FAILED, MARK_FAILED, UNMARK_FAILED,
};
use crate::models::{DoneMarker, NewTask, Task, TaskId};

/// Client for the remote task service
#[derive(Debug, Clone)]
pub struct TaskClient {
    /// Base address without trailing slash
    base_url: String,
    /// Shared connection pool
    http: Client,
}

impl TaskClient {
    /// Create a new client for the service at `base_url`
    pub fn new(base_url: &str) -> SyncResult<Self> {
        let http = Client::builder().build()?;
        Ok(Self::with_http(base_url, http))
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_http(base_url: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Get the service base address
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks/", self.base_url)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }

    fn done_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{}/done", self.base_url, id)
    }

    /// Fetch the full task collection (`GET /tasks/`)
    ///
    /// Rejects payloads that repeat a task id.
    pub async fn list(&self) -> SyncResult<Vec<Task>> {
        let url = self.tasks_url();
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::server(status, LOAD_FAILED));
        }

        let tasks: Vec<Task> = response.json().await?;
        ensure_unique_ids(&tasks)?;

        debug!("Fetched {} task(s)", tasks.len());
        Ok(tasks)
    }

    /// Create a task (`POST /tasks/`)
    ///
    /// Returns the task exactly as the service stored it.
    pub async fn create(&self, title: &str) -> SyncResult<Task> {
        let url = self.tasks_url();
        debug!("POST {} title={:?}", url, title);

        let response = self
            .http
            .post(&url)
            .json(&NewTask::new(title))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Create rejected with status {}", status);
            return Err(SyncError::server(status, ADD_FAILED));
        }

        Ok(response.json().await?)
    }

    /// Mark a task done (`PUT /tasks/{id}/done`)
    pub async fn mark_done(&self, id: TaskId) -> SyncResult<DoneMarker> {
        let url = self.done_url(id);
        debug!("PUT {}", url);

        let response = self.http.put(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Mark-done for task {} rejected with status {}", id, status);
            return Err(SyncError::server(status, MARK_FAILED));
        }

        Ok(response.json().await?)
    }

    /// Remove the done marker from a task (`DELETE /tasks/{id}/done`)
    ///
    /// The response body is not read.
    pub async fn unmark_done(&self, id: TaskId) -> SyncResult<()> {
        let url = self.done_url(id);
        debug!("DELETE {}", url);

        let response = self.http.delete(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Unmark-done for task {} rejected with status {}", id, status);
            return Err(SyncError::server(status, UNMARK_FAILED));
        }

        Ok(())
    }

    /// Delete a task (`DELETE /tasks/{id}`)
    ///
    /// Succeeds with whatever status the service answered; only a transport
    /// failure is an error.
    pub async fn delete(&self, id: TaskId) -> SyncResult<StatusCode> {
        let url = self.task_url(id);
        debug!("DELETE {}", url);

        let response = self.http.delete(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Delete for task {} answered {}, removing locally anyway", id, status);
        }

        Ok(status)
    }
}

/// Check the id uniqueness invariant on a loaded collection
fn ensure_unique_ids(tasks: &[Task]) -> SyncResult<()> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(task.id) {
            return Err(SyncError::InvalidResponse(format!(
                "duplicate task id {}",
                task.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mockito::{Matcher, Server};

    #[test]
    fn test_urls() {
        let client = TaskClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.tasks_url(), "http://localhost:8000/tasks/");
        assert_eq!(client.task_url(TaskId(4)), "http://localhost:8000/tasks/4");
        assert_eq!(
            client.done_url(TaskId(4)),
            "http://localhost:8000/tasks/4/done"
        );
    }

    #[test]
    fn test_ensure_unique_ids() {
        let ok = vec![Task::new(1, "a", false), Task::new(2, "b", true)];
        assert!(ensure_unique_ids(&ok).is_ok());

        let dup = vec![Task::new(1, "a", false), Task::new(1, "b", true)];
        let err = ensure_unique_ids(&dup).unwrap_err();
        assert!(matches!(err, SyncError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_list_parses_tasks() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":1,"title":"a","done":false},{"id":2,"title":"b","done":true}]"#)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url()).unwrap();
        let tasks = client.list().await.unwrap();
        assert_eq!(
            tasks,
            vec![Task::new(1, "a", false), Task::new(2, "b", true)]
        );
    }

    #[tokio::test]
    async fn test_list_rejects_malformed_payload() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail":"not a list"}"#)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url()).unwrap();
        let err = client.list().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_list_rejects_duplicate_ids() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":1,"title":"a","done":false},{"id":1,"title":"b","done":true}]"#)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url()).unwrap();
        let err = client.list().await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_create_sends_title_only() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/tasks/")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({"title": "buy milk"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":7,"title":"buy milk","done":false}"#)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url()).unwrap();
        let task = client.create("buy milk").await.unwrap();
        assert_eq!(task, Task::new(7, "buy milk", false));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_server_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/tasks/")
            .with_status(422)
            .with_body(r#"{"detail":"bad"}"#)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url()).unwrap();
        let err = client.create("x").await.unwrap_err();
        assert_eq!(err.to_string(), "failed to add task");
        assert_eq!(err.status(), Some(422));
    }

    #[tokio::test]
    async fn test_unmark_done_ignores_body() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("DELETE", "/tasks/3/done")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = TaskClient::new(&server.url()).unwrap();
        assert!(client.unmark_done(TaskId(3)).await.is_ok());
    }

    #[tokio::test]
    async fn test_mark_done_server_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/tasks/5/done")
            .with_status(404)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url()).unwrap();
        let err = client.mark_done(TaskId(5)).await.unwrap_err();
        assert_eq!(err.to_string(), "failed to complete task");
    }

    #[tokio::test]
    async fn test_delete_returns_any_status() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("DELETE", "/tasks/9")
            .with_status(500)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url()).unwrap();
        let status = client.delete(TaskId(9)).await.unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Reserve a free port, then release it so nothing is listening
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = TaskClient::new(&format!("http://127.0.0.1:{}", port)).unwrap();
        let err = client.list().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
