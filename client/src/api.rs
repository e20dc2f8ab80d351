// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::future::Future;

use anyhow::{Context, Result};
use common::{NewTask, Task};
use tracing::{debug, info};

/// The four calls the task service offers.
///
/// Every method is a single round trip with no retry and no timeout.
/// Implementations must be cheap to clone since each request runs in its own task.
pub trait TaskApi: Clone + Send + Sync + 'static {
    /// `GET /tasks`
    fn list(&self) -> impl Future<Output = Result<Vec<Task>>> + Send;

    /// `POST /tasks`
    fn create(&self, new_task: NewTask) -> impl Future<Output = Result<Task>> + Send;

    /// `PATCH /tasks/{id}`, no body. The server decides the new completion state.
    fn toggle(&self, id: i64) -> impl Future<Output = Result<Task>> + Send;

    /// `DELETE /tasks/{id}`. The response body is ignored.
    fn delete(&self, id: i64) -> impl Future<Output = Result<()>> + Send;
}

/// `TaskApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http: reqwest::Client,
    tasks_url: String,
}

impl HttpTaskApi {
    /// Builds a client for the service rooted at `api_url` (e.g. `http://127.0.0.1:5000`).
    pub fn new(api_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            tasks_url: format!("{}/tasks", api_url.trim_end_matches('/')),
        })
    }

    pub fn tasks_url(&self) -> &str {
        &self.tasks_url
    }

    fn task_url(&self, id: i64) -> String {
        format!("{}/{}", self.tasks_url, id)
    }
}

impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>> {
        debug!("GET {}", self.tasks_url);
        let tasks = self
            .http
            .get(&self.tasks_url)
            .send()
            .await
            .context("Failed to reach task service")?
            .error_for_status()
            .context("Task service rejected the list request")?
            .json::<Vec<Task>>()
            .await
            .context("Failed to decode task list")?;

        info!("Fetched {} tasks.", tasks.len());
        Ok(tasks)
    }

    async fn create(&self, new_task: NewTask) -> Result<Task> {
        debug!("POST {} with {:?}", self.tasks_url, new_task);
        let task = self
            .http
            .post(&self.tasks_url)
            .json(&new_task)
            .send()
            .await
            .context("Failed to reach task service")?
            .error_for_status()
            .context("Task service rejected the new task")?
            .json::<Task>()
            .await
            .context("Failed to decode created task")?;

        info!("Task created with ID: {}", task.id);
        Ok(task)
    }

    async fn toggle(&self, id: i64) -> Result<Task> {
        let url = self.task_url(id);
        debug!("PATCH {}", url);
        let task = self
            .http
            .patch(&url)
            .send()
            .await
            .context("Failed to reach task service")?
            .error_for_status()
            .with_context(|| format!("Task service rejected toggle of task {id}"))?
            .json::<Task>()
            .await
            .context("Failed to decode toggled task")?;

        info!("Task {} is now completed={}", task.id, task.completed);
        Ok(task)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let url = self.task_url(id);
        debug!("DELETE {}", url);
        self.http
            .delete(&url)
            .send()
            .await
            .context("Failed to reach task service")?
            .error_for_status()
            .with_context(|| format!("Task service rejected deletion of task {id}"))?;

        info!("Task with ID {} deleted.", id);
        Ok(())
    }
}
