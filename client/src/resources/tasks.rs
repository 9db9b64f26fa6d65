//! Task operations.

use crate::client::{AdminClient, encode};
use crate::error::{ApiError, Result};
use crate::transport::{ApiRequest, Transport, query_pairs};
use serde_json::{Value, json};
use survey_admin_core::PagedResult;
use survey_admin_core::normalize::normalize_task_page;
use survey_admin_core::requests::{
    CreateTaskPayload, TaskListParams, TaskMerchantsRequest, TaskUpdate,
};
use survey_admin_runtime::{RetryPolicy, retry_with_predicate};

impl<T: Transport> AdminClient<T> {
    /// Create a task.
    ///
    /// A failure with no response is retried once, immediately; the second
    /// failure, if any, is returned as is.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn create_task(&self, payload: &CreateTaskPayload) -> Result<Value> {
        let request = ApiRequest::post("/tasks").with_body(encode(payload)?);

        retry_with_predicate(
            RetryPolicy::immediate(1),
            || self.send_json(request.clone()),
            ApiError::is_network,
        )
        .await
    }

    /// List tasks, returning the body as received.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn fetch_tasks(&self, params: &TaskListParams) -> Result<Value> {
        self.send_json(ApiRequest::get("/tasks").with_query(query_pairs(params)))
            .await
    }

    /// List tasks as a page.
    ///
    /// Without any parameter the caller's own tasks (`/tasks/my`) are listed.
    /// Unrecognised bodies yield an empty page.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn fetch_tasks_paged(&self, params: &TaskListParams) -> Result<PagedResult<Value>> {
        let path = if params.is_empty() { "/tasks/my" } else { "/tasks" };
        let body = self
            .send_json(ApiRequest::get(path).with_query(query_pairs(params)))
            .await?;
        Ok(normalize_task_page(&body))
    }

    /// Update a task.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn update_task(&self, id: u64, update: &TaskUpdate) -> Result<Value> {
        self.send_json(ApiRequest::put(format!("/tasks/{id}")).with_body(encode(update)?))
            .await
    }

    /// Attach merchants to a task, generating subtasks.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn generate_task_merchants(
        &self,
        id: u64,
        request: &TaskMerchantsRequest,
    ) -> Result<Value> {
        self.send_json(
            ApiRequest::post(format!("/tasks/{id}/merchants")).with_body(encode(request)?),
        )
        .await
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn delete_task(&self, id: u64) -> Result<Value> {
        self.send_json(ApiRequest::delete(format!("/tasks/{id}"))).await
    }

    /// Assign a task to a user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn assign_task(&self, id: u64, assignee_id: u64) -> Result<Value> {
        self.send_json(
            ApiRequest::patch(format!("/tasks/{id}/assign"))
                .with_body(json!({ "assignee_id": assignee_id })),
        )
        .await
    }

    /// Set a task's status code.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn update_task_status(&self, id: u64, status: i32) -> Result<Value> {
        self.send_json(
            ApiRequest::patch(format!("/tasks/{id}/status")).with_body(json!({ "status": status })),
        )
        .await
    }

    /// Apply a named workflow transition to a task.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn transition_task(&self, id: u64, action: &str) -> Result<Value> {
        self.send_json(
            ApiRequest::post(format!("/tasks/{id}/transition"))
                .with_body(json!({ "action": action })),
        )
        .await
    }

    /// Download the task export file.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn export_tasks(&self, params: &TaskListParams) -> Result<Vec<u8>> {
        let response = self
            .send_raw(
                ApiRequest::get("/tasks/export")
                    .with_query(query_pairs(params))
                    .binary(),
            )
            .await?;
        Ok(response.into_bytes())
    }

    /// Fetch a task's completion progress.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn fetch_task_progress(&self, id: u64) -> Result<Value> {
        self.send_json(ApiRequest::get(format!("/tasks/{id}/progress")))
            .await
    }

    /// List the merchants attached to a task as a page.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn fetch_task_merchants(
        &self,
        id: u64,
        params: &TaskListParams,
    ) -> Result<PagedResult<Value>> {
        let body = self
            .send_json(ApiRequest::get(format!("/tasks/{id}/merchants")).with_query(query_pairs(params)))
            .await?;
        Ok(normalize_task_page(&body))
    }
}
