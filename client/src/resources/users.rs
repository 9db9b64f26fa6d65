//! User operations.

use crate::client::{AdminClient, encode};
use crate::error::{ApiError, Result};
use crate::transport::{ApiRequest, Transport, query_pairs};
use serde_json::Value;
use survey_admin_core::envelope::unwrap_data;
use survey_admin_core::normalize::{normalize_user, normalize_users};
use survey_admin_core::requests::{PasswordChange, UserListParams, UserPayload};
use survey_admin_core::{PagedResult, UserRecord};

impl<T: Transport> AdminClient<T> {
    /// List users.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn fetch_users(&self, params: &UserListParams) -> Result<PagedResult<UserRecord>> {
        let body = self
            .send_json(ApiRequest::get("/users").with_query(query_pairs(params)))
            .await?;
        Ok(normalize_users(&body))
    }

    /// Fetch the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidData` if the payload has no usable user
    pub async fn fetch_current_user(&self) -> Result<UserRecord> {
        let body = self.send_json(ApiRequest::get("/users/me")).await?;
        normalize_user(unwrap_data(&body)).map_err(|reason| {
            tracing::debug!(%reason, "Current user payload rejected");
            ApiError::InvalidData("Invalid user data received from server".to_string())
        })
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn create_user(&self, payload: &UserPayload) -> Result<Value> {
        self.send_json(ApiRequest::post("/users").with_body(encode(payload)?))
            .await
    }

    /// Update a user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn update_user(&self, id: u64, payload: &UserPayload) -> Result<Value> {
        self.send_json(ApiRequest::put(format!("/users/{id}")).with_body(encode(payload)?))
            .await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn delete_user(&self, id: u64) -> Result<Value> {
        self.send_json(ApiRequest::delete(format!("/users/{id}"))).await
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn update_password(&self, change: &PasswordChange) -> Result<Value> {
        self.send_json(ApiRequest::put("/users/me/password").with_body(encode(change)?))
            .await
    }
}
