//! Role operations.

use crate::client::{AdminClient, decode, encode};
use crate::error::Result;
use crate::transport::{ApiRequest, Transport, query_pairs};
use serde_json::{Value, json};
use survey_admin_core::Role;
use survey_admin_core::requests::{RoleListParams, RolePayload};

impl<T: Transport> AdminClient<T> {
    /// List roles.
    ///
    /// Roles are read from `data` or from a bare array; entries that do not
    /// decode as a role are skipped.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn fetch_roles(&self, params: &RoleListParams) -> Result<Vec<Role>> {
        let body = self
            .send_json(ApiRequest::get("/roles").with_query(query_pairs(params)))
            .await?;

        let raw = body
            .get("data")
            .and_then(Value::as_array)
            .or_else(|| body.as_array())
            .cloned()
            .unwrap_or_default();

        Ok(raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match decode::<Role>(item) {
                Ok(role) => Some(role),
                Err(error) => {
                    tracing::debug!(index, %error, "Skipping backend role");
                    None
                }
            })
            .collect())
    }

    /// Create a role.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn create_role(&self, payload: &RolePayload) -> Result<Value> {
        self.send_json(ApiRequest::post("/roles").with_body(encode(payload)?))
            .await
    }

    /// Update a role.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn update_role(&self, id: u64, payload: &RolePayload) -> Result<Value> {
        self.send_json(ApiRequest::put(format!("/roles/{id}")).with_body(encode(payload)?))
            .await
    }

    /// Delete a role.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn delete_role(&self, id: u64) -> Result<Value> {
        self.send_json(ApiRequest::delete(format!("/roles/{id}"))).await
    }

    /// Grant a role to a user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn assign_role_to_user(&self, user_id: u64, role_id: u64) -> Result<Value> {
        self.send_json(
            ApiRequest::post(format!("/users/{user_id}/roles"))
                .with_body(json!({ "role_id": role_id })),
        )
        .await
    }

    /// Revoke a role from a user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn remove_role_from_user(&self, user_id: u64, role_id: u64) -> Result<Value> {
        self.send_json(
            ApiRequest::delete(format!("/users/{user_id}/roles"))
                .with_body(json!({ "role_id": role_id })),
        )
        .await
    }
}
