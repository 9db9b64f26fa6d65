//! Merchant operations.

use crate::client::{AdminClient, encode};
use crate::error::{ApiError, Result};
use crate::transport::{ApiRequest, Transport, query_pairs};
use serde_json::Value;
use survey_admin_core::envelope::unwrap_data;
use survey_admin_core::normalize::{normalize_merchant, normalize_merchants};
use survey_admin_core::requests::{MerchantListParams, MerchantPayload};
use survey_admin_core::{MerchantRecord, PagedResult};

impl<T: Transport> AdminClient<T> {
    /// List merchants.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn fetch_merchants(
        &self,
        params: &MerchantListParams,
    ) -> Result<PagedResult<MerchantRecord>> {
        let body = self
            .send_json(ApiRequest::get("/merchants").with_query(query_pairs(params)))
            .await?;
        Ok(normalize_merchants(&body))
    }

    /// Fetch one merchant.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidData` if the payload has no usable merchant
    pub async fn fetch_merchant(&self, id: u64) -> Result<MerchantRecord> {
        let body = self.send_json(ApiRequest::get(format!("/merchants/{id}"))).await?;
        normalize_merchant(unwrap_data(&body)).map_err(|reason| {
            tracing::debug!(id, %reason, "Merchant payload rejected");
            ApiError::InvalidData("Invalid merchant data received from server".to_string())
        })
    }

    /// Create a merchant.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn create_merchant(&self, payload: &MerchantPayload) -> Result<Value> {
        self.send_json(ApiRequest::post("/merchants").with_body(encode(payload)?))
            .await
    }

    /// Update a merchant.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn update_merchant(&self, id: u64, payload: &MerchantPayload) -> Result<Value> {
        self.send_json(ApiRequest::put(format!("/merchants/{id}")).with_body(encode(payload)?))
            .await
    }

    /// Delete a merchant.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn delete_merchant(&self, id: u64) -> Result<Value> {
        self.send_json(ApiRequest::delete(format!("/merchants/{id}")))
            .await
    }
}
