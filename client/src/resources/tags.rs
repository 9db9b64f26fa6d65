//! Merchant tag operations.

use crate::client::{AdminClient, encode};
use crate::error::Result;
use crate::transport::{ApiRequest, Transport, query_pairs};
use serde_json::{Value, json};
use survey_admin_core::normalize::normalize_tags;
use survey_admin_core::requests::{TagListParams, TagPayload};
use survey_admin_core::{PagedResult, TagRecord};

impl<T: Transport> AdminClient<T> {
    /// List merchant tags.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn fetch_tags(&self, params: &TagListParams) -> Result<PagedResult<TagRecord>> {
        let body = self
            .send_json(ApiRequest::get("/merchant-tags").with_query(query_pairs(params)))
            .await?;
        Ok(normalize_tags(&body))
    }

    /// Create a tag.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn create_tag(&self, payload: &TagPayload) -> Result<Value> {
        self.send_json(ApiRequest::post("/merchant-tags").with_body(encode(payload)?))
            .await
    }

    /// Update a tag.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn update_tag(&self, id: u64, payload: &TagPayload) -> Result<Value> {
        self.send_json(ApiRequest::put(format!("/merchant-tags/{id}")).with_body(encode(payload)?))
            .await
    }

    /// Delete a tag.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn delete_tag(&self, id: u64) -> Result<Value> {
        self.send_json(ApiRequest::delete(format!("/merchant-tags/{id}")))
            .await
    }

    /// Create several tags in one request.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn batch_create_tags(&self, tags: &[TagPayload]) -> Result<Value> {
        let body = json!({ "tags": encode(tags)? });
        self.send_json(ApiRequest::post("/merchant-tags/batch").with_body(body))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::AdminClient;
    use crate::mocks::{MockTransport, RecordingNavigator};
    use crate::token_store::TokenStore;
    use serde_json::json;
    use std::sync::Arc;
    use survey_admin_core::requests::{TagListParams, TagPayload};

    fn client() -> (AdminClient<MockTransport>, MockTransport) {
        let transport = MockTransport::new();
        let client = AdminClient::new(
            transport.clone(),
            TokenStore::in_memory(),
            Arc::new(RecordingNavigator::new()),
        );
        (client, transport)
    }

    #[tokio::test]
    async fn test_fetch_tags_from_data_array() {
        let (client, transport) = client();
        transport.push_json(json!({
            "code": 0,
            "data": [
                {"ID": 1, "tag_name": "Coffee", "alias": "CF", "class": "Drinks"},
                {"ID": 0, "tag_name": "zero id"}
            ]
        }));

        let params = TagListParams {
            include_deleted: Some(true),
            ..TagListParams::default()
        };
        let page = client.fetch_tags(&params).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.server_total, None);
        assert_eq!(page.items[0].label(), "Drinks：CF Coffee");
        assert_eq!(
            transport.last_request().unwrap().query,
            vec![("includeDeleted".to_string(), "true".to_string())]
        );
    }

    #[tokio::test]
    async fn test_batch_create_wraps_tags() {
        let (client, transport) = client();
        transport.push_json(json!({"code": 0, "data": {"created": 2}}));

        let tags = vec![
            TagPayload {
                name: Some("A".to_string()),
                ..TagPayload::default()
            },
            TagPayload {
                name: Some("B".to_string()),
                class: Some("X".to_string()),
                ..TagPayload::default()
            },
        ];
        let result = client.batch_create_tags(&tags).await.unwrap();

        assert_eq!(result["data"]["created"], 2);
        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "/merchant-tags/batch");
        assert_eq!(
            request.body,
            Some(json!({"tags": [{"name": "A"}, {"name": "B", "class": "X"}]}))
        );
    }
}
