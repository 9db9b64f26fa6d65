//! Subtask and attachment operations.

use crate::client::{AdminClient, decode, encode};
use crate::error::Result;
use crate::transport::{ApiRequest, Transport, query_pairs};
use serde_json::{Value, json};
use survey_admin_core::envelope::unwrap_data;
use survey_admin_core::requests::{
    ConfirmAttachmentRequest, ConfirmAttachmentResponse, PresignAttachmentRequest,
    PresignAttachmentResponse, SubmitSubtaskPayload, SubtaskListParams,
};

/// Attachment listing page used when none is given.
pub const DEFAULT_ATTACHMENT_PAGE: u32 = 1;

/// Attachment listing size used when none is given.
pub const DEFAULT_ATTACHMENT_PAGE_SIZE: u32 = 20;

impl<T: Transport> AdminClient<T> {
    /// Submit a survey report for a merchant.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn submit_subtask(&self, payload: &SubmitSubtaskPayload) -> Result<Value> {
        self.send_json(ApiRequest::post("/subtasks").with_body(encode(payload)?))
            .await
    }

    /// Accept or reject a submitted subtask.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn confirm_subtask(&self, id: u64, confirm: bool) -> Result<Value> {
        self.send_json(
            ApiRequest::post(format!("/subtasks/{id}/confirm"))
                .with_body(json!({ "confirm": confirm })),
        )
        .await
    }

    /// Obtain an upload policy for a subtask attachment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the policy cannot be read
    pub async fn presign_subtask_attachment(
        &self,
        id: u64,
        request: &PresignAttachmentRequest,
    ) -> Result<PresignAttachmentResponse> {
        let body = self
            .send_json(
                ApiRequest::post(format!("/subtasks/{id}/attachments/presign"))
                    .with_body(encode(request)?),
            )
            .await?;
        decode(unwrap_data(&body).clone())
    }

    /// Register an uploaded attachment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the attachment record cannot be read
    pub async fn confirm_subtask_attachment(
        &self,
        id: u64,
        request: &ConfirmAttachmentRequest,
    ) -> Result<ConfirmAttachmentResponse> {
        let body = self
            .send_json(
                ApiRequest::post(format!("/subtasks/{id}/attachments/confirm"))
                    .with_body(encode(request)?),
            )
            .await?;
        decode(unwrap_data(&body).clone())
    }

    /// List a subtask's attachments (page 1, 20 per page by default).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn list_subtask_attachments(
        &self,
        id: u64,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<Value> {
        let query = vec![
            ("page".to_string(), page.unwrap_or(DEFAULT_ATTACHMENT_PAGE).to_string()),
            ("size".to_string(), size.unwrap_or(DEFAULT_ATTACHMENT_PAGE_SIZE).to_string()),
        ];
        self.send_json(ApiRequest::get(format!("/subtasks/{id}/attachments")).with_query(query))
            .await
    }

    /// List subtasks.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    pub async fn list_subtasks(&self, params: &SubtaskListParams) -> Result<Value> {
        self.send_json(ApiRequest::get("/subtasks").with_query(query_pairs(params)))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::AdminClient;
    use crate::error::ApiError;
    use crate::mocks::{MockTransport, RecordingNavigator};
    use crate::token_store::TokenStore;
    use serde_json::json;
    use std::sync::Arc;
    use survey_admin_core::requests::{PresignAttachmentRequest, SubtaskListParams};

    fn client() -> (AdminClient<MockTransport>, MockTransport) {
        let transport = MockTransport::new();
        let client = AdminClient::new(
            transport.clone(),
            TokenStore::in_memory(),
            Arc::new(RecordingNavigator::new()),
        );
        (client, transport)
    }

    fn presign_request() -> PresignAttachmentRequest {
        PresignAttachmentRequest {
            file_name: "front.jpg".to_string(),
            size: 2048,
            mime: "image/jpeg".to_string(),
            biz_type: "subtask".to_string(),
        }
    }

    #[tokio::test]
    async fn test_presign_unwraps_data() {
        let (client, transport) = client();
        transport.push_json(json!({
            "code": 0,
            "data": {
                "key": "uploads/1/front.jpg",
                "host": "https://bucket.example.com",
                "policy": "cG9saWN5",
                "signature": "sig",
                "access_id": "AK",
                "expire_at": 1_700_000_000
            }
        }));

        let policy = client
            .presign_subtask_attachment(6, &presign_request())
            .await
            .unwrap();

        assert_eq!(policy.key, "uploads/1/front.jpg");
        assert!(policy.headers.is_empty());
        assert_eq!(
            transport.last_request().unwrap().path,
            "/subtasks/6/attachments/presign"
        );
    }

    #[tokio::test]
    async fn test_presign_with_unexpected_body_fails_to_decode() {
        let (client, transport) = client();
        transport.push_json(json!({"code": 0, "data": {"key": "only"}}));

        let err = client
            .presign_subtask_attachment(6, &presign_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_attachment_listing_defaults() {
        let (client, transport) = client();
        transport.push_json(json!({"items": []}));
        transport.push_json(json!({"items": []}));

        client.list_subtask_attachments(6, None, None).await.unwrap();
        client.list_subtask_attachments(6, Some(3), Some(50)).await.unwrap();

        let requests = transport.requests();
        assert_eq!(
            requests[0].query,
            vec![
                ("page".to_string(), "1".to_string()),
                ("size".to_string(), "20".to_string()),
            ]
        );
        assert_eq!(requests[1].query[0].1, "3");
        assert_eq!(requests[1].query[1].1, "50");
    }

    #[tokio::test]
    async fn test_list_subtasks_uses_camel_case_filters() {
        let (client, transport) = client();
        transport.push_json(json!({"items": []}));

        let params = SubtaskListParams {
            task_id: Some(2),
            confirmed: Some(false),
            ..SubtaskListParams::default()
        };
        client.list_subtasks(&params).await.unwrap();

        assert_eq!(
            transport.last_request().unwrap().query,
            vec![
                ("confirmed".to_string(), "false".to_string()),
                ("taskId".to_string(), "2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_confirm_subtask_body() {
        let (client, transport) = client();
        transport.push_json(json!({"code": 0}));

        client.confirm_subtask(9, true).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "/subtasks/9/confirm");
        assert_eq!(request.body, Some(json!({"confirm": true})));
    }
}
