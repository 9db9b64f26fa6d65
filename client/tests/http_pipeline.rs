//! Integration tests driving the reqwest transport against a mock server.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use survey_admin_client::mocks::RecordingNavigator;
use survey_admin_client::pipeline::LOGIN_PATH;
use survey_admin_client::{AdminClient, ApiError, ErrorCategory, ReqwestTransport, TokenStore};
use survey_admin_core::geocode::{GeocodeErrorCode, GeocodeRequest};
use survey_admin_core::requests::{MerchantListParams, TaskListParams, UserListParams};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    client: AdminClient,
    navigator: RecordingNavigator,
}

async fn harness() -> Harness {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let server = MockServer::start().await;
    let transport =
        ReqwestTransport::new(format!("{}/api/v1/", server.uri()), Duration::from_secs(5))
            .expect("transport");
    let navigator = RecordingNavigator::new();
    let client = AdminClient::new(transport, TokenStore::in_memory(), Arc::new(navigator.clone()));

    Harness {
        server,
        client,
        navigator,
    }
}

#[tokio::test]
async fn bearer_token_is_attached_when_stored() {
    let h = harness().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(header("Authorization", "Bearer T"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"items": [{"ID": 1, "username": "alice"}], "total": 1}
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    h.client.tokens().save("T");
    let page = h.client.fetch_users(&UserListParams::default()).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].username, "alice");
}

#[tokio::test]
async fn no_authorization_header_without_token() {
    let h = harness().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/merchant-tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;

    h.client.fetch_tags(&Default::default()).await.unwrap();

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn unauthorized_response_clears_token_and_redirects() {
    let h = harness().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "token expired"})))
        .mount(&h.server)
        .await;

    h.client.tokens().save("stale");
    let err = h.client.fetch_current_user().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { status: 401, .. }));
    assert_eq!(err.message(), "token expired");
    assert_eq!(err.category(), ErrorCategory::Authentication);
    assert_eq!(h.client.tokens().read(), None);
    assert_eq!(h.navigator.visits(), vec![LOGIN_PATH.to_string()]);
}

#[tokio::test]
async fn server_error_keeps_token() {
    let h = harness().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/merchants/4"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&h.server)
        .await;

    h.client.tokens().save("T");
    let err = h.client.delete_merchant(4).await.unwrap_err();

    assert!(matches!(err, ApiError::Server { status: 500, .. }));
    assert_eq!(err.message(), "Request failed with status code 500");
    assert_eq!(h.client.tokens().read().as_deref(), Some("T"));
    assert!(h.navigator.visits().is_empty());
}

#[tokio::test]
async fn list_filters_are_sent_as_query_pairs() {
    let h = harness().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/merchants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "total": 0})))
        .mount(&h.server)
        .await;

    let params = MerchantListParams {
        page: Some(2),
        page_size: Some(50),
        q: Some("tea house".to_string()),
        tags: vec![3, 4],
    };
    h.client.fetch_merchants(&params).await.unwrap();

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("page=2&pageSize=50&q=tea+house&tags=3&tags=4")
    );
}

#[tokio::test]
async fn login_then_write_returns_server_payload() {
    let h = harness().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({"username": "admin", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "fresh"}})))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/merchant-tags/batch"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": {"created": 0}})))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h.client.login("admin", "pw").await.unwrap();
    assert_eq!(outcome.token.as_deref(), Some("fresh"));

    let result = h.client.batch_create_tags(&[]).await.unwrap();
    assert_eq!(result, json!({"code": 0, "data": {"created": 0}}));
}

#[tokio::test]
async fn export_returns_raw_bytes() {
    let h = harness().await;
    let file = b"id,name\n1,North\n".to_vec();
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks/export"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/csv")
                .set_body_bytes(file.clone()),
        )
        .mount(&h.server)
        .await;

    let bytes = h.client.export_tasks(&TaskListParams::default()).await.unwrap();
    assert_eq!(bytes, file);
}

#[tokio::test]
async fn geocode_errors_are_translated() {
    let h = harness().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/geocode"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"code": 40401, "msg": "ADDRESS_NOT_FOUND"})),
        )
        .mount(&h.server)
        .await;

    let err = h
        .client
        .geocode(&GeocodeRequest::new("nowhere"))
        .await
        .unwrap_err();

    assert_eq!(err.message(), GeocodeErrorCode::AddressNotFound.user_message());
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    let transport =
        ReqwestTransport::new("http://127.0.0.1:1/api/v1", Duration::from_secs(2)).unwrap();
    let client = AdminClient::new(
        transport,
        TokenStore::in_memory(),
        Arc::new(RecordingNavigator::new()),
    );

    let err = client.fetch_users(&UserListParams::default()).await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(err.status(), None);
    assert!(!err.message().is_empty());
}
