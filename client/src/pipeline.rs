//! Request/response interceptor pipeline.
//!
//! Every request passes through [`Pipeline::request_fulfilled`], which
//! attaches the bearer token, before reaching the transport. Failures pass
//! through [`Pipeline::response_rejected`], which clears the token and
//! navigates to the login page on 401/403 and then hands the same error back.

use crate::error::TransportError;
use crate::token_store::TokenStore;
use crate::transport::{ApiRequest, RawResponse, Transport};
use std::fmt;
use std::sync::Arc;

/// Route of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Header carrying the bearer token.
pub const AUTHORIZATION: &str = "Authorization";

/// Side channel for navigating the user elsewhere.
pub trait Navigator: Send + Sync {
    /// Navigate to a route. Must not fail.
    fn navigate(&self, path: &str);
}

/// Navigator that only logs the redirect.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, path: &str) {
        tracing::warn!(path, "Credential rejected, redirecting");
    }
}

/// Transport wrapped with the auth interceptors.
pub struct Pipeline<T> {
    transport: T,
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
}

impl<T> Pipeline<T> {
    /// Assemble a pipeline.
    #[must_use]
    pub fn new(transport: T, tokens: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            transport,
            tokens,
            navigator,
        }
    }

    /// Underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Token store consulted by the interceptors.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Attach `Authorization: Bearer <token>` when a token is stored.
    ///
    /// Without a token the request is returned untouched.
    #[must_use]
    pub fn request_fulfilled(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(token) = self.tokens.read().filter(|t| !t.is_empty()) {
            request
                .headers
                .insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
        }
        request
    }

    /// Clear the token and navigate to the login page on 401/403.
    ///
    /// The error is always returned unchanged.
    #[must_use]
    pub fn response_rejected(&self, error: TransportError) -> TransportError {
        if error.is_auth_failure() {
            tracing::warn!(status = ?error.status_code(), "Authorization failed, clearing token");
            self.tokens.remove();
            self.navigator.navigate(LOGIN_PATH);
        }
        error
    }
}

impl<T: Transport> Pipeline<T> {
    /// Run a request through both interceptors and the transport.
    ///
    /// # Errors
    ///
    /// Returns the transport failure after the rejection interceptor ran.
    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let request = self.request_fulfilled(request);
        self.transport
            .execute(request)
            .await
            .map_err(|error| self.response_rejected(error))
    }
}

impl<T: fmt::Debug> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("transport", &self.transport)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::{FailingStorage, MockTransport, RecordingNavigator};
    use serde_json::json;

    fn pipeline(tokens: TokenStore) -> (Pipeline<MockTransport>, MockTransport, RecordingNavigator) {
        let transport = MockTransport::new();
        let navigator = RecordingNavigator::new();
        let pipeline = Pipeline::new(transport.clone(), tokens, Arc::new(navigator.clone()));
        (pipeline, transport, navigator)
    }

    #[test]
    fn test_request_fulfilled_attaches_bearer_token() {
        let tokens = TokenStore::in_memory();
        tokens.save("T");
        let (pipeline, _, _) = pipeline(tokens);

        let request = pipeline.request_fulfilled(ApiRequest::get("/users"));
        assert_eq!(request.header(AUTHORIZATION), Some("Bearer T"));
    }

    #[test]
    fn test_request_fulfilled_without_token_is_unchanged() {
        let (pipeline, _, _) = pipeline(TokenStore::in_memory());

        let original = ApiRequest::get("/users").with_header("X-Trace", "1");
        assert_eq!(pipeline.request_fulfilled(original.clone()), original);
    }

    #[test]
    fn test_request_fulfilled_survives_storage_failure() {
        let (pipeline, _, _) = pipeline(TokenStore::new(Arc::new(FailingStorage::new())));

        let request = pipeline.request_fulfilled(ApiRequest::get("/users"));
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_response_rejected_clears_token_on_401() {
        let tokens = TokenStore::in_memory();
        tokens.save("T");
        let (pipeline, _, navigator) = pipeline(tokens.clone());

        let error = TransportError::status(401, json!({"message": "expired"}));
        let returned = pipeline.response_rejected(error.clone());

        assert_eq!(returned, error);
        assert_eq!(tokens.read(), None);
        assert_eq!(navigator.visits(), vec![LOGIN_PATH.to_string()]);
    }

    #[test]
    fn test_response_rejected_ignores_other_failures() {
        let tokens = TokenStore::in_memory();
        tokens.save("T");
        let (pipeline, _, navigator) = pipeline(tokens.clone());

        for error in [
            TransportError::status(500, json!({})),
            TransportError::network("connection reset"),
        ] {
            assert_eq!(pipeline.response_rejected(error.clone()), error);
        }
        assert_eq!(tokens.read().as_deref(), Some("T"));
        assert!(navigator.visits().is_empty());
    }

    #[test]
    fn test_response_rejected_survives_storage_failure() {
        let (pipeline, _, navigator) = pipeline(TokenStore::new(Arc::new(FailingStorage::new())));

        let error = TransportError::status(403, json!({}));
        assert_eq!(pipeline.response_rejected(error.clone()), error);
        assert_eq!(navigator.visits().len(), 1);
    }

    #[tokio::test]
    async fn test_send_runs_both_interceptors() {
        let tokens = TokenStore::in_memory();
        tokens.save("T");
        let (pipeline, transport, navigator) = pipeline(tokens.clone());
        transport.push_status(403, json!({"message": "forbidden"}));

        let err = pipeline.send(ApiRequest::get("/roles")).await.unwrap_err();

        assert_eq!(err.status_code(), Some(403));
        assert_eq!(transport.requests()[0].header(AUTHORIZATION), Some("Bearer T"));
        assert_eq!(tokens.read(), None);
        assert_eq!(navigator.visits(), vec![LOGIN_PATH.to_string()]);
    }
}
