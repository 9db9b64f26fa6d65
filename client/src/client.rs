//! Survey Admin API client.

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::pipeline::{LoggingNavigator, Navigator, Pipeline};
use crate::storage::FileStorage;
use crate::token_store::TokenStore;
use crate::transport::{ApiRequest, RawResponse, ReqwestTransport, Transport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Survey Admin API client.
///
/// Resource operations live in [`crate::resources`], one module per entity.
#[derive(Debug)]
pub struct AdminClient<T = ReqwestTransport> {
    pipeline: Pipeline<T>,
}

impl AdminClient<ReqwestTransport> {
    /// Create a client from configuration.
    ///
    /// The token is persisted in `token_file` when one is configured and kept
    /// in memory otherwise. Rejected credentials are reported through a
    /// [`LoggingNavigator`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the HTTP client cannot be built
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.base_url.clone(), config.timeout)
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        let tokens = config
            .token_file
            .as_ref()
            .map_or_else(TokenStore::in_memory, |path| {
                TokenStore::new(Arc::new(FileStorage::new(path)))
            });

        Ok(Self::new(transport, tokens, Arc::new(LoggingNavigator)))
    }

    /// Create a client with configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the HTTP client cannot be built
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ClientConfig::from_env())
    }
}

impl<T> AdminClient<T> {
    /// Create a client over an explicit transport, token store and navigator.
    #[must_use]
    pub fn new(transport: T, tokens: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            pipeline: Pipeline::new(transport, tokens, navigator),
        }
    }

    /// Interceptor pipeline.
    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline<T> {
        &self.pipeline
    }

    /// Token store used for authentication.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        self.pipeline.tokens()
    }
}

impl<T: Transport> AdminClient<T> {
    /// Send a request and return the raw response.
    pub(crate) async fn send_raw(&self, request: ApiRequest) -> Result<RawResponse> {
        self.pipeline.send(request).await.map_err(ApiError::from)
    }

    /// Send a request and return the decoded JSON body.
    pub(crate) async fn send_json(&self, request: ApiRequest) -> Result<Value> {
        self.send_raw(request).await.map(RawResponse::into_json)
    }
}

/// Encode a request payload as JSON.
pub(crate) fn encode<P: Serialize + ?Sized>(payload: &P) -> Result<Value> {
    serde_json::to_value(payload).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Decode a response value into a typed record.
pub(crate) fn decode<D: DeserializeOwned>(value: Value) -> Result<D> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
