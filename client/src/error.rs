//! Error types for the Survey Admin API client

use serde_json::Value;
use survey_admin_core::geocode::GeocodeErrorCode;
use survey_admin_runtime::Retryable;
use thiserror::Error;

/// Message used when neither the server nor the transport explains a failure.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown API error";

/// Message used when a geocoding failure carries no explanation.
pub const GEOCODE_FALLBACK_MESSAGE: &str = "Geocoding request failed";

/// Result alias for resource operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Response received for a failed request.
#[derive(Clone, Debug, PartialEq)]
pub struct FailedResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded body; a JSON string when the body was not JSON
    pub body: Value,
}

/// Failure reported by a [`Transport`](crate::transport::Transport).
///
/// `response` is `None` when nothing was received, which makes the failure
/// network-class.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Transport-level description
    pub message: String,
    /// Response, when one was received
    pub response: Option<FailedResponse>,
}

impl TransportError {
    /// Failure without any response.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: None,
        }
    }

    /// Failure with a non-success response.
    #[must_use]
    pub fn status(status: u16, body: Value) -> Self {
        Self {
            message: format!("Request failed with status code {status}"),
            response: Some(FailedResponse { status, body }),
        }
    }

    /// HTTP status, when a response was received.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }

    /// Whether the status signals an authorization failure (401/403).
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status_code(), Some(401 | 403))
    }

    /// `message` field of the response body, when it is a non-empty string.
    #[must_use]
    pub fn body_message(&self) -> Option<&str> {
        self.body_str("message")
    }

    fn body_str(&self, key: &str) -> Option<&str> {
        self.response
            .as_ref()
            .and_then(|r| r.body.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Human-readable message: body `message`, else the transport message,
    /// else a generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.body_message()
            .or_else(|| Some(self.message.as_str()).filter(|m| !m.is_empty()))
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_string()
    }
}

impl Retryable for TransportError {
    fn is_network_failure(&self) -> bool {
        self.response.is_none()
    }
}

/// Coarse classification of a failure, used to pick a default message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 400
    Validation,
    /// 401
    Authentication,
    /// 403
    Authorization,
    /// 404
    NotFound,
    /// 500
    Server,
    /// No response, or a gateway status (502/503/504)
    Network,
    /// Anything else
    Unknown,
}

impl ErrorCategory {
    /// Classify an optional HTTP status.
    #[must_use]
    pub const fn from_status(status: Option<u16>) -> Self {
        match status {
            None | Some(502..=504) => Self::Network,
            Some(400) => Self::Validation,
            Some(401) => Self::Authentication,
            Some(403) => Self::Authorization,
            Some(404) => Self::NotFound,
            Some(500) => Self::Server,
            Some(_) => Self::Unknown,
        }
    }

    /// Default user-facing message for the category.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Validation => "The request was invalid",
            Self::Authentication => "Your session has expired, please log in again",
            Self::Authorization => "You do not have permission to perform this action",
            Self::NotFound => "The requested resource was not found",
            Self::Server => "The server encountered an error",
            Self::Network => "Network error, please check your connection",
            Self::Unknown => UNKNOWN_ERROR_MESSAGE,
        }
    }
}

/// Errors returned by resource operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received
    #[error("Network error: {message}")]
    Network {
        /// Failure description
        message: String,
    },

    /// The server rejected the credential (401/403)
    #[error("Unauthorized (status {status}): {message}")]
    Unauthorized {
        /// HTTP status code
        status: u16,
        /// Message from the server or transport
        message: String,
    },

    /// The server answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message from the server or transport
        message: String,
    },

    /// Geocoding failed
    #[error("Geocoding failed: {message}")]
    Geocode {
        /// Recognised failure code, if any
        code: Option<GeocodeErrorCode>,
        /// User-facing message
        message: String,
        /// HTTP status, when a response was received
        status: Option<u16>,
    },

    /// The server answered successfully with unusable data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A response body could not be decoded
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// A request body could not be encoded
    #[error("Request encoding failed: {0}")]
    Encode(String),

    /// The client could not be built from its configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Convert a transport failure into the uniform error shape.
    #[must_use]
    pub fn from_transport(err: &TransportError) -> Self {
        let message = err.user_message();
        match err.status_code() {
            None => Self::Network { message },
            Some(status @ (401 | 403)) => Self::Unauthorized { status, message },
            Some(status) => Self::Server { status, message },
        }
    }

    /// Convert a geocoding failure, translating known provider codes.
    ///
    /// The explanation is taken from body `msg`, then body `message`, then
    /// the transport message.
    #[must_use]
    pub fn geocode(err: &TransportError) -> Self {
        let raw = err
            .body_str("msg")
            .or_else(|| err.body_message())
            .or_else(|| Some(err.message.as_str()).filter(|m| !m.is_empty()));

        let code = raw.and_then(GeocodeErrorCode::find_in);
        let message = match (code, raw) {
            (Some(code), _) => code.user_message().to_string(),
            (None, Some(raw)) => raw.to_string(),
            (None, None) => GEOCODE_FALLBACK_MESSAGE.to_string(),
        };

        Self::Geocode {
            code,
            message,
            status: err.status_code(),
        }
    }

    /// Human-readable message without the variant prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Network { message }
            | Self::Unauthorized { message, .. }
            | Self::Server { message, .. }
            | Self::Geocode { message, .. } => message,
            Self::InvalidData(message)
            | Self::Decode(message)
            | Self::Encode(message)
            | Self::Configuration(message) => message,
        }
    }

    /// HTTP status, when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Geocode { status, .. } => *status,
            _ => None,
        }
    }

    /// Category of the failure.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Network { .. } => ErrorCategory::Network,
            Self::Unauthorized { status, .. } | Self::Server { status, .. } => {
                ErrorCategory::from_status(Some(*status))
            }
            Self::Geocode { status, .. } => match status {
                Some(_) => ErrorCategory::from_status(*status),
                None => ErrorCategory::Network,
            },
            Self::InvalidData(_) | Self::Decode(_) | Self::Encode(_) | Self::Configuration(_) => {
                ErrorCategory::Unknown
            }
        }
    }

    /// Whether no response was received.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Geocode { status: None, .. })
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::from_transport(&err)
    }
}

impl Retryable for ApiError {
    fn is_network_failure(&self) -> bool {
        self.is_network()
    }
}
