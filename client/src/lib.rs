//! # Survey Admin Client
//!
//! Async client for the Survey Admin REST API.
//!
//! ## Layers
//!
//! - [`TokenStore`]: bearer credential over injected [`CredentialStorage`]
//! - [`Pipeline`]: attaches the token to requests; on 401/403 clears it and
//!   navigates to the login page
//! - [`Transport`]: sends requests ([`ReqwestTransport`] in production,
//!   [`mocks::MockTransport`] in tests)
//! - [`AdminClient`]: per-entity operations returning normalized records
//!   or a uniform [`ApiError`]
//!
//! ## Example
//!
//! ```no_run
//! use survey_admin_client::{AdminClient, ClientConfig};
//! use survey_admin_core::requests::UserListParams;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AdminClient::from_config(&ClientConfig::from_env())?;
//! client.login("admin", "secret").await?;
//!
//! let users = client.fetch_users(&UserListParams::default()).await?;
//! for user in &users.items {
//!     println!("{} {}", user.id, user.full_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod mocks;
pub mod pipeline;
pub mod resources;
pub mod storage;
pub mod token_store;
pub mod transport;

pub use client::AdminClient;
pub use config::ClientConfig;
pub use error::{ApiError, ErrorCategory, FailedResponse, Result, TransportError};
pub use pipeline::{LoggingNavigator, Navigator, Pipeline};
pub use resources::LoginOutcome;
pub use storage::{CredentialStorage, FileStorage, MemoryStorage, StorageError};
pub use token_store::TokenStore;
pub use transport::{ApiRequest, RawResponse, ReqwestTransport, ResponseBody, ResponseKind, Transport};
