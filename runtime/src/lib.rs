//! # Survey Admin Runtime
//!
//! Execution helpers shared by the Survey Admin API client.
//!
//! ## Core Components
//!
//! - **Retry**: bounded exponential-backoff retry for async operations,
//!   restricted to failures the caller classifies as retryable
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use survey_admin_runtime::retry::{with_retry, Retryable};
//!
//! #[derive(Debug)]
//! struct Offline;
//!
//! impl std::fmt::Display for Offline {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         f.write_str("offline")
//!     }
//! }
//!
//! impl Retryable for Offline {
//!     fn is_network_failure(&self) -> bool {
//!         true
//!     }
//! }
//!
//! # async fn example() -> Result<u32, Offline> {
//! let value = with_retry(|| async { Ok::<_, Offline>(7) }, 3, Duration::from_millis(10)).await?;
//! assert_eq!(value, 7);
//! # Ok(value)
//! # }
//! ```

/// Retry logic with exponential backoff
pub mod retry;

pub use retry::{retry_with_predicate, with_retry, RetryPolicy, Retryable};
