//! # Survey Admin Core
//!
//! Data model and response normalization for the Survey Admin REST API.
//!
//! The backend answers with several payload shapes for the same resource
//! (bare arrays, `{items,total}`, `{data:{items,total}}`, `{data:[...]}`) and
//! spells the same field in several ways (`ID`/`id`, `CreatedAt`/`created_at`).
//! This crate turns those payloads into one canonical record per entity kind.
//!
//! ## Core Concepts
//!
//! - **Envelope**: which of the known wrapper shapes a response body has
//! - **Normalizer**: per-kind conversion of raw items into records
//! - **Paged Result**: normalized items plus counts
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use survey_admin_core::normalize::normalize_merchants;
//!
//! let body = json!({"data": {"items": [{"ID": 3, "merchant_name": "Corner Shop", "tags": [{"id": 5}, 7]}]}});
//! let page = normalize_merchants(&body);
//!
//! assert_eq!(page.total, 1);
//! assert_eq!(page.items[0].name, "Corner Shop");
//! assert_eq!(page.items[0].tags, vec![5, 7]);
//! ```

pub mod date;
pub mod envelope;
pub mod geocode;
pub mod normalize;
pub mod requests;
pub mod scope;
pub mod types;

// Re-export commonly used types
pub use envelope::Envelope;
pub use normalize::SkipReason;
pub use types::{MerchantRecord, PagedResult, Permission, Role, RoleRef, TagRecord, UserRecord};
