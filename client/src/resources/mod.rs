//! Resource operations, one module per entity.
//!
//! Each module adds methods to [`AdminClient`](crate::AdminClient). Listing
//! and lookup operations run the body through the normalizer; write
//! operations hand back the server payload unmodified.

pub mod auth;
pub mod geocode;
pub mod merchants;
pub mod roles;
pub mod subtasks;
pub mod tags;
pub mod tasks;
pub mod users;

pub use auth::LoginOutcome;
