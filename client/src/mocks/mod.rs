//! Mock implementations for testing.
//!
//! In-memory stand-ins for the transport, storage and navigation seams, for
//! use in unit and integration tests.

pub mod navigator;
pub mod storage;
pub mod transport;

pub use navigator::RecordingNavigator;
pub use storage::FailingStorage;
pub use transport::MockTransport;
