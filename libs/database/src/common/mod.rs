//! Error and retry helpers shared across the storage layer

pub mod error;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
#[cfg(feature = "postgres")]
pub use error::{is_unavailable, is_unique_violation};
pub use retry::{RetryConfig, retry_with_backoff};
