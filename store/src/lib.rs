//! Abstract storage for cached publisher records.
//!
//! Embedders bring their own persistence (a browser profile database, a
//! file, a test double). The rest of the workspace depends only on the
//! [`PublisherStore`] trait; [`MemoryPublisherStore`] ships as the
//! reference backend for tests and the CLI.

pub mod error;
pub mod memory;

pub use error::StoreError;
pub use memory::MemoryPublisherStore;

use async_trait::async_trait;
use credence_types::PublisherInfo;

/// Storage for publisher lookup results.
///
/// Writes are best-effort from the caller's perspective: a failed put is
/// logged upstream and never blocks delivering the result. Retention and
/// eviction policy belong to the backend.
#[async_trait]
pub trait PublisherStore: Send + Sync {
    /// Fetch the cached record for a publisher key, if any.
    async fn get_publisher_info(&self, publisher_key: &str)
        -> Result<Option<PublisherInfo>, StoreError>;

    /// Insert or replace the cached record for `info.publisher_key`.
    async fn put_publisher_info(&self, info: &PublisherInfo) -> Result<(), StoreError>;
}
