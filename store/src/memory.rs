//! In-memory publisher store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use credence_types::PublisherInfo;

use crate::{PublisherStore, StoreError};

/// Keeps records in a map guarded by a `tokio::sync::RwLock`. Contents are
/// lost on drop; intended for tests and one-shot tools.
#[derive(Default)]
pub struct MemoryPublisherStore {
    records: RwLock<HashMap<String, PublisherInfo>>,
}

impl MemoryPublisherStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PublisherStore for MemoryPublisherStore {
    async fn get_publisher_info(
        &self,
        publisher_key: &str,
    ) -> Result<Option<PublisherInfo>, StoreError> {
        Ok(self.records.read().await.get(publisher_key).cloned())
    }

    async fn put_publisher_info(&self, info: &PublisherInfo) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(info.publisher_key.clone(), info.clone());
        Ok(())
    }
}
