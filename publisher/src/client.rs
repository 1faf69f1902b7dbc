//! Cache-first publisher lookups and prefix list management.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use credence_protocol::{hash_publisher_key, PrefixList};
use credence_store::PublisherStore;
use credence_types::{PublisherInfo, Timestamp};

use crate::fetcher::ServerPublisherFetcher;
use crate::transport::{HttpLoader, UrlLoader, UrlRequest};
use crate::urls;
use crate::{ClientConfig, PublisherError};

/// High-level lookup interface combining the store, the fetcher, and the
/// locally installed prefix list.
#[derive(Clone)]
pub struct PublisherClient {
    store: Arc<dyn PublisherStore>,
    loader: Arc<dyn UrlLoader>,
    fetcher: ServerPublisherFetcher,
    prefix_list: Arc<RwLock<Option<Arc<PrefixList>>>>,
    config: ClientConfig,
}

impl PublisherClient {
    /// Build a client over explicit store and loader implementations.
    pub fn new(
        store: Arc<dyn PublisherStore>,
        loader: Arc<dyn UrlLoader>,
        config: ClientConfig,
    ) -> Self {
        let fetcher = ServerPublisherFetcher::new(
            store.clone(),
            loader.clone(),
            config.server_url.clone(),
            config.cache_ttl_secs,
        );
        Self {
            store,
            loader,
            fetcher,
            prefix_list: Arc::new(RwLock::new(None)),
            config,
        }
    }

    /// Build a client with the bundled reqwest loader.
    pub fn with_http_loader(store: Arc<dyn PublisherStore>, config: ClientConfig) -> Self {
        let loader = Arc::new(HttpLoader::new(Duration::from_secs(
            config.request_timeout_secs,
        )));
        Self::new(store, loader, config)
    }

    /// Look up a publisher, serving from cache when fresh.
    ///
    /// Order: fresh cached record, then the local prefix list gate (when a
    /// list is installed, a key whose prefix is absent resolves to
    /// `NotVerified` without touching the network), then a server fetch.
    /// A cache read failure only loses the shortcut; the lookup proceeds.
    pub async fn get_publisher_info(&self, publisher_key: &str) -> Option<PublisherInfo> {
        match self.store.get_publisher_info(publisher_key).await {
            Ok(Some(info)) if !self.fetcher.is_expired(&info) => {
                tracing::debug!(publisher_key, "serving publisher record from cache");
                return Some(info);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(publisher_key, error = %e, "publisher cache read failed");
            }
        }

        if let Some(list) = self.current_prefix_list().await {
            if !list.contains_hash(&hash_publisher_key(publisher_key)) {
                tracing::debug!(publisher_key, "publisher not in prefix list");
                return Some(PublisherInfo::not_verified(publisher_key, Timestamp::now()));
            }
        }

        self.fetcher.fetch(publisher_key).await
    }

    /// Download and install the current publisher prefix list.
    ///
    /// Returns the number of entries installed. The shared list is swapped
    /// atomically; lookups in flight keep the list they started with.
    pub async fn refresh_prefix_list(&self) -> Result<usize, PublisherError> {
        let url = urls::publisher_list_url(&self.config.server_url);
        let response = self.loader.load(UrlRequest::get(url)).await?;
        if !response.is_success() {
            return Err(PublisherError::Http {
                status: response.status_code,
            });
        }
        self.install_prefix_list(&response.body).await
    }

    /// Install a prefix list from caller-supplied bytes (e.g. shipped with
    /// the embedder out of band).
    pub async fn install_prefix_list(&self, contents: &[u8]) -> Result<usize, PublisherError> {
        let list = Arc::new(PrefixList::parse(contents)?);
        let entries = list.len();
        *self.prefix_list.write().await = Some(list);
        tracing::info!(entries, "installed publisher prefix list");
        Ok(entries)
    }

    /// Number of entries in the installed prefix list, if any.
    pub async fn prefix_list_len(&self) -> Option<usize> {
        self.current_prefix_list().await.map(|list| list.len())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Snapshot of the installed prefix list, if any.
    pub async fn current_prefix_list(&self) -> Option<Arc<PrefixList>> {
        self.prefix_list.read().await.clone()
    }
}
