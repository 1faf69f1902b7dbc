//! Server publisher fetching with request de-duplication.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};

use credence_protocol::decode_response;
use credence_store::PublisherStore;
use credence_types::{PublisherInfo, Timestamp};

use crate::transport::{UrlLoader, UrlRequest};
use crate::urls;

/// Waiters keyed by publisher key; one entry per in-flight fetch.
type PendingMap = HashMap<String, Vec<oneshot::Sender<Option<PublisherInfo>>>>;

/// Fetches publisher records from the verification service.
///
/// Concurrent `fetch` calls for the same key coalesce into one network
/// request whose result is fanned out to every caller, cloned per waiter.
/// Successful results are written to the store before delivery,
/// best-effort.
#[derive(Clone)]
pub struct ServerPublisherFetcher {
    store: Arc<dyn PublisherStore>,
    loader: Arc<dyn UrlLoader>,
    pending: Arc<Mutex<PendingMap>>,
    server_url: String,
    cache_ttl_secs: u64,
}

impl ServerPublisherFetcher {
    pub fn new(
        store: Arc<dyn PublisherStore>,
        loader: Arc<dyn UrlLoader>,
        server_url: impl Into<String>,
        cache_ttl_secs: u64,
    ) -> Self {
        Self {
            store,
            loader,
            pending: Arc::new(Mutex::new(HashMap::new())),
            server_url: server_url.into(),
            cache_ttl_secs,
        }
    }

    /// Fetch the current record for a publisher key.
    ///
    /// Returns `None` when the server could not be reached or returned an
    /// unusable response. At most one request is in flight per key; callers
    /// arriving while one is pending wait for its result instead of issuing
    /// another.
    pub async fn fetch(&self, publisher_key: &str) -> Option<PublisherInfo> {
        let (tx, rx) = oneshot::channel();

        // Check-then-insert must stay under one lock so two callers cannot
        // both become the requesting party.
        let leader = {
            let mut pending = self.pending.lock().await;
            match pending.get_mut(publisher_key) {
                Some(waiters) => {
                    tracing::debug!(publisher_key, "fetch already in flight, waiting");
                    waiters.push(tx);
                    false
                }
                None => {
                    pending.insert(publisher_key.to_string(), vec![tx]);
                    true
                }
            }
        };

        if leader {
            tracing::debug!(publisher_key, "fetching publisher info");
            let fetcher = self.clone();
            let key = publisher_key.to_string();
            // The request runs in its own task so every waiter is resolved
            // even if this caller's future is dropped.
            tokio::spawn(async move {
                let result = fetcher.fetch_from_server(&key).await;
                fetcher.complete(&key, result).await;
            });
        }

        rx.await.unwrap_or(None)
    }

    async fn fetch_from_server(&self, publisher_key: &str) -> Option<PublisherInfo> {
        // The URL embeds a fixed-size hash prefix and nothing else derived
        // from the key; request length must not vary with the key.
        let url = urls::publisher_info_url(&self.server_url, publisher_key);
        let response = match self.loader.load(UrlRequest::get(url)).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(publisher_key, error = %e, "publisher lookup failed");
                return None;
            }
        };

        self.parse_response(publisher_key, response.status_code, &response.body)
    }

    fn parse_response(
        &self,
        publisher_key: &str,
        status_code: u16,
        body: &[u8],
    ) -> Option<PublisherInfo> {
        if status_code != 200 || body.is_empty() {
            if status_code == 404 {
                // Expected negative: no registered publisher shares this
                // prefix.
                tracing::debug!(publisher_key, "no publisher data for prefix");
            } else {
                tracing::warn!(
                    publisher_key,
                    status_code,
                    "unusable publisher lookup response",
                );
            }
            return None;
        }

        match decode_response(body, publisher_key, Timestamp::now()) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!(publisher_key, error = %e, "malformed publisher lookup response");
                None
            }
        }
    }

    /// Persist the result, then release every waiter registered for `key`.
    async fn complete(&self, publisher_key: &str, result: Option<PublisherInfo>) {
        if let Some(info) = &result {
            // The fetched record is authoritative for this cycle even if
            // persistence fails.
            if let Err(e) = self.store.put_publisher_info(info).await {
                tracing::warn!(publisher_key, error = %e, "failed to cache publisher record");
            }
        }

        let waiters = {
            let mut pending = self.pending.lock().await;
            pending.remove(publisher_key).unwrap_or_default()
        };
        for waiter in waiters {
            // A closed receiver only means that caller went away.
            let _ = waiter.send(result.clone());
        }
    }

    /// Whether a cached record is stale relative to the configured TTL.
    pub fn is_expired(&self, info: &PublisherInfo) -> bool {
        self.is_expired_at(info, Timestamp::now())
    }

    /// Freshness check against an explicit clock.
    ///
    /// A record stamped in the future signals a corrupt timestamp; it is
    /// treated as expired so one bad write cannot pin a stale record
    /// forever.
    pub fn is_expired_at(&self, info: &PublisherInfo, now: Timestamp) -> bool {
        if info.updated_at > now {
            tracing::warn!(
                publisher_key = %info.publisher_key,
                updated_at = %info.updated_at,
                "cached publisher record has a future timestamp",
            );
            return true;
        }
        info.updated_at.elapsed_since(now) > self.cache_ttl_secs
    }
}
