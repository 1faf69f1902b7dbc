//! Publisher record returned by lookups and cached in storage.

use crate::{BannerInfo, PublisherStatus, Timestamp};
use serde::{Deserialize, Serialize};

/// Everything the client knows about one publisher.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublisherInfo {
    /// Canonical publisher key (a domain or a platform channel identifier).
    pub publisher_key: String,
    /// Verification status reported by the server.
    pub status: PublisherStatus,
    /// Custodial wallet address, when the server disclosed one.
    pub wallet_address: Option<String>,
    /// Banner customization, when the publisher configured one.
    pub banner: Option<BannerInfo>,
    /// When this record was produced.
    pub updated_at: Timestamp,
}

impl PublisherInfo {
    /// A negative record: the service has no entry for this publisher.
    ///
    /// Negative results are cacheable, so repeat lookups of unregistered
    /// publishers stay local until the record goes stale.
    pub fn not_verified(publisher_key: impl Into<String>, now: Timestamp) -> Self {
        Self {
            publisher_key: publisher_key.into(),
            status: PublisherStatus::NotVerified,
            wallet_address: None,
            banner: None,
            updated_at: now,
        }
    }
}
