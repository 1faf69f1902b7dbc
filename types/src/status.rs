//! Verification status of a publisher.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The verification status of a publisher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublisherStatus {
    /// Not registered with the verification service.
    #[default]
    NotVerified,
    /// Registered with a custodial account attached, identity checks pending.
    Connected,
    /// Registered with a fully verified custodial account.
    Verified,
}

impl PublisherStatus {
    /// Whether a custodial account is attached (any registered state).
    pub fn has_wallet(&self) -> bool {
        matches!(self, Self::Connected | Self::Verified)
    }

    /// Whether identity verification is complete.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotVerified => "not_verified",
            Self::Connected => "connected",
            Self::Verified => "verified",
        }
    }
}

impl fmt::Display for PublisherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
