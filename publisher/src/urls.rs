//! Endpoint construction for the verification service.

use credence_protocol::{hash_prefix_hex, QUERY_PREFIX_BYTES};

/// URL of the bulk publisher prefix list.
pub fn publisher_list_url(base: &str) -> String {
    format!("{}/publishers", base.trim_end_matches('/'))
}

/// Lookup URL for a publisher key.
///
/// The hex-encoded hash prefix is the only part of the request that varies
/// between keys, and its length is fixed. Nothing else derived from the key
/// may be added to the request, or response sizes could be correlated with
/// key identity.
pub fn publisher_info_url(base: &str, publisher_key: &str) -> String {
    format!(
        "{}/channel/{}",
        base.trim_end_matches('/'),
        hash_prefix_hex(publisher_key, QUERY_PREFIX_BYTES)
    )
}
