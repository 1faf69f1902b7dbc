//! Hash prefix derivation for privacy-preserving publisher lookups.
//!
//! Publishers are identified on the wire only by a prefix of the SHA-256
//! digest of their key. Lookup requests carry a fixed two-byte prefix, so
//! many publishers share any value the server sees.

use sha2::{Digest, Sha256};

/// Smallest prefix width allowed in a publisher list, in bytes.
pub const MIN_PREFIX_SIZE: usize = 4;

/// Largest prefix width allowed in a publisher list (a full SHA-256 digest).
pub const MAX_PREFIX_SIZE: usize = 32;

/// Number of digest bytes sent to the server when looking up a publisher.
/// Fixed for every key; the request length must never vary with the key.
pub const QUERY_PREFIX_BYTES: usize = 2;

/// SHA-256 digest of a publisher key.
pub fn hash_publisher_key(publisher_key: &str) -> [u8; 32] {
    Sha256::digest(publisher_key.as_bytes()).into()
}

/// The first `prefix_size` bytes of the key's SHA-256 digest.
///
/// Panics if `prefix_size` exceeds [`MAX_PREFIX_SIZE`].
pub fn hash_prefix(publisher_key: &str, prefix_size: usize) -> Vec<u8> {
    assert!(
        prefix_size <= MAX_PREFIX_SIZE,
        "prefix size must not exceed the digest length"
    );
    hash_publisher_key(publisher_key)[..prefix_size].to_vec()
}

/// Hex-encoded hash prefix, as embedded in lookup URLs.
pub fn hash_prefix_hex(publisher_key: &str, prefix_size: usize) -> String {
    hex::encode(hash_prefix(publisher_key, prefix_size))
}
