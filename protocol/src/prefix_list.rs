//! Publisher prefix list parsing and membership checks.
//!
//! The server publishes the hash prefixes of every registered publisher as
//! one protobuf message, either verbatim or delta-compressed. A parsed list
//! is immutable; lookups binary-search the fixed-width entries.

use std::cmp::Ordering;

use prost::Message;

use credence_messages::{CompressionType, PublisherList};

use crate::prefix::{hash_publisher_key, MAX_PREFIX_SIZE, MIN_PREFIX_SIZE};
use crate::ProtocolError;

/// Width of a delta-compressed prefix entry.
const DELTA_PREFIX_SIZE: usize = std::mem::size_of::<u32>();

/// An immutable list of fixed-width publisher hash prefixes in ascending
/// order.
#[derive(Debug)]
pub struct PrefixList {
    prefixes: Vec<u8>,
    prefix_size: usize,
}

impl PrefixList {
    /// Parse an encoded [`PublisherList`] message.
    ///
    /// The prefix buffer is taken verbatim for uncompressed lists and
    /// reconstructed by running sum for delta-compressed ones. Delta
    /// compression is only defined for 4-byte prefixes.
    pub fn parse(contents: &[u8]) -> Result<Self, ProtocolError> {
        let message = PublisherList::decode(contents)
            .map_err(|e| ProtocolError::InvalidMessage(e.to_string()))?;

        let prefix_size = message.prefix_size as usize;
        if !(MIN_PREFIX_SIZE..=MAX_PREFIX_SIZE).contains(&prefix_size) {
            return Err(ProtocolError::InvalidPrefixSize(prefix_size));
        }

        if message.uncompressed_size == 0 {
            return Err(ProtocolError::InvalidSize);
        }

        let compression = CompressionType::try_from(message.compression_type)
            .map_err(|_| ProtocolError::UnknownCompression(message.compression_type))?;

        let prefixes = match compression {
            CompressionType::NoCompression => {
                if message.prefixes.len() % prefix_size != 0 {
                    return Err(ProtocolError::InvalidSize);
                }
                message.prefixes
            }
            CompressionType::DeltaCompression => {
                if prefix_size != DELTA_PREFIX_SIZE {
                    return Err(ProtocolError::InvalidPrefixSize(prefix_size));
                }
                expand_delta_list(&message.deltas)?
            }
        };

        Ok(Self {
            prefixes,
            prefix_size,
        })
    }

    /// Width of each entry in bytes.
    pub fn prefix_size(&self) -> usize {
        self.prefix_size
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.prefixes.len() / self.prefix_size
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// The raw concatenated prefix buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.prefixes
    }

    /// Whether the leading `prefix_size` bytes of `hash` appear in the list.
    pub fn contains_hash(&self, hash: &[u8]) -> bool {
        if hash.len() < self.prefix_size {
            return false;
        }
        let needle = &hash[..self.prefix_size];

        let mut lo = 0;
        let mut hi = self.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let start = mid * self.prefix_size;
            let entry = &self.prefixes[start..start + self.prefix_size];
            match entry.cmp(needle) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return true,
            }
        }
        false
    }

    /// Whether the publisher key's hash prefix appears in the list.
    pub fn contains_key(&self, publisher_key: &str) -> bool {
        self.contains_hash(&hash_publisher_key(publisher_key))
    }
}

/// Expand a delta-encoded list into concatenated big-endian u32 prefixes.
///
/// Each output value is the running sum of the deltas up to that entry.
/// A sum exceeding u32 range means the list is corrupt; wrapping would
/// silently break the ascending-order invariant.
fn expand_delta_list(deltas: &[u32]) -> Result<Vec<u8>, ProtocolError> {
    let mut output = Vec::with_capacity(deltas.len() * DELTA_PREFIX_SIZE);
    let mut value: u32 = 0;
    for (index, delta) in deltas.iter().enumerate() {
        value = value
            .checked_add(*delta)
            .ok_or(ProtocolError::DeltaOverflow(index))?;
        output.extend_from_slice(&value.to_be_bytes());
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix::hash_prefix;

    fn encode(message: &PublisherList) -> Vec<u8> {
        message.encode_to_vec()
    }

    fn uncompressed(prefix_size: u32, prefixes: Vec<u8>) -> PublisherList {
        PublisherList {
            prefix_size,
            compression_type: CompressionType::NoCompression as i32,
            uncompressed_size: prefixes.len().max(1) as u64,
            prefixes,
            deltas: Vec::new(),
        }
    }

    fn delta(deltas: Vec<u32>) -> PublisherList {
        PublisherList {
            prefix_size: 4,
            compression_type: CompressionType::DeltaCompression as i32,
            uncompressed_size: (deltas.len() * 4).max(1) as u64,
            prefixes: Vec::new(),
            deltas,
        }
    }

    #[test]
    fn undecodable_message_is_rejected() {
        // A lone field-1 varint key with no value.
        let err = PrefixList::parse(&[0x08]).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidMessage(_)));
    }

    #[test]
    fn prefix_size_bounds_are_enforced() {
        let err = PrefixList::parse(&encode(&uncompressed(3, vec![0; 3]))).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidPrefixSize(3)));

        let err = PrefixList::parse(&encode(&uncompressed(33, vec![0; 33]))).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidPrefixSize(33)));

        assert!(PrefixList::parse(&encode(&uncompressed(4, vec![0; 8]))).is_ok());
        assert!(PrefixList::parse(&encode(&uncompressed(32, vec![0; 64]))).is_ok());
    }

    #[test]
    fn zero_uncompressed_size_is_rejected() {
        let mut message = uncompressed(4, vec![0; 8]);
        message.uncompressed_size = 0;
        let err = PrefixList::parse(&encode(&message)).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidSize));
    }

    #[test]
    fn misaligned_prefix_buffer_is_rejected() {
        let err = PrefixList::parse(&encode(&uncompressed(4, vec![0; 6]))).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidSize));
    }

    #[test]
    fn unknown_compression_type_is_rejected() {
        let mut message = uncompressed(4, vec![0; 8]);
        message.compression_type = 7;
        let err = PrefixList::parse(&encode(&message)).unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownCompression(7)));
    }

    #[test]
    fn delta_compression_requires_four_byte_prefixes() {
        let mut message = delta(vec![1, 2, 3]);
        message.prefix_size = 8;
        let err = PrefixList::parse(&encode(&message)).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidPrefixSize(8)));
    }

    #[test]
    fn delta_expansion_is_a_running_sum() {
        let list = PrefixList::parse(&encode(&delta(vec![0x10, 0x10, 0x05]))).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(
            list.as_bytes(),
            [
                0x00, 0x00, 0x00, 0x10, //
                0x00, 0x00, 0x00, 0x20, //
                0x00, 0x00, 0x00, 0x25,
            ]
        );
    }

    #[test]
    fn delta_overflow_is_surfaced() {
        let err = PrefixList::parse(&encode(&delta(vec![u32::MAX, 1]))).unwrap_err();
        assert!(matches!(err, ProtocolError::DeltaOverflow(1)));
    }

    #[test]
    fn empty_prefix_buffer_parses_as_empty_list() {
        let list = PrefixList::parse(&encode(&uncompressed(4, Vec::new()))).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(!list.contains_hash(&[0, 0, 0, 0]));
    }

    #[test]
    fn membership_by_hash() {
        let entries: [[u8; 4]; 4] = [[0, 0, 0, 1], [0, 0, 2, 0], [0, 3, 0, 0], [4, 0, 0, 0]];
        let list = PrefixList::parse(&encode(&uncompressed(4, entries.concat()))).unwrap();
        for entry in &entries {
            assert!(list.contains_hash(entry));
        }
        assert!(!list.contains_hash(&[0, 0, 0, 0]));
        assert!(!list.contains_hash(&[0, 0, 3, 0]));
        assert!(!list.contains_hash(&[9, 9, 9, 9]));
        // Longer hashes match on their leading bytes.
        assert!(list.contains_hash(&[0, 0, 2, 0, 0xAA, 0xBB]));
        // Shorter hashes never match.
        assert!(!list.contains_hash(&[0, 0]));
    }

    #[test]
    fn membership_by_publisher_key() {
        let mut entries = vec![
            hash_prefix("alpha.example", 4),
            hash_prefix("beta.example", 4),
            hash_prefix("creator.example", 4),
        ];
        entries.sort();
        let list = PrefixList::parse(&encode(&uncompressed(4, entries.concat()))).unwrap();
        assert!(list.contains_key("alpha.example"));
        assert!(list.contains_key("beta.example"));
        assert!(list.contains_key("creator.example"));
        assert!(!list.contains_key("unlisted.example"));
    }
}
