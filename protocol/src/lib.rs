//! Wire codecs for the publisher verification protocol.
//!
//! Three layers: hash-prefix derivation (`prefix`), the bulk publisher
//! prefix list (`prefix_list`), and the padded per-prefix channel response
//! (`channel`) together with its streaming decompressor (`stream_decoder`).

pub mod channel;
pub mod error;
pub mod prefix;
pub mod prefix_list;
pub mod stream_decoder;

pub use channel::{decode_response, remove_padding, RESPONSE_BUFFER_SIZE};
pub use error::ProtocolError;
pub use prefix::{
    hash_prefix, hash_prefix_hex, hash_publisher_key, MAX_PREFIX_SIZE, MIN_PREFIX_SIZE,
    QUERY_PREFIX_BYTES,
};
pub use prefix_list::PrefixList;
pub use stream_decoder::{DecodeStatus, StreamDecoder};
