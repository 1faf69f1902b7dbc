use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed protobuf message: {0}")]
    InvalidMessage(String),

    #[error("prefix size out of range: {0}")]
    InvalidPrefixSize(usize),

    #[error("invalid prefix data size")]
    InvalidSize,

    #[error("unknown compression type: {0}")]
    UnknownCompression(i32),

    #[error("delta prefix overflow at entry {0}")]
    DeltaOverflow(usize),

    #[error("response shorter than its length header")]
    MissingLengthHeader,

    #[error("padded payload too short: declared {declared}, available {actual}")]
    PayloadTooShort { declared: usize, actual: usize },

    #[error("empty input")]
    EmptyInput,

    #[error("decompression failed: {0}")]
    Decompress(String),

    #[error("compressed stream ended before completion")]
    TruncatedStream,
}
