use thiserror::Error;

use credence_protocol::ProtocolError;
use credence_store::StoreError;

#[derive(Debug, Error)]
pub enum PublisherError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server returned HTTP {status}")]
    Http { status: u16 },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("configuration error: {0}")]
    Config(String),
}
