//! Publisher verification orchestration.
//!
//! [`ServerPublisherFetcher`] turns publisher keys into records via the
//! privacy-preserving lookup protocol, coalescing concurrent requests for
//! the same key. [`PublisherClient`] layers the cache-first policy and the
//! local prefix list on top. Storage and transport are pluggable through
//! the [`credence_store::PublisherStore`] and [`UrlLoader`] traits.

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod transport;
pub mod urls;

pub use client::PublisherClient;
pub use config::ClientConfig;
pub use error::PublisherError;
pub use fetcher::ServerPublisherFetcher;
pub use transport::{HttpLoader, UrlLoader, UrlMethod, UrlRequest, UrlResponse};
