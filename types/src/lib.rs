//! Fundamental types for the Credence publisher verification client.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: publisher records, verification statuses, banner metadata, and
//! timestamps.

pub mod banner;
pub mod record;
pub mod status;
pub mod time;

pub use banner::BannerInfo;
pub use record::PublisherInfo;
pub use status::PublisherStatus;
pub use time::Timestamp;
