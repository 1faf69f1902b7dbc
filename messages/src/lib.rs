//! Wire message types exchanged with the publisher verification service.
//!
//! Two protobuf formats: the publisher prefix list (bulk download of hash
//! prefixes for all registered publishers) and the channel response list
//! (per-prefix lookup results). Messages are hand-derived with `prost`;
//! tag numbers are part of the server contract and must not change.

/// Bulk list of hash prefixes for all registered publishers.
///
/// The prefix data arrives either verbatim in `prefixes` or as a
/// delta-encoded integer list in `deltas` (4-byte prefixes only).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PublisherList {
    /// Size in bytes of each hash prefix, 4 through 32.
    #[prost(uint32, tag = "1")]
    pub prefix_size: u32,
    #[prost(enumeration = "CompressionType", tag = "2")]
    pub compression_type: i32,
    /// Expected size of the expanded prefix buffer; zero is invalid.
    #[prost(uint64, tag = "3")]
    pub uncompressed_size: u64,
    /// Concatenated fixed-width prefixes, ascending (no compression).
    #[prost(bytes, tag = "4")]
    pub prefixes: Vec<u8>,
    /// Differences between consecutive 32-bit prefixes (delta compression).
    #[prost(uint32, repeated, tag = "5")]
    pub deltas: Vec<u32>,
}

/// How the prefix data in a [`PublisherList`] is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CompressionType {
    NoCompression = 0,
    DeltaCompression = 1,
}

/// Lookup results for every registered publisher sharing a queried hash
/// prefix.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChannelResponseList {
    #[prost(message, repeated, tag = "1")]
    pub channel_responses: Vec<ChannelResponse>,
}

/// Verification details for a single publisher.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChannelResponse {
    /// Canonical publisher key this entry describes.
    #[prost(string, tag = "1")]
    pub channel_identifier: String,
    #[prost(enumeration = "WalletConnectedState", tag = "2")]
    pub wallet_connected_state: i32,
    #[prost(string, tag = "3")]
    pub wallet_address: String,
    #[prost(message, optional, tag = "4")]
    pub site_banner_details: Option<SiteBannerDetails>,
}

/// State of the custodial account attached to a publisher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum WalletConnectedState {
    Unspecified = 0,
    /// Account attached, identity checks not completed.
    NoKyc = 1,
    /// Account attached and identity verified.
    Kyc = 2,
}

/// Banner customization configured by a publisher.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SiteBannerDetails {
    #[prost(string, tag = "1")]
    pub title: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(string, tag = "3")]
    pub background_url: String,
    #[prost(string, tag = "4")]
    pub logo_url: String,
    #[prost(double, repeated, tag = "5")]
    pub donation_amounts: Vec<f64>,
    #[prost(message, optional, tag = "6")]
    pub social_links: Option<SocialLinks>,
}

/// Social media profiles linked from a publisher banner.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SocialLinks {
    #[prost(string, tag = "1")]
    pub youtube: String,
    #[prost(string, tag = "2")]
    pub twitter: String,
    #[prost(string, tag = "3")]
    pub twitch: String,
}
