//! Channel response decoding.
//!
//! A lookup response is a protobuf [`ChannelResponseList`] that has been
//! zlib-compressed and then length-padded: a 4-byte big-endian header gives
//! the true payload length, and everything past it is padding so response
//! sizes do not reveal which prefix was queried. Decoding strips the
//! padding, decompresses through a bounded buffer, and extracts the entry
//! for the requested publisher.

use prost::Message;

use credence_messages::{ChannelResponseList, SiteBannerDetails, WalletConnectedState};
use credence_types::{BannerInfo, PublisherInfo, PublisherStatus, Timestamp};

use crate::stream_decoder::{DecodeStatus, StreamDecoder};
use crate::ProtocolError;

/// Working buffer size for decompressing channel responses.
pub const RESPONSE_BUFFER_SIZE: usize = 32 * 1024;

/// Strip the length-padding envelope from a response body.
///
/// Returns the true payload as a subslice of the input; padding bytes are
/// never copied or inspected.
pub fn remove_padding(padded: &[u8]) -> Result<&[u8], ProtocolError> {
    if padded.len() < 4 {
        return Err(ProtocolError::MissingLengthHeader);
    }
    let (header, body) = padded.split_at(4);
    let declared = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
    body.get(..declared).ok_or(ProtocolError::PayloadTooShort {
        declared,
        actual: body.len(),
    })
}

/// Decode a padded, compressed channel response into a publisher record.
///
/// Every malformation fails closed. A well-formed response without an entry
/// for `expected_key` is not an error: the server is stating that no such
/// publisher is registered, so a `NotVerified` record is synthesized and is
/// cacheable like any positive result.
pub fn decode_response(
    raw: &[u8],
    expected_key: &str,
    now: Timestamp,
) -> Result<PublisherInfo, ProtocolError> {
    let payload = remove_padding(raw)?;
    let decompressed = decompress_payload(payload)?;
    let message = ChannelResponseList::decode(decompressed.as_slice())
        .map_err(|e| ProtocolError::InvalidMessage(e.to_string()))?;

    Ok(extract_record(&message, expected_key, now)
        .unwrap_or_else(|| PublisherInfo::not_verified(expected_key, now)))
}

fn decompress_payload(compressed: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let mut decoder = StreamDecoder::new(RESPONSE_BUFFER_SIZE);
    let mut output = Vec::new();
    match decoder.decode(compressed, |chunk| output.extend_from_slice(chunk))? {
        DecodeStatus::Done => Ok(output),
        DecodeStatus::InputRequired => Err(ProtocolError::TruncatedStream),
    }
}

fn extract_record(
    message: &ChannelResponseList,
    expected_key: &str,
    now: Timestamp,
) -> Option<PublisherInfo> {
    let entry = message
        .channel_responses
        .iter()
        .find(|entry| entry.channel_identifier == expected_key)?;

    Some(PublisherInfo {
        publisher_key: entry.channel_identifier.clone(),
        status: status_from_wire(entry.wallet_connected_state),
        wallet_address: non_empty(&entry.wallet_address),
        banner: entry.site_banner_details.as_ref().map(banner_from_message),
        updated_at: now,
    })
}

/// Map the wire account state onto a publisher status.
///
/// Unknown values (a server newer than this client) collapse to
/// `NotVerified` rather than failing the whole response.
fn status_from_wire(state: i32) -> PublisherStatus {
    match WalletConnectedState::try_from(state) {
        Ok(WalletConnectedState::Kyc) => PublisherStatus::Verified,
        Ok(WalletConnectedState::NoKyc) => PublisherStatus::Connected,
        _ => PublisherStatus::NotVerified,
    }
}

fn banner_from_message(details: &SiteBannerDetails) -> BannerInfo {
    let mut links = std::collections::BTreeMap::new();
    if let Some(social) = &details.social_links {
        for (platform, url) in [
            ("youtube", &social.youtube),
            ("twitter", &social.twitter),
            ("twitch", &social.twitch),
        ] {
            if !url.is_empty() {
                links.insert(platform.to_string(), url.clone());
            }
        }
    }

    BannerInfo {
        title: details.title.clone(),
        description: details.description.clone(),
        background: non_empty(&details.background_url),
        logo: non_empty(&details.logo_url),
        amounts: details.donation_amounts.clone(),
        links,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_messages::{ChannelResponse, SocialLinks};
    use std::io::Write;

    const NOW: Timestamp = Timestamp::EPOCH;

    fn compress(data: &[u8]) -> Vec<u8> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn envelope_raw(payload: &[u8], padding: usize) -> Vec<u8> {
        let mut body = Vec::with_capacity(4 + payload.len() + padding);
        body.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        body.extend_from_slice(payload);
        body.extend(std::iter::repeat(0x50).take(padding));
        body
    }

    fn envelope(message: &ChannelResponseList, padding: usize) -> Vec<u8> {
        envelope_raw(&compress(&message.encode_to_vec()), padding)
    }

    fn response_entry(key: &str, state: WalletConnectedState) -> ChannelResponse {
        ChannelResponse {
            channel_identifier: key.into(),
            wallet_connected_state: state as i32,
            wallet_address: "wallet-address-1".into(),
            site_banner_details: None,
        }
    }

    #[test]
    fn verified_entry_decodes() {
        let message = ChannelResponseList {
            channel_responses: vec![ChannelResponse {
                site_banner_details: Some(SiteBannerDetails {
                    title: "Support my work".into(),
                    description: "Thanks for reading".into(),
                    background_url: String::new(),
                    logo_url: "logo.png".into(),
                    donation_amounts: vec![1.0, 5.0, 10.0],
                    social_links: Some(SocialLinks {
                        youtube: "https://youtube.example/c".into(),
                        twitter: String::new(),
                        twitch: String::new(),
                    }),
                }),
                ..response_entry("abc.com", WalletConnectedState::Kyc)
            }],
        };

        let info = decode_response(&envelope(&message, 64), "abc.com", NOW).unwrap();
        assert_eq!(info.publisher_key, "abc.com");
        assert_eq!(info.status, PublisherStatus::Verified);
        assert_eq!(info.wallet_address.as_deref(), Some("wallet-address-1"));
        assert_eq!(info.updated_at, NOW);

        let banner = info.banner.unwrap();
        assert_eq!(banner.title, "Support my work");
        assert_eq!(banner.background, None);
        assert_eq!(banner.logo.as_deref(), Some("logo.png"));
        assert_eq!(banner.amounts, vec![1.0, 5.0, 10.0]);
        assert_eq!(banner.links.len(), 1);
        assert_eq!(
            banner.links.get("youtube").map(String::as_str),
            Some("https://youtube.example/c")
        );
    }

    #[test]
    fn account_states_map_to_statuses() {
        for (state, expected) in [
            (WalletConnectedState::Kyc as i32, PublisherStatus::Verified),
            (WalletConnectedState::NoKyc as i32, PublisherStatus::Connected),
            (WalletConnectedState::Unspecified as i32, PublisherStatus::NotVerified),
            (77, PublisherStatus::NotVerified),
        ] {
            let message = ChannelResponseList {
                channel_responses: vec![ChannelResponse {
                    wallet_connected_state: state,
                    ..response_entry("abc.com", WalletConnectedState::Unspecified)
                }],
            };
            let info = decode_response(&envelope(&message, 16), "abc.com", NOW).unwrap();
            assert_eq!(info.status, expected, "state {state}");
        }
    }

    #[test]
    fn missing_entry_synthesizes_not_verified() {
        let message = ChannelResponseList {
            channel_responses: vec![response_entry("other.com", WalletConnectedState::Kyc)],
        };
        let info = decode_response(&envelope(&message, 32), "abc.com", NOW).unwrap();
        assert_eq!(info.publisher_key, "abc.com");
        assert_eq!(info.status, PublisherStatus::NotVerified);
        assert!(info.wallet_address.is_none());
        assert_eq!(info.updated_at, NOW);
    }

    #[test]
    fn padding_amount_does_not_change_the_result() {
        let message = ChannelResponseList {
            channel_responses: vec![response_entry("abc.com", WalletConnectedState::NoKyc)],
        };
        let bare = decode_response(&envelope(&message, 0), "abc.com", NOW).unwrap();
        let padded = decode_response(&envelope(&message, 4096), "abc.com", NOW).unwrap();
        assert_eq!(bare, padded);
    }

    #[test]
    fn short_header_is_rejected() {
        for raw in [&[][..], &[0x00][..], &[0x00, 0x00, 0x01][..]] {
            let err = remove_padding(raw).unwrap_err();
            assert!(matches!(err, ProtocolError::MissingLengthHeader));
        }
    }

    #[test]
    fn declared_length_beyond_body_is_rejected() {
        let mut raw = 100u32.to_be_bytes().to_vec();
        raw.extend_from_slice(&[0xAA; 10]);
        let err = remove_padding(&raw).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::PayloadTooShort {
                declared: 100,
                actual: 10
            }
        ));
    }

    #[test]
    fn zero_length_payload_is_rejected() {
        let raw = envelope_raw(&[], 32);
        let err = decode_response(&raw, "abc.com", NOW).unwrap_err();
        assert!(matches!(err, ProtocolError::EmptyInput));
    }

    #[test]
    fn truncated_compressed_stream_is_rejected() {
        let message = ChannelResponseList {
            channel_responses: vec![response_entry("abc.com", WalletConnectedState::Kyc)],
        };
        let compressed = compress(&message.encode_to_vec());
        let cut = &compressed[..compressed.len() / 2];
        let err = decode_response(&envelope_raw(cut, 16), "abc.com", NOW).unwrap_err();
        assert!(matches!(err, ProtocolError::TruncatedStream));
    }

    #[test]
    fn non_zlib_payload_is_rejected() {
        let raw = envelope_raw(b"this is not compressed", 8);
        let err = decode_response(&raw, "abc.com", NOW).unwrap_err();
        assert!(matches!(err, ProtocolError::Decompress(_)));
    }

    #[test]
    fn undecodable_protobuf_is_rejected() {
        // Valid zlib stream around a truncated protobuf message.
        let raw = envelope_raw(&compress(&[0x0A]), 8);
        let err = decode_response(&raw, "abc.com", NOW).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidMessage(_)));
    }
}
