//! Banner customization attached to registered publishers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Custom banner content a publisher has configured on the verification
/// service, displayed when prompting the user for a contribution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BannerInfo {
    pub title: String,
    pub description: String,
    /// Background image URL, absent when the publisher kept the default.
    pub background: Option<String>,
    /// Logo image URL, absent when the publisher kept the default.
    pub logo: Option<String>,
    /// Suggested contribution amounts.
    pub amounts: Vec<f64>,
    /// Social media links keyed by platform name.
    pub links: BTreeMap<String, String>,
}
