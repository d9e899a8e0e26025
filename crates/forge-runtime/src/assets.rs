//! Asset search URL builders.
//!
//! Read-only lookups: the assistant hands the user a browse URL instead of
//! scraping storefronts. Queries are percent-encoded; no network calls
//! happen here.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// One suggested place to look for assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSearch {
    /// Human-readable label for the link.
    pub label: String,
    /// The browse URL.
    pub url: String,
}

fn encode(query: &str) -> String {
    utf8_percent_encode(query, NON_ALPHANUMERIC).to_string()
}

/// itch.io search URL for `query`.
#[must_use]
pub fn itch_io_url(query: &str) -> String {
    format!("https://itch.io/search?q={}", encode(query))
}

/// Unity Asset Store search URL for `query`.
#[must_use]
pub fn unity_asset_store_url(query: &str) -> String {
    format!("https://assetstore.unity.com/search?q={}", encode(query))
}

/// All search suggestions for `query`, in a fixed order.
#[must_use]
pub fn search_all(query: &str) -> Vec<AssetSearch> {
    vec![
        AssetSearch {
            label: format!("itch.io: {query}"),
            url: itch_io_url(query),
        },
        AssetSearch {
            label: format!("Unity Asset Store: {query}"),
            url: unity_asset_store_url(query),
        },
    ]
}
