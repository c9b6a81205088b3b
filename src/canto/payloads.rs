//! Serde bindings for the Canto wire shapes
//!
//! The detail endpoints return one record; search, album and folder
//! listings wrap records in a paging envelope. Fields the tenant may
//! omit are all optional; `size` arrives as either a number or a string
//! depending on the endpoint.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One raw asset record as returned by the detail and search endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAsset {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_size")]
    pub size: Option<u64>,
    #[serde(rename = "lastUploaded", default)]
    pub last_uploaded: Option<String>,
    #[serde(default)]
    pub url: Option<RawAssetUrls>,
    /// Provider metadata map, keyed by display labels like "Content Type"
    #[serde(rename = "default", default)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAssetUrls {
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub download: Option<String>,
    /// Unauthenticated preview URL, present on some tenants
    #[serde(rename = "directUrlPreview", default)]
    pub direct_url_preview: Option<String>,
}

/// Paging envelope for search, album and folder listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<RawAsset>,
    #[serde(default)]
    pub found: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub start: u32,
}

impl SearchPage {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Tree listing entry; children arrive inline for the requested layer
#[derive(Debug, Clone, Deserialize)]
pub struct RawTreeNode {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// "folder" or "album"
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default)]
    pub children: Vec<RawTreeNode>,
}

/// Paging envelope for tree listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreePage {
    #[serde(default)]
    pub results: Vec<RawTreeNode>,
    #[serde(default)]
    pub found: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub start: u32,
}

/// Canto serializes sizes as numbers on detail endpoints and strings in
/// some listing responses
fn deserialize_size<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}
