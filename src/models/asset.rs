//! Asset record model and search query types
//!
//! `AssetRecord` is the canonical representation of one Canto asset used
//! throughout the application. It is constructed only by the normalizer
//! and never mutated afterwards; cached copies are returned by clone.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Media kind of an asset, matching Canto's detail endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Image,
    Video,
    Document,
}

impl Scheme {
    /// Path segment used by the Canto detail and binary endpoints
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Image => "image",
            Scheme::Video => "video",
            Scheme::Document => "document",
        }
    }

    /// Extension used when a filename has to be synthesized
    pub fn default_extension(&self) -> &'static str {
        match self {
            Scheme::Image => "jpg",
            Scheme::Video => "mp4",
            Scheme::Document => "pdf",
        }
    }

    /// Bundled placeholder thumbnail, relative to the embedded asset root
    pub fn placeholder_asset(&self) -> &'static str {
        match self {
            Scheme::Image => "assets/images/default-image.svg",
            Scheme::Video => "assets/images/default-video.svg",
            Scheme::Document => "assets/images/default-document.svg",
        }
    }

    /// Parse a scheme from an API value or URL path segment
    pub fn parse(value: &str) -> Option<Scheme> {
        match value {
            "image" => Some(Scheme::Image),
            "video" => Some(Scheme::Video),
            "document" => Some(Scheme::Document),
            _ => None,
        }
    }

    /// All schemes in the order the detail endpoints are probed
    pub fn probe_order() -> [Scheme; 3] {
        [Scheme::Image, Scheme::Video, Scheme::Document]
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical normalized asset, serialized as-is in AJAX responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssetRecord {
    /// Opaque Canto-assigned identifier
    pub id: String,
    pub scheme: Scheme,
    /// Display title, "Untitled" when the API omits one
    pub name: String,
    /// Stable derived filename; this is the value the form field persists
    pub filename: String,
    /// Preview URL (may require upstream authentication)
    pub url: String,
    /// Publicly fetchable thumbnail URL; never empty
    pub thumbnail: String,
    /// Direct or constructed binary-download URL
    pub download_url: String,
    pub dimensions: String,
    pub mime_type: String,
    /// Human-formatted size, e.g. "2.5 MB"
    pub size: String,
    /// Upload timestamp string, verbatim from the API
    pub uploaded: String,
    /// Raw provider metadata, preserved verbatim for display
    #[schema(value_type = Object)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// The fixed file-type filter the search endpoints apply, pipe-joined
/// on the wire exactly as Canto expects it
pub const DEFAULT_FILE_TYPES: &[&str] = &[
    "GIF", "JPG", "PNG", "SVG", "WEBP", "DOC", "KEY", "ODT", "PDF", "PPT", "XLS", "MPEG", "M4A",
    "OGG", "WAV", "AVI", "MP4", "MOV", "OGG", "VTT", "WMV", "3GP",
];

/// Page size used for search and album listings
pub const SEARCH_PAGE_LIMIT: u32 = 50;

/// File-type constraints applied to a search
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub file_types: Vec<String>,
}

impl SearchFilters {
    /// The standard browse filter covering all supported media types
    pub fn standard() -> Self {
        Self {
            file_types: DEFAULT_FILE_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Pipe-joined wire format, empty string when unconstrained
    pub fn to_wire(&self) -> String {
        self.file_types.join("|")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub start: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            start: 0,
            limit: SEARCH_PAGE_LIMIT,
        }
    }
}

/// One search invocation; constructed per call, never persisted
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub keyword: String,
    pub filters: SearchFilters,
    pub pagination: Pagination,
}

impl SearchQuery {
    /// Browse-style search with the standard file-type filter
    pub fn for_keyword<S: Into<String>>(keyword: S) -> Self {
        Self {
            keyword: keyword.into(),
            filters: SearchFilters::standard(),
            pagination: Pagination::default(),
        }
    }

    /// Unfiltered lookup used when resolving a stored filename
    pub fn unfiltered<S: Into<String>>(keyword: S) -> Self {
        Self {
            keyword: keyword.into(),
            filters: SearchFilters::default(),
            pagination: Pagination::default(),
        }
    }
}

/// How `format_value` renders a resolved asset back to the form host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReturnFormat {
    #[default]
    Object,
    Id,
    Url,
}

/// Value handed back for a stored filename, shaped by [`ReturnFormat`]
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum FormattedValue {
    Object(AssetRecord),
    Id(String),
    Url(String),
}
