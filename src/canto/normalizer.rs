//! Raw Canto payload -> canonical asset record
//!
//! Pure given its configuration: the same payload always normalizes to
//! the same record, which is what makes the derived filename a stable
//! field value. Payloads without an id are rejected.

use regex::Regex;
use std::sync::LazyLock;

use crate::canto::endpoints::CantoEndpoints;
use crate::canto::payloads::RawAsset;
use crate::config::CantoConfig;
use crate::models::{AssetRecord, Scheme};
use crate::utils::format_size;

/// Metadata keys holding the original filename, tried in order
const FILENAME_METADATA_KEYS: &[&str] = &[
    "Filename",
    "File Name",
    "Original Filename",
    "filename",
    "file_name",
];

/// A display name that already ends in an extension is usable verbatim
static EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[A-Za-z0-9]{2,5}$").unwrap());

/// Characters replaced when synthesizing a filename from a display name
static UNSAFE_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());

#[derive(Debug, Clone)]
pub struct AssetNormalizer {
    /// Absent when the tenant domain is unconfigured; URL construction
    /// is skipped in that case
    endpoints: Option<CantoEndpoints>,
    /// Public base URL for thumbnail-proxy and placeholder links
    base_url: String,
}

impl AssetNormalizer {
    pub fn new(canto: &CantoConfig, base_url: &str) -> Self {
        let endpoints = if canto.domain.is_empty() {
            None
        } else {
            Some(CantoEndpoints::new(&canto.domain, &canto.api_host))
        };
        Self {
            endpoints,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Normalize a raw record; absent when the payload lacks an id
    pub fn normalize(&self, raw: &RawAsset) -> Option<AssetRecord> {
        let id = raw.id.as_deref()?.to_string();
        if id.is_empty() {
            return None;
        }

        let scheme = self.infer_scheme(raw);
        let name = raw
            .name
            .clone()
            .unwrap_or_else(|| "Untitled".to_string());

        let urls = raw.url.clone().unwrap_or_default();
        let url = urls.preview.clone().unwrap_or_default();

        let thumbnail = urls
            .direct_url_preview
            .clone()
            .filter(|u| !u.is_empty())
            .or_else(|| self.proxy_thumbnail_url(scheme, &id))
            .unwrap_or_else(|| self.placeholder_url(scheme));

        let download_url = urls
            .download
            .clone()
            .filter(|u| !u.is_empty())
            .or_else(|| {
                self.endpoints
                    .as_ref()
                    .map(|ep| ep.download_url(scheme, &id))
            })
            .unwrap_or_default();

        let dimensions = self.metadata_string(raw, "Dimensions");
        let mime_type = self.metadata_string(raw, "Content Type");
        let size = raw.size.map(format_size).unwrap_or_default();
        let uploaded = raw.last_uploaded.clone().unwrap_or_default();
        let filename = self.derive_filename(raw, &name, scheme);

        Some(AssetRecord {
            id,
            scheme,
            name,
            filename,
            url,
            thumbnail,
            download_url,
            dimensions,
            mime_type,
            size,
            uploaded,
            metadata: raw.metadata.clone(),
        })
    }

    /// Explicit scheme field, else the preview URL path, else image
    fn infer_scheme(&self, raw: &RawAsset) -> Scheme {
        if let Some(explicit) = raw.scheme.as_deref()
            && let Some(scheme) = Scheme::parse(explicit)
        {
            return scheme;
        }

        if let Some(preview) = raw.url.as_ref().and_then(|u| u.preview.as_deref()) {
            if preview.contains("/video/") {
                return Scheme::Video;
            }
            if preview.contains("/document/") {
                return Scheme::Document;
            }
        }

        Scheme::Image
    }

    /// Locally-served authenticated thumbnail, available once the
    /// tenant domain is known
    fn proxy_thumbnail_url(&self, scheme: Scheme, id: &str) -> Option<String> {
        self.endpoints
            .as_ref()
            .map(|_| format!("{}/canto-thumbnail/{}/{}", self.base_url, scheme, id))
    }

    /// Bundled default thumbnail keyed by scheme, the final fallback
    fn placeholder_url(&self, scheme: Scheme) -> String {
        format!("{}/{}", self.base_url, scheme.placeholder_asset())
    }

    fn metadata_string(&self, raw: &RawAsset, key: &str) -> String {
        raw.metadata
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Metadata alias scan, then the name verbatim when it carries an
    /// extension, then a sanitized synthesis
    fn derive_filename(&self, raw: &RawAsset, name: &str, scheme: Scheme) -> String {
        for key in FILENAME_METADATA_KEYS {
            if let Some(value) = raw.metadata.get(*key).and_then(|v| v.as_str())
                && !value.is_empty()
            {
                return value.to_string();
            }
        }

        if EXTENSION_RE.is_match(name) {
            return name.to_string();
        }

        let safe_name = UNSAFE_CHARS_RE.replace_all(name, "_");
        format!("{}.{}", safe_name, scheme.default_extension())
    }
}
