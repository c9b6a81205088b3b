//! Canto DAM integration
//!
//! This module talks to a Canto tenant's REST API and turns its three
//! asset shapes (image, video, document) into the canonical
//! [`AssetRecord`](crate::models::AssetRecord):
//!
//! - [`client`]: authenticated HTTP client with the uniform error taxonomy
//! - [`payloads`]: serde bindings for the wire shapes
//! - [`normalizer`]: raw payload -> canonical record
//! - [`probes`]: ordered endpoint-variant probing (first success wins)
//!
//! The [`CantoApi`] trait is the seam between the client and everything
//! above it; the resolver and the web layer depend on the trait so tests
//! can substitute a scripted implementation.

pub mod client;
pub mod endpoints;
pub mod normalizer;
pub mod payloads;
pub mod probes;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::CantoResult;
use crate::models::{Scheme, SearchQuery, TreeResult};
use payloads::{RawAsset, SearchPage};

pub use client::CantoClient;
pub use normalizer::AssetNormalizer;

/// Binary preview fetched for the thumbnail reverse proxy
#[derive(Debug, Clone)]
pub struct PreviewPayload {
    pub bytes: Bytes,
    /// Upstream content type, when the response carried one
    pub content_type: Option<String>,
}

/// Operations the rest of the application needs from a Canto tenant
#[async_trait]
pub trait CantoApi: Send + Sync {
    /// Whether domain and token are both present
    fn is_configured(&self) -> bool;

    /// Ordered, user-facing configuration problems
    fn config_errors(&self) -> Vec<String>;

    /// Keyword search over the tenant's library
    async fn search(&self, query: &SearchQuery) -> CantoResult<SearchPage>;

    /// Fetch one asset by id, probing the image, video and document
    /// detail endpoints in that order
    async fn get_by_id(&self, asset_id: &str) -> CantoResult<RawAsset>;

    /// Folder/album tree; `None` fetches the root layer
    async fn get_tree(&self, parent_id: Option<&str>) -> CantoResult<TreeResult>;

    /// Assets contained in an album or folder. A folder holding only
    /// subfolders yields an empty page, not an error.
    async fn get_album_assets(&self, album_id: &str) -> CantoResult<SearchPage>;

    /// Authenticated binary preview used by the thumbnail proxy
    async fn fetch_preview(&self, scheme: Scheme, asset_id: &str) -> CantoResult<PreviewPayload>;
}
