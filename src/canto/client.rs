//! Canto REST API client
//!
//! Carries the bearer token on every request and maps the transport,
//! status, body and API-error failure modes onto [`CantoError`]. Calls
//! use one fixed 30-second timeout and are never retried; the
//! multi-endpoint lookups (`get_by_id`, `get_album_assets`) instead walk
//! an ordered probe list and take the first success.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::canto::endpoints::CantoEndpoints;
use crate::canto::payloads::{RawAsset, SearchPage, TreePage};
use crate::canto::probes::{ProbeStrategy, first_success};
use crate::canto::{CantoApi, PreviewPayload};
use crate::config::CantoConfig;
use crate::errors::{CantoError, CantoResult};
use crate::models::{Scheme, SearchQuery, TreeNode, TreeResult};

/// Fixed timeout applied to every upstream call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("canto-bridge/", env!("CARGO_PKG_VERSION"));

pub struct CantoClient {
    http: Client,
    config: CantoConfig,
    endpoints: CantoEndpoints,
}

impl CantoClient {
    pub fn new(config: CantoConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        let endpoints = CantoEndpoints::new(&config.domain, &config.api_host);

        Ok(Self {
            http,
            config,
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &CantoEndpoints {
        &self.endpoints
    }

    fn ensure_configured(&self) -> CantoResult<()> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(CantoError::NotConfigured(
                self.config.config_errors().join("; "),
            ))
        }
    }

    /// GET a JSON endpoint and surface the four failure modes in order:
    /// transport, status, undecodable body, explicit API error field
    async fn get_json(&self, url: &str) -> CantoResult<Value> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.token)
            .header("Content-Type", "application/json;charset=utf-8")
            .send()
            .await
            .map_err(CantoError::transport)?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(CantoError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(CantoError::transport)?;
        if body.is_empty() {
            return Err(CantoError::InvalidResponse(
                "empty response body".to_string(),
            ));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| CantoError::InvalidResponse(e.to_string()))?;

        if let Some(message) = value.get("error") {
            let message = message
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| message.to_string());
            return Err(CantoError::Upstream(message));
        }

        Ok(value)
    }

    async fn get_typed<T: DeserializeOwned>(&self, url: &str) -> CantoResult<T> {
        let value = self.get_json(url).await?;
        serde_json::from_value(value).map_err(|e| CantoError::InvalidResponse(e.to_string()))
    }

    fn map_tree_node(raw: crate::canto::payloads::RawTreeNode) -> TreeNode {
        TreeNode {
            id: raw.id,
            name: raw.name.unwrap_or_else(|| "Untitled".to_string()),
            node_type: raw.scheme.unwrap_or_else(|| "folder".to_string()),
            children: raw.children.into_iter().map(Self::map_tree_node).collect(),
        }
    }
}

/// Probe against one detail endpoint variant for a fixed asset id
struct DetailProbe<'a> {
    client: &'a CantoClient,
    scheme: Scheme,
    asset_id: &'a str,
}

#[async_trait]
impl ProbeStrategy<RawAsset> for DetailProbe<'_> {
    fn label(&self) -> &str {
        self.scheme.as_str()
    }

    async fn attempt(&self) -> Result<RawAsset, CantoError> {
        let url = self.client.endpoints.detail_url(self.scheme, self.asset_id);
        self.client.get_typed(&url).await
    }
}

/// Probe against one container-listing endpoint variant
struct ListingProbe<'a> {
    client: &'a CantoClient,
    label: &'static str,
    url: String,
}

#[async_trait]
impl ProbeStrategy<SearchPage> for ListingProbe<'_> {
    fn label(&self) -> &str {
        self.label
    }

    async fn attempt(&self) -> Result<SearchPage, CantoError> {
        self.client.get_typed(&self.url).await
    }
}

#[async_trait]
impl CantoApi for CantoClient {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn config_errors(&self) -> Vec<String> {
        self.config.config_errors()
    }

    async fn search(&self, query: &SearchQuery) -> CantoResult<SearchPage> {
        self.ensure_configured()?;

        let url = self.endpoints.search_url(query);
        let page: SearchPage = self.get_typed(&url).await?;
        debug!(
            "search '{}' returned {} of {} assets",
            query.keyword,
            page.results.len(),
            page.found
        );
        Ok(page)
    }

    async fn get_by_id(&self, asset_id: &str) -> CantoResult<RawAsset> {
        self.ensure_configured()?;

        let probes: Vec<Box<dyn ProbeStrategy<RawAsset> + '_>> = Scheme::probe_order()
            .into_iter()
            .map(|scheme| {
                Box::new(DetailProbe {
                    client: self,
                    scheme,
                    asset_id,
                }) as Box<dyn ProbeStrategy<RawAsset> + '_>
            })
            .collect();

        first_success(probes)
            .await
            .ok_or_else(|| CantoError::NotFound(asset_id.to_string()))
    }

    async fn get_tree(&self, parent_id: Option<&str>) -> CantoResult<TreeResult> {
        self.ensure_configured()?;

        let url = self.endpoints.tree_url(parent_id);
        let page: TreePage = match self.get_typed(&url).await {
            Ok(page) => page,
            // Some tenants don't expose the tree endpoint at all;
            // browsing still works against the synthetic root
            Err(CantoError::Http { status: 404 }) => {
                info!("tree endpoint unavailable (404), serving fallback root");
                return Ok(TreeResult::fallback_root());
            }
            Err(err) => return Err(err),
        };

        Ok(TreeResult {
            results: page.results.into_iter().map(Self::map_tree_node).collect(),
            found: page.found,
            limit: page.limit,
            start: page.start,
        })
    }

    async fn get_album_assets(&self, album_id: &str) -> CantoResult<SearchPage> {
        self.ensure_configured()?;

        let query = SearchQuery::for_keyword("");
        let probes: Vec<Box<dyn ProbeStrategy<SearchPage> + '_>> = vec![
            Box::new(ListingProbe {
                client: self,
                label: "album",
                url: self.endpoints.album_url(album_id, &query),
            }),
            Box::new(ListingProbe {
                client: self,
                label: "folder",
                url: self.endpoints.folder_url(album_id, &query),
            }),
            Box::new(ListingProbe {
                client: self,
                label: "search_in_album",
                url: self.endpoints.album_search_url(album_id, &query),
            }),
        ];

        // A folder holding only subfolders answers on none of the
        // variants; callers cannot distinguish that from an empty album
        match first_success(probes).await {
            Some(page) => Ok(page),
            None => {
                debug!("no listing variant answered for '{}', returning empty", album_id);
                Ok(SearchPage::empty())
            }
        }
    }

    async fn fetch_preview(&self, scheme: Scheme, asset_id: &str) -> CantoResult<PreviewPayload> {
        self.ensure_configured()?;

        let url = self.endpoints.preview_url(scheme, asset_id);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.token)
            .send()
            .await
            .map_err(CantoError::transport)?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(CantoError::Http {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes: Bytes = response.bytes().await.map_err(CantoError::transport)?;
        if bytes.is_empty() {
            return Err(CantoError::InvalidResponse(
                "empty preview body".to_string(),
            ));
        }

        Ok(PreviewPayload {
            bytes,
            content_type,
        })
    }
}
