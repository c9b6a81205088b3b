//! Shared test fixtures: a scripted Canto API and resolver wiring

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use canto_bridge::cache::CacheStore;
use canto_bridge::canto::payloads::{RawAsset, SearchPage};
use canto_bridge::canto::{AssetNormalizer, CantoApi, PreviewPayload};
use canto_bridge::config::{CantoConfig, Config};
use canto_bridge::errors::{CantoError, CantoResult};
use canto_bridge::models::{Scheme, SearchQuery, TreeResult};
use canto_bridge::services::AssetResolver;
use canto_bridge::web::AppState;
use serde_json::Value;

pub const BASE_URL: &str = "http://cms.example";

/// Scripted stand-in for a Canto tenant
#[derive(Default)]
pub struct MockCantoApi {
    pub unconfigured: bool,
    /// Raw detail payloads by asset id
    pub assets_by_id: HashMap<String, Value>,
    /// Raw payloads every search returns
    pub search_results: Vec<Value>,
    /// Raw payloads per album id; missing ids list as empty
    pub album_pages: HashMap<String, Vec<Value>>,
    /// Preview bytes and content type; `None` simulates upstream failure
    pub preview: Option<(Vec<u8>, Option<String>)>,
    pub tree: Option<TreeResult>,
    pub search_calls: AtomicUsize,
    pub get_by_id_calls: AtomicUsize,
}

impl MockCantoApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, id: &str, payload: Value) -> Self {
        self.assets_by_id.insert(id.to_string(), payload);
        self
    }

    pub fn with_search_results(mut self, payloads: Vec<Value>) -> Self {
        self.search_results = payloads;
        self
    }

    pub fn with_album(mut self, id: &str, payloads: Vec<Value>) -> Self {
        self.album_pages.insert(id.to_string(), payloads);
        self
    }

    pub fn with_preview(mut self, bytes: &[u8], content_type: Option<&str>) -> Self {
        self.preview = Some((bytes.to_vec(), content_type.map(str::to_string)));
        self
    }

    pub fn unconfigured(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    fn ensure_configured(&self) -> CantoResult<()> {
        if self.unconfigured {
            Err(CantoError::NotConfigured(self.config_errors().join("; ")))
        } else {
            Ok(())
        }
    }

    fn page(payloads: &[Value]) -> SearchPage {
        let results = payloads
            .iter()
            .map(|v| serde_json::from_value::<RawAsset>(v.clone()).unwrap())
            .collect::<Vec<_>>();
        let found = results.len() as u64;
        SearchPage {
            results,
            found,
            limit: 50,
            start: 0,
        }
    }
}

#[async_trait]
impl CantoApi for MockCantoApi {
    fn is_configured(&self) -> bool {
        !self.unconfigured
    }

    fn config_errors(&self) -> Vec<String> {
        if self.unconfigured {
            vec![
                "Canto domain not configured".to_string(),
                "Canto API token not configured".to_string(),
            ]
        } else {
            Vec::new()
        }
    }

    async fn search(&self, _query: &SearchQuery) -> CantoResult<SearchPage> {
        self.ensure_configured()?;
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::page(&self.search_results))
    }

    async fn get_by_id(&self, asset_id: &str) -> CantoResult<RawAsset> {
        self.ensure_configured()?;
        self.get_by_id_calls.fetch_add(1, Ordering::SeqCst);
        match self.assets_by_id.get(asset_id) {
            Some(payload) => Ok(serde_json::from_value(payload.clone()).unwrap()),
            None => Err(CantoError::NotFound(asset_id.to_string())),
        }
    }

    async fn get_tree(&self, _parent_id: Option<&str>) -> CantoResult<TreeResult> {
        self.ensure_configured()?;
        Ok(self.tree.clone().unwrap_or_else(TreeResult::fallback_root))
    }

    async fn get_album_assets(&self, album_id: &str) -> CantoResult<SearchPage> {
        self.ensure_configured()?;
        match self.album_pages.get(album_id) {
            Some(payloads) => Ok(Self::page(payloads)),
            None => Ok(SearchPage::empty()),
        }
    }

    async fn fetch_preview(
        &self,
        _scheme: Scheme,
        asset_id: &str,
    ) -> CantoResult<PreviewPayload> {
        self.ensure_configured()?;
        match &self.preview {
            Some((bytes, content_type)) => Ok(PreviewPayload {
                bytes: bytes.clone().into(),
                content_type: content_type.clone(),
            }),
            None => Err(CantoError::NotFound(asset_id.to_string())),
        }
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.canto = CantoConfig {
        domain: "acme".to_string(),
        api_host: "canto.com".to_string(),
        token: "secret".to_string(),
    };
    config.web.base_url = BASE_URL.to_string();
    config
}

pub fn resolver_with_ttl(api: Arc<MockCantoApi>, ttl: Duration) -> AssetResolver {
    let config = test_config();
    let normalizer = AssetNormalizer::new(&config.canto, &config.web.base_url);
    AssetResolver::new(api, normalizer, CacheStore::new(ttl))
}

pub fn resolver(api: Arc<MockCantoApi>) -> AssetResolver {
    resolver_with_ttl(api, Duration::from_secs(3600))
}

pub fn app_state(api: Arc<MockCantoApi>) -> AppState {
    let config = test_config();
    let resolver = Arc::new(resolver(api.clone()));
    AppState {
        config,
        api,
        resolver,
        start_time: chrono::Utc::now(),
    }
}
