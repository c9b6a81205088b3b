//! Cache-aware asset resolution
//!
//! Maps an asset id or a stored filename to a normalized record. Every
//! lookup is cache-through: hit returns the cached record, miss goes
//! upstream, normalizes, caches and returns. A NotFound is never
//! cached, so a later upload with the same filename becomes visible on
//! the next resolution. The cache is read and released before any
//! upstream call; concurrent misses for the same key simply duplicate
//! work.

use regex::Regex;
use std::sync::Arc;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

use crate::cache::{ASSET_KEY_PREFIX, CacheStore, FILENAME_KEY_PREFIX, asset_key, filename_key};
use crate::canto::{AssetNormalizer, CantoApi};
use crate::errors::{CantoError, CantoResult};
use crate::models::{AssetRecord, FormattedValue, ReturnFormat, SearchQuery};

/// Identifiers in Canto's id alphabet; anything longer than this that
/// matches is worth a direct detail lookup before falling back to a
/// filename search
static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());
const ID_MIN_LEN: usize = 10;

#[derive(Clone)]
pub struct AssetResolver {
    api: Arc<dyn CantoApi>,
    normalizer: AssetNormalizer,
    cache: CacheStore<AssetRecord>,
    ttl: Duration,
}

impl AssetResolver {
    pub fn new(
        api: Arc<dyn CantoApi>,
        normalizer: AssetNormalizer,
        cache: CacheStore<AssetRecord>,
    ) -> Self {
        let ttl = cache.default_ttl();
        Self {
            api,
            normalizer,
            cache,
            ttl,
        }
    }

    /// Resolve an asset by its Canto id
    pub async fn resolve_by_id(&self, asset_id: &str) -> CantoResult<AssetRecord> {
        let key = asset_key(asset_id);
        if let Some(cached) = self.cache.get(&key).await {
            debug!("cache hit for asset {}", asset_id);
            return Ok(cached);
        }

        let raw = self.api.get_by_id(asset_id).await?;
        let record = self
            .normalizer
            .normalize(&raw)
            .ok_or_else(|| CantoError::NotFound(asset_id.to_string()))?;

        self.cache.set(&key, record.clone(), self.ttl).await;
        Ok(record)
    }

    /// Resolve the asset a stored filename refers to.
    ///
    /// Searches for the filename, takes the first result whose derived
    /// filename matches exactly, then falls back to an exact match on
    /// the display name for assets without filename metadata. Matching
    /// is case-sensitive; filenames are treated as unique identifiers
    /// chosen at upload time.
    pub async fn resolve_by_filename(&self, filename: &str) -> CantoResult<AssetRecord> {
        if filename.is_empty() {
            return Err(CantoError::NotFound(filename.to_string()));
        }

        let key = filename_key(filename);
        if let Some(cached) = self.cache.get(&key).await {
            debug!("cache hit for filename {}", filename);
            return Ok(cached);
        }

        let page = self
            .api
            .search(&SearchQuery::unfiltered(filename))
            .await?;
        let candidates: Vec<AssetRecord> = page
            .results
            .iter()
            .filter_map(|raw| self.normalizer.normalize(raw))
            .collect();

        let matched = candidates
            .iter()
            .find(|record| record.filename == filename)
            .or_else(|| candidates.iter().find(|record| record.name == filename));

        match matched {
            Some(record) => {
                self.cache.set(&key, record.clone(), self.ttl).await;
                Ok(record.clone())
            }
            None => {
                debug!("no asset matched filename '{}'", filename);
                Err(CantoError::NotFound(filename.to_string()))
            }
        }
    }

    /// Resolve an identifier that may be an id or a filename
    pub async fn resolve(&self, identifier: &str) -> CantoResult<AssetRecord> {
        if identifier.is_empty() {
            return Err(CantoError::NotFound(identifier.to_string()));
        }

        if identifier.len() > ID_MIN_LEN && ID_RE.is_match(identifier) {
            match self.resolve_by_id(identifier).await {
                Ok(record) => return Ok(record),
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
        }

        if identifier.contains('.') {
            return self.resolve_by_filename(identifier).await;
        }

        Err(CantoError::NotFound(identifier.to_string()))
    }

    /// Keyword search, normalized. When `selected_id` names an asset
    /// that did not land in the result page, it is fetched separately
    /// and prepended so a re-opened picker still shows the current
    /// selection.
    pub async fn search(
        &self,
        keyword: &str,
        selected_id: Option<&str>,
    ) -> CantoResult<Vec<AssetRecord>> {
        let page = self.api.search(&SearchQuery::for_keyword(keyword)).await?;
        let mut assets: Vec<AssetRecord> = page
            .results
            .iter()
            .filter_map(|raw| self.normalizer.normalize(raw))
            .collect();

        if let Some(selected) = selected_id.filter(|s| !s.is_empty())
            && !assets.iter().any(|a| a.id == selected)
            && let Ok(record) = self.resolve_by_id(selected).await
        {
            assets.insert(0, record);
        }

        Ok(assets)
    }

    /// Assets inside an album or folder, normalized; empty for folders
    /// holding only subfolders
    pub async fn album_assets(&self, album_id: &str) -> CantoResult<Vec<AssetRecord>> {
        let page = self.api.get_album_assets(album_id).await?;
        Ok(page
            .results
            .iter()
            .filter_map(|raw| self.normalizer.normalize(raw))
            .collect())
    }

    /// Render a stored field value for the form host. `None` when the
    /// value is empty or no longer resolves to an asset.
    pub async fn format_value(
        &self,
        stored_value: &str,
        return_format: ReturnFormat,
    ) -> CantoResult<Option<FormattedValue>> {
        if stored_value.is_empty() {
            return Ok(None);
        }

        let record = match self.resolve_by_filename(stored_value).await {
            Ok(record) => record,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err),
        };

        Ok(Some(match return_format {
            ReturnFormat::Object => FormattedValue::Object(record),
            ReturnFormat::Id => FormattedValue::Id(record.id),
            ReturnFormat::Url => FormattedValue::Url(record.url),
        }))
    }

    /// Flush both cache namespaces; idempotent, used on deactivation
    /// and uninstall
    pub async fn clear_cache(&self) -> usize {
        let assets = self
            .cache
            .delete_matching(&format!("{ASSET_KEY_PREFIX}*"))
            .await;
        let filenames = self
            .cache
            .delete_matching(&format!("{FILENAME_KEY_PREFIX}*"))
            .await;
        debug!(
            "cache cleared: {} asset entries, {} filename entries",
            assets, filenames
        );
        assets + filenames
    }

    /// Number of live cache entries, reported by the health endpoint
    pub async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }
}
