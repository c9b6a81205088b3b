//! In-memory key/value cache with per-entry expiry
//!
//! Backs asset resolution: resolved records are cached under namespaced
//! keys (`canto_asset_*` by id, `canto_filename_*` by filename hash) and
//! evicted after a fixed TTL or an explicit flush. Last-write-wins is
//! the only consistency guarantee; concurrent resolutions of the same
//! key may both miss and both write the same derived value.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Namespace for records cached by asset id
pub const ASSET_KEY_PREFIX: &str = "canto_asset_";
/// Namespace for records cached by filename hash
pub const FILENAME_KEY_PREFIX: &str = "canto_filename_";

/// Cache key for an asset id
pub fn asset_key(asset_id: &str) -> String {
    format!("{ASSET_KEY_PREFIX}{asset_id}")
}

/// Cache key for a filename; hashed so arbitrary filenames stay within
/// a predictable key alphabet
pub fn filename_key(filename: &str) -> String {
    let digest = Sha256::digest(filename.as_bytes());
    format!("{FILENAME_KEY_PREFIX}{}", hex::encode(digest))
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Shared TTL cache; cheap to clone, all clones see the same entries
#[derive(Debug, Clone)]
pub struct CacheStore<V> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
    default_ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Look up a key; expired entries behave as absent and are dropped
    pub async fn get(&self, key: &str) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Entry existed but is stale; remove it unless a writer already
        // replaced it with a fresh one
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key)
            && entry.expires_at <= Instant::now()
        {
            entries.remove(key);
        }
        None
    }

    pub async fn set(&self, key: &str, value: V, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Store with the configured default TTL
    pub async fn set_default(&self, key: &str, value: V) {
        self.set(key, value, self.default_ttl).await;
    }

    /// Delete every key matching the pattern. A trailing `*` makes the
    /// pattern a prefix match; otherwise the match is exact. Returns the
    /// number of entries removed.
    pub async fn delete_matching(&self, pattern: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        if let Some(prefix) = pattern.strip_suffix('*') {
            entries.retain(|key, _| !key.starts_with(prefix));
        } else {
            entries.remove(pattern);
        }
        let removed = before - entries.len();
        debug!("cache delete_matching({}) removed {} entries", pattern, removed);
        removed
    }

    /// Drop everything; idempotent
    pub async fn clear_all(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        removed
    }

    /// Number of unexpired entries currently held
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries.values().filter(|e| e.expires_at > now).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_set_get_round_trip() {
        let cache: CacheStore<String> = CacheStore::new(TTL);
        cache.set("canto_asset_a1", "value".to_string(), TTL).await;

        assert_eq!(cache.get("canto_asset_a1").await.as_deref(), Some("value"));
        assert_eq!(cache.get("canto_asset_missing").await, None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent() {
        let cache: CacheStore<u32> = CacheStore::new(TTL);
        cache.set("k", 7, Duration::from_millis(20)).await;
        assert_eq!(cache.get("k").await, Some(7));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.get("k").await, None);
        // The stale entry was dropped on read, not just hidden
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let cache: CacheStore<u32> = CacheStore::new(TTL);
        cache.set("k", 1, TTL).await;
        cache.set("k", 2, TTL).await;
        assert_eq!(cache.get("k").await, Some(2));
    }

    #[tokio::test]
    async fn test_delete_matching_prefix_only() {
        let cache: CacheStore<u32> = CacheStore::new(TTL);
        cache.set(&asset_key("a1"), 1, TTL).await;
        cache.set(&asset_key("a2"), 2, TTL).await;
        cache.set(&filename_key("photo.jpg"), 3, TTL).await;

        let removed = cache.delete_matching("canto_asset_*").await;
        assert_eq!(removed, 2);
        assert_eq!(cache.get(&asset_key("a1")).await, None);
        assert_eq!(cache.get(&filename_key("photo.jpg")).await, Some(3));
    }

    #[tokio::test]
    async fn test_delete_matching_exact() {
        let cache: CacheStore<u32> = CacheStore::new(TTL);
        cache.set("canto_asset_a1", 1, TTL).await;
        cache.set("canto_asset_a10", 2, TTL).await;

        assert_eq!(cache.delete_matching("canto_asset_a1").await, 1);
        assert_eq!(cache.get("canto_asset_a10").await, Some(2));
    }

    #[tokio::test]
    async fn test_clear_all_is_idempotent() {
        let cache: CacheStore<u32> = CacheStore::new(TTL);
        cache.set("a", 1, TTL).await;
        cache.set("b", 2, TTL).await;

        assert_eq!(cache.clear_all().await, 2);
        assert_eq!(cache.clear_all().await, 0);
        assert!(cache.is_empty().await);
    }

    #[test]
    fn test_key_builders() {
        assert_eq!(asset_key("m7xyz"), "canto_asset_m7xyz");

        let key = filename_key("Summer.jpg");
        assert!(key.starts_with(FILENAME_KEY_PREFIX));
        // sha256 hex digest
        assert_eq!(key.len(), FILENAME_KEY_PREFIX.len() + 64);
        // Deterministic, distinct per filename
        assert_eq!(key, filename_key("Summer.jpg"));
        assert_ne!(key, filename_key("summer.jpg"));
    }
}
