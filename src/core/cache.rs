//! Two-tier caching for scoreboard payloads
//!
//! - L1: in-memory LRU cache for repeat lookups inside one run (multi-league)
//! - L2: JSON files under the user cache dir for cross-run reuse
//!
//! Entries carry a fetch timestamp; reads honor the TTL from `CACHE_TTL_S`.
//! `FORCE_LIVE` skips reads (entries are refreshed), `NO_CACHE` disables the
//! cache entirely.

use chrono::Utc;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::cli::types::{LeagueId, Season, Week};
use crate::config::{CachePolicy, StatsDepth};

/// Root directory for disk-cached payloads: `~/.cache/gridiron-gazette`.
pub fn cache_root() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("gridiron-gazette")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// How a lookup was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Refreshed,
}

/// Cache key usable for both the memory and disk tiers
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// String representation for file system storage
    fn to_file_key(&self) -> String;

    /// File path for this cache entry
    fn to_file_path(&self) -> PathBuf {
        cache_root().join(format!("{}.json", self.to_file_key()))
    }
}

/// Cache key for a league scoreboard fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreboardCacheKey {
    pub league_id: LeagueId,
    pub season: Season,
    /// `None` means "current week at fetch time".
    pub week: Option<Week>,
    pub depth: StatsDepth,
}

impl CacheKey for ScoreboardCacheKey {
    fn to_file_key(&self) -> String {
        let week_str = self
            .week
            .map(|w| format!("w{}", w.as_u16()))
            .unwrap_or_else(|| "current".to_string());
        format!(
            "scoreboard_l{}_s{}_{}_{}",
            self.league_id.as_u32(),
            self.season.as_u16(),
            week_str,
            self.depth.as_str()
        )
    }
}

/// Disk envelope: the cached value plus when it was fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TimestampedEntry<V> {
    fetched_at: i64,
    value: V,
}

impl<V> TimestampedEntry<V> {
    fn fresh(value: V) -> Self {
        Self {
            fetched_at: Utc::now().timestamp(),
            value,
        }
    }

    /// Strictly younger than the TTL; a zero TTL means nothing is fresh.
    fn is_fresh(&self, ttl: Duration) -> bool {
        let age = Utc::now().timestamp().saturating_sub(self.fetched_at);
        age >= 0 && (age as u64) < ttl.as_secs()
    }
}

/// LRU memory tier over TTL-checked JSON files on disk.
pub struct UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    memory_cache: Arc<Mutex<LruCache<K, TimestampedEntry<V>>>>,
    memory_capacity: usize,
}

impl<K, V> UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    pub fn new(memory_capacity: usize) -> Self {
        Self {
            memory_cache: Arc::new(Mutex::new(LruCache::new(
                NonZeroUsize::new(memory_capacity).unwrap(),
            ))),
            memory_capacity,
        }
    }

    /// Get a fresh entry, checking memory first, then disk. Disk hits are
    /// promoted to the memory tier. Stale entries read as misses.
    pub fn get(&self, key: &K, ttl: Duration) -> Option<V> {
        if let Some(entry) = self.memory_cache.lock().unwrap().get(key) {
            if entry.is_fresh(ttl) {
                return Some(entry.value.clone());
            }
        }

        if let Some(entry) = self.get_from_disk(key) {
            if entry.is_fresh(ttl) {
                let value = entry.value.clone();
                self.memory_cache.lock().unwrap().put(key.clone(), entry);
                return Some(value);
            }
        }

        None
    }

    /// Store in both tiers with a fresh timestamp.
    pub fn put(&self, key: K, value: V) {
        let entry = TimestampedEntry::fresh(value);
        let _ = self.put_to_disk(&key, &entry);
        self.memory_cache.lock().unwrap().put(key, entry);
    }

    fn get_from_disk(&self, key: &K) -> Option<TimestampedEntry<V>> {
        let path = key.to_file_path();
        let content = try_read_to_string(&path)?;
        serde_json::from_str(&content).ok()
    }

    fn put_to_disk(&self, key: &K, entry: &TimestampedEntry<V>) -> std::io::Result<()> {
        let path = key.to_file_path();
        let content = serde_json::to_string_pretty(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_string(&path, &content)
    }

    /// Remove the disk file for a specific key.
    pub fn invalidate_disk_cache(&self, key: &K) -> std::io::Result<()> {
        let path = key.to_file_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// (used, capacity) for the memory tier.
    pub fn memory_stats(&self) -> (usize, usize) {
        let cache = self.memory_cache.lock().unwrap();
        (cache.len(), self.memory_capacity)
    }
}

/// Look up the cache per policy, or fetch. Returns the value and how the
/// lookup resolved. `fetch` runs at most once.
pub async fn get_or_fetch<K, V, F, Fut>(
    cache: &UnifiedCache<K, V>,
    key: K,
    policy: CachePolicy,
    fetch: F,
) -> crate::Result<(V, CacheStatus)>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = crate::Result<V>>,
{
    if !policy.no_cache && !policy.force_live {
        if let Some(value) = cache.get(&key, policy.ttl) {
            return Ok((value, CacheStatus::Hit));
        }
    }

    let value = fetch().await?;
    let status = if policy.force_live {
        CacheStatus::Refreshed
    } else {
        CacheStatus::Miss
    };

    if !policy.no_cache {
        cache.put(key, value.clone());
    }

    Ok((value, status))
}

#[cfg(test)]
mod tests;
