//! Cross-cutting infrastructure: the scoreboard cache.

pub mod cache;

pub use cache::{
    cache_root, get_or_fetch, try_read_to_string, write_string, CacheKey, CacheStatus,
    ScoreboardCacheKey, UnifiedCache,
};
