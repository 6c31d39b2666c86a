use super::*;
use crate::config::CachePolicy;

// Keys in tests use implausible league ids so they never collide with a
// developer's real cache files.

#[test]
fn test_cache_root_path() {
    let path = cache_root();
    assert!(path.to_string_lossy().contains("gridiron-gazette"));
}

#[test]
fn test_scoreboard_cache_key_file_key() {
    let key = ScoreboardCacheKey {
        league_id: LeagueId::new(123456),
        season: Season::new(2025),
        week: Some(Week::new(5)),
        depth: StatsDepth::Full,
    };
    assert_eq!(key.to_file_key(), "scoreboard_l123456_s2025_w5_full");

    let current = ScoreboardCacheKey {
        league_id: LeagueId::new(123456),
        season: Season::new(2025),
        week: None,
        depth: StatsDepth::Basic,
    };
    assert_eq!(current.to_file_key(), "scoreboard_l123456_s2025_current_basic");
}

#[test]
fn test_try_read_to_string_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("sub").join("test.txt");

    write_string(&file_path, "hello world").unwrap();
    assert_eq!(
        try_read_to_string(&file_path),
        Some("hello world".to_string())
    );
    assert_eq!(try_read_to_string(&dir.path().join("missing.txt")), None);
}

fn test_key(league: u32, week: u16) -> ScoreboardCacheKey {
    ScoreboardCacheKey {
        league_id: LeagueId::new(league),
        season: Season::new(2099),
        week: Some(Week::new(week)),
        depth: StatsDepth::Basic,
    }
}

#[test]
fn test_unified_cache_put_get() {
    let cache: UnifiedCache<ScoreboardCacheKey, String> = UnifiedCache::new(2);
    let key = test_key(999_999_001, 1);
    let ttl = Duration::from_secs(60);

    assert_eq!(cache.get(&key, ttl), None);
    cache.put(key.clone(), "payload".to_string());
    assert_eq!(cache.get(&key, ttl), Some("payload".to_string()));

    let _ = cache.invalidate_disk_cache(&key);
}

#[test]
fn test_unified_cache_zero_ttl_reads_as_miss() {
    let cache: UnifiedCache<ScoreboardCacheKey, String> = UnifiedCache::new(2);
    let key = test_key(999_999_002, 1);

    // A zero TTL disables reads even for an entry written this instant.
    cache.put(key.clone(), "payload".to_string());
    assert_eq!(cache.get(&key, Duration::from_secs(0)), None);
    assert_eq!(
        cache.get(&key, Duration::from_secs(60)),
        Some("payload".to_string())
    );

    let _ = cache.invalidate_disk_cache(&key);
}

#[test]
fn test_unified_cache_disk_promotion() {
    let key = test_key(999_999_003, 2);
    let ttl = Duration::from_secs(60);

    let writer: UnifiedCache<ScoreboardCacheKey, String> = UnifiedCache::new(2);
    writer.put(key.clone(), "from-disk".to_string());

    // A fresh cache instance has an empty memory tier but sees the file.
    let reader: UnifiedCache<ScoreboardCacheKey, String> = UnifiedCache::new(2);
    assert_eq!(reader.memory_stats().0, 0);
    assert_eq!(reader.get(&key, ttl), Some("from-disk".to_string()));
    assert_eq!(reader.memory_stats().0, 1);

    let _ = writer.invalidate_disk_cache(&key);
}

#[test]
fn test_unified_cache_lru_eviction() {
    let cache: UnifiedCache<ScoreboardCacheKey, String> = UnifiedCache::new(2);
    let keys: Vec<_> = (0..3).map(|i| test_key(999_999_100 + i, 3)).collect();

    for (i, key) in keys.iter().enumerate() {
        cache.put(key.clone(), format!("v{}", i));
    }

    let (used, capacity) = cache.memory_stats();
    assert_eq!(used, 2);
    assert_eq!(capacity, 2);

    for key in &keys {
        let _ = cache.invalidate_disk_cache(key);
    }
}

#[tokio::test]
async fn test_get_or_fetch_miss_then_hit() {
    let cache: UnifiedCache<ScoreboardCacheKey, String> = UnifiedCache::new(2);
    let key = test_key(999_999_200, 4);
    let policy = CachePolicy::default();

    let (value, status) = get_or_fetch(&cache, key.clone(), policy, || async {
        Ok("fetched".to_string())
    })
    .await
    .unwrap();
    assert_eq!(value, "fetched");
    assert_eq!(status, CacheStatus::Miss);

    let (value, status) = get_or_fetch(&cache, key.clone(), policy, || async {
        panic!("must not refetch on a cache hit")
    })
    .await
    .unwrap();
    assert_eq!(value, "fetched");
    assert_eq!(status, CacheStatus::Hit);

    let _ = cache.invalidate_disk_cache(&key);
}

#[tokio::test]
async fn test_get_or_fetch_force_live_refreshes() {
    let cache: UnifiedCache<ScoreboardCacheKey, String> = UnifiedCache::new(2);
    let key = test_key(999_999_201, 4);

    cache.put(key.clone(), "stale".to_string());

    let policy = CachePolicy {
        force_live: true,
        ..CachePolicy::default()
    };
    let (value, status) = get_or_fetch(&cache, key.clone(), policy, || async {
        Ok("live".to_string())
    })
    .await
    .unwrap();
    assert_eq!(value, "live");
    assert_eq!(status, CacheStatus::Refreshed);

    // The refreshed value replaced the cached one
    assert_eq!(
        cache.get(&key, Duration::from_secs(60)),
        Some("live".to_string())
    );

    let _ = cache.invalidate_disk_cache(&key);
}

#[tokio::test]
async fn test_get_or_fetch_no_cache_never_writes() {
    let cache: UnifiedCache<ScoreboardCacheKey, String> = UnifiedCache::new(2);
    let key = test_key(999_999_202, 4);

    let policy = CachePolicy {
        no_cache: true,
        ..CachePolicy::default()
    };
    let (_, status) = get_or_fetch(&cache, key.clone(), policy, || async {
        Ok("ephemeral".to_string())
    })
    .await
    .unwrap();
    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(cache.get(&key, Duration::from_secs(60)), None);
    assert!(!key.to_file_path().exists());
}
