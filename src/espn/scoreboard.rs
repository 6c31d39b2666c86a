//! Cache-aware scoreboard loading.

use std::sync::LazyLock;

use tracing::info;

use crate::cli::types::Week;
use crate::config::{CachePolicy, LeagueConfig, StatsDepth};
use crate::core::{get_or_fetch, CacheStatus, ScoreboardCacheKey, UnifiedCache};
use crate::espn::http::EspnClient;
use crate::espn::types::ScoreboardEnvelope;
use crate::Result;

static SCOREBOARD_CACHE: LazyLock<UnifiedCache<ScoreboardCacheKey, ScoreboardEnvelope>> =
    LazyLock::new(|| UnifiedCache::new(50));

/// Load a league's weekly scoreboard through the cache, fetching from ESPN on
/// a miss. Returns the envelope and how the lookup resolved.
pub async fn load_or_fetch_scoreboard(
    client: &EspnClient,
    cfg: &LeagueConfig,
    week: Option<Week>,
    depth: StatsDepth,
    policy: CachePolicy,
) -> Result<(ScoreboardEnvelope, CacheStatus)> {
    let key = ScoreboardCacheKey {
        league_id: cfg.league_id,
        season: cfg.year,
        week,
        depth,
    };

    let (envelope, status) = get_or_fetch(&SCOREBOARD_CACHE, key, policy, || async {
        let (espn_s2, swid) = cfg.cookies();
        client
            .get_scoreboard(
                cfg.league_id,
                cfg.year,
                week,
                depth,
                espn_s2.as_deref(),
                swid.as_deref(),
            )
            .await
    })
    .await?;

    match status {
        CacheStatus::Hit => info!(league = %cfg.name, "scoreboard loaded from cache"),
        CacheStatus::Miss => info!(league = %cfg.name, "scoreboard fetched (cache miss)"),
        CacheStatus::Refreshed => info!(league = %cfg.name, "scoreboard fetched (forced live)"),
    }

    Ok((envelope, status))
}

/// The week the envelope describes: the explicit override, or the payload's
/// current scoring period.
pub fn effective_week(envelope: &ScoreboardEnvelope, requested: Option<Week>) -> Week {
    requested.unwrap_or(envelope.scoring_period_id)
}
