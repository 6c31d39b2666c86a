//! League config (`leagues.json`) and environment-driven knobs.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::types::{LeagueId, Season};
use crate::error::{GazetteError, Result};

pub const FORCE_LIVE_ENV_VAR: &str = "FORCE_LIVE";
pub const NO_CACHE_ENV_VAR: &str = "NO_CACHE";
pub const CACHE_TTL_ENV_VAR: &str = "CACHE_TTL_S";
pub const STATS_DEPTH_ENV_VAR: &str = "STATS_DEPTH";
pub const FOOTER_NOTE_ENV_VAR: &str = "FOOTER_NOTE";
pub const SPONSOR_LINE_ENV_VAR: &str = "SPONSOR_LINE";

const DEFAULT_CACHE_TTL_S: u64 = 3600;

/// Sponsor block in a league entry; feeds the header/footer placeholders.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SponsorConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// One entry of `leagues.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeagueConfig {
    pub name: String,
    pub league_id: LeagueId,
    pub year: Season,
    /// `espn_s2` cookie for private leagues (falls back to `ESPN_S2` env).
    #[serde(default)]
    pub espn_s2: Option<String>,
    /// `SWID` cookie for private leagues (falls back to `SWID` env).
    #[serde(default)]
    pub swid: Option<String>,
    /// Visible week label override, e.g. "Week 1 (Sep 13-15, 2025)".
    #[serde(default)]
    pub week_label: Option<String>,
    /// Whether this league gets blurbs at all.
    #[serde(default = "default_true")]
    pub blurbs: bool,
    #[serde(default)]
    pub sponsor: SponsorConfig,
}

fn default_true() -> bool {
    true
}

impl LeagueConfig {
    /// Cookie values, preferring the config entry over the environment.
    pub fn cookies(&self) -> (Option<String>, Option<String>) {
        let s2 = self
            .espn_s2
            .clone()
            .or_else(|| std::env::var(crate::ESPN_S2_ENV_VAR).ok());
        let swid = self
            .swid
            .clone()
            .or_else(|| std::env::var(crate::SWID_ENV_VAR).ok());
        (s2, swid)
    }
}

/// Load and parse the league config file.
pub fn load_leagues(path: &Path) -> Result<Vec<LeagueConfig>> {
    let raw = fs::read_to_string(path).map_err(|e| GazetteError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let leagues: Vec<LeagueConfig> =
        serde_json::from_str(&raw).map_err(|e| GazetteError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(leagues)
}

/// Pick which leagues a run covers: `--league NAME` wins, then `--multi`,
/// otherwise the first entry only.
pub fn select_leagues(
    leagues: Vec<LeagueConfig>,
    name: Option<&str>,
    multi: bool,
    path: &Path,
) -> Result<Vec<LeagueConfig>> {
    if let Some(name) = name {
        let known = leagues
            .iter()
            .map(|l| l.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let found = leagues.into_iter().find(|l| l.name == name);
        return match found {
            Some(cfg) => Ok(vec![cfg]),
            None => Err(GazetteError::UnknownLeague {
                name: name.to_string(),
                path: path.display().to_string(),
                known,
            }),
        };
    }
    if multi {
        return Ok(leagues);
    }
    Ok(leagues.into_iter().take(1).collect())
}

/// How deep a scoreboard fetch goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatsDepth {
    /// Matchup totals only.
    Basic,
    /// Totals plus rosters (enables top scorer / bust highlights).
    Full,
}

impl StatsDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsDepth::Basic => "basic",
            StatsDepth::Full => "full",
        }
    }
}

/// Cache behavior assembled from the `FORCE_LIVE` / `NO_CACHE` /
/// `CACHE_TTL_S` environment knobs.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// Skip cache reads; still write fresh responses.
    pub force_live: bool,
    /// Skip the cache entirely (no reads, no writes).
    pub no_cache: bool,
    /// How long a cached scoreboard stays fresh.
    pub ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            force_live: false,
            no_cache: false,
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_S),
        }
    }
}

impl CachePolicy {
    pub fn from_env() -> Self {
        let force_live = env_truthy(FORCE_LIVE_ENV_VAR);
        let no_cache = env_truthy(NO_CACHE_ENV_VAR);
        let ttl = std::env::var(CACHE_TTL_ENV_VAR)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_CACHE_TTL_S));
        Self {
            force_live,
            no_cache,
            ttl,
        }
    }
}

/// Render-time overrides from the environment.
#[derive(Debug, Clone, Default)]
pub struct RenderOverrides {
    pub footer_note: Option<String>,
    pub sponsor_line: Option<String>,
    pub stats_depth: Option<StatsDepth>,
}

impl RenderOverrides {
    pub fn from_env() -> Self {
        Self {
            footer_note: non_empty_env(FOOTER_NOTE_ENV_VAR),
            sponsor_line: non_empty_env(SPONSOR_LINE_ENV_VAR),
            stats_depth: non_empty_env(STATS_DEPTH_ENV_VAR).and_then(|v| parse_stats_depth(&v)),
        }
    }

    pub fn stats_depth(&self) -> StatsDepth {
        self.stats_depth.unwrap_or(StatsDepth::Full)
    }
}

pub fn parse_stats_depth(value: &str) -> Option<StatsDepth> {
    match value.trim().to_lowercase().as_str() {
        "basic" => Some(StatsDepth::Basic),
        "full" => Some(StatsDepth::Full),
        _ => None,
    }
}

/// `1`, `true`, `yes`, `on` count as set, case-insensitively.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn env_truthy(var: &str) -> bool {
    std::env::var(var).map(|v| is_truthy(&v)).unwrap_or(false)
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}
