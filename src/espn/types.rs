use crate::cli::types::{Season, Week};
use serde::{Deserialize, Serialize};


/// Lineup slot ids that do not count toward the weekly score.
pub const SLOT_BENCH: u8 = 20;
pub const SLOT_IR: u8 = 21;

/// Stat source ids on `player.stats` entries.
pub const STAT_SOURCE_ACTUAL: u8 = 0;
pub const STAT_SOURCE_PROJECTED: u8 = 1;

/// Top-level scoreboard payload (`view=mMatchupScore&view=mTeam[&view=mRoster]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreboardEnvelope {
    #[serde(rename = "scoringPeriodId")]
    pub scoring_period_id: Week,
    #[serde(rename = "seasonId")]
    pub season_id: Season,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
}

/// One scheduled matchup; either side is absent on a bye.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleEntry {
    #[serde(rename = "matchupPeriodId")]
    pub matchup_period_id: Week,
    #[serde(default)]
    pub home: Option<MatchupSide>,
    #[serde(default)]
    pub away: Option<MatchupSide>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchupSide {
    #[serde(rename = "teamId")]
    pub team_id: u32,
    #[serde(rename = "totalPoints", default)]
    pub total_points: f64,
    /// Present only with `view=mRoster` (stats depth `full`).
    #[serde(rename = "rosterForCurrentScoringPeriod", default)]
    pub roster: Option<Roster>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Roster {
    #[serde(default)]
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RosterEntry {
    #[serde(rename = "lineupSlotId")]
    pub lineup_slot_id: u8,
    #[serde(rename = "playerPoolEntry")]
    pub player_pool_entry: PlayerPoolEntry,
}

impl RosterEntry {
    /// Starters are everything outside the bench and IR slots.
    pub fn is_starter(&self) -> bool {
        self.lineup_slot_id != SLOT_BENCH && self.lineup_slot_id != SLOT_IR
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerPoolEntry {
    #[serde(rename = "appliedStatTotal", default)]
    pub applied_stat_total: f64,
    pub player: PlayerInfo,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerInfo {
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(rename = "defaultPositionId", default)]
    pub default_position_id: i8,
    #[serde(rename = "proTeamAbbreviation", default)]
    pub pro_team: Option<String>,
    #[serde(default)]
    pub stats: Vec<PlayerStatLine>,
}

impl PlayerInfo {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("Player")
    }

    /// Applied total for the given week and stat source, if present.
    pub fn applied_total(&self, week: Week, source: u8) -> Option<f64> {
        self.stats
            .iter()
            .find(|s| s.scoring_period_id == week && s.stat_source_id == source)
            .and_then(|s| s.applied_total)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerStatLine {
    #[serde(rename = "scoringPeriodId")]
    pub scoring_period_id: Week,
    #[serde(rename = "statSourceId")]
    pub stat_source_id: u8,
    #[serde(rename = "appliedTotal", default)]
    pub applied_total: Option<f64>,
}

/// Team id/name pair out of `view=mTeam`. Newer payloads carry `name`;
/// older ones split it into `location` + `nickname`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamEntry {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl TeamEntry {
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.trim().to_string();
        }
        let joined = format!(
            "{} {}",
            self.location.as_deref().unwrap_or("").trim(),
            self.nickname.as_deref().unwrap_or("").trim()
        );
        let joined = joined.trim();
        if joined.is_empty() {
            format!("Team {}", self.id)
        } else {
            joined.to_string()
        }
    }
}
