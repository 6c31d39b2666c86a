//! Turn the raw scoreboard payload into gazette-ready matchups and awards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cli::types::Week;
use crate::espn::types::{
    MatchupSide, RosterEntry, ScoreboardEnvelope, STAT_SOURCE_ACTUAL, STAT_SOURCE_PROJECTED,
};


/// Lineup slot id -> short label, for top-scorer lines.
pub fn slot_name(slot_id: u8) -> &'static str {
    match slot_id {
        0 => "QB",
        2 => "RB",
        4 => "WR",
        6 => "TE",
        7 => "OP",
        16 => "D/ST",
        17 => "K",
        23 => "FLEX",
        20 => "BE",
        21 => "IR",
        _ => "FLEX",
    }
}

/// Default position id -> label, for bust lines.
pub fn position_name(position_id: i8) -> &'static str {
    match position_id {
        1 => "QB",
        2 => "RB",
        3 => "WR",
        4 => "TE",
        5 => "K",
        16 => "D/ST",
        _ => "FLEX",
    }
}

/// One side of a matchup as the gazette sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamScore {
    pub name: String,
    pub score: f64,
    /// "Josh Allen 28.4 pts (QB)" for the best starter, when rosters came back.
    pub top_scorer: Option<String>,
}

/// A completed matchup with derived highlights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matchup {
    pub home: TeamScore,
    pub away: TeamScore,
    /// Worst (actual - projected) starter across both lineups.
    pub biggest_bust: Option<String>,
}

impl Matchup {
    pub fn margin(&self) -> f64 {
        (self.home.score - self.away.score).abs()
    }

    pub fn winner(&self) -> &TeamScore {
        if self.home.score >= self.away.score {
            &self.home
        } else {
            &self.away
        }
    }

    pub fn loser(&self) -> &TeamScore {
        if self.home.score >= self.away.score {
            &self.away
        } else {
            &self.home
        }
    }
}

/// Weekly awards derived from team totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Awards {
    /// Highest team total: (team, points).
    pub top_score: Option<(String, f64)>,
    /// Lowest team total: (team, points).
    pub low_score: Option<(String, f64)>,
    /// Largest margin: (scoreline description, gap).
    pub largest_gap: Option<(String, f64)>,
}

/// Best starter in a lineup, formatted like "Josh Allen 28.4 pts (QB)".
fn top_scorer(entries: &[RosterEntry]) -> Option<String> {
    entries
        .iter()
        .filter(|e| e.is_starter())
        .max_by(|a, b| {
            a.player_pool_entry
                .applied_stat_total
                .total_cmp(&b.player_pool_entry.applied_stat_total)
        })
        .map(|e| {
            format!(
                "{} {:.1} pts ({})",
                e.player_pool_entry.player.display_name(),
                e.player_pool_entry.applied_stat_total,
                slot_name(e.lineup_slot_id)
            )
        })
}

/// Starter with the worst (actual - projected) delta across both lineups.
fn biggest_bust(week: Week, home: &[RosterEntry], away: &[RosterEntry]) -> Option<String> {
    home.iter()
        .chain(away.iter())
        .filter(|e| e.is_starter())
        .filter_map(|e| {
            let player = &e.player_pool_entry.player;
            let actual = player
                .applied_total(week, STAT_SOURCE_ACTUAL)
                .unwrap_or(e.player_pool_entry.applied_stat_total);
            let projected = player.applied_total(week, STAT_SOURCE_PROJECTED)?;
            let label = match player.pro_team.as_deref() {
                Some(team) if !team.is_empty() => format!(
                    "{} ({} {}) {:.1} vs {:.1} proj",
                    player.display_name(),
                    position_name(player.default_position_id),
                    team,
                    actual,
                    projected
                ),
                _ => format!(
                    "{} ({}) {:.1} vs {:.1} proj",
                    player.display_name(),
                    position_name(player.default_position_id),
                    actual,
                    projected
                ),
            };
            Some((actual - projected, label))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, label)| label)
}

fn side_to_score(side: &MatchupSide, names: &HashMap<u32, String>) -> TeamScore {
    let name = names
        .get(&side.team_id)
        .cloned()
        .unwrap_or_else(|| format!("Team {}", side.team_id));
    let top = side
        .roster
        .as_ref()
        .and_then(|r| top_scorer(&r.entries));
    TeamScore {
        name,
        score: side.total_points,
        top_scorer: top,
    }
}

/// Extract the week's matchups from the envelope. Entries for other matchup
/// periods and byes (one side missing) are skipped.
pub fn build_matchups(envelope: &ScoreboardEnvelope, week: Week) -> Vec<Matchup> {
    let names: HashMap<u32, String> = envelope
        .teams
        .iter()
        .map(|t| (t.id, t.display_name()))
        .collect();

    envelope
        .schedule
        .iter()
        .filter(|entry| entry.matchup_period_id == week)
        .filter_map(|entry| {
            let home = entry.home.as_ref()?;
            let away = entry.away.as_ref()?;
            let empty = Vec::new();
            let home_entries = home.roster.as_ref().map(|r| &r.entries).unwrap_or(&empty);
            let away_entries = away.roster.as_ref().map(|r| &r.entries).unwrap_or(&empty);
            Some(Matchup {
                home: side_to_score(home, &names),
                away: side_to_score(away, &names),
                biggest_bust: biggest_bust(week, home_entries, away_entries),
            })
        })
        .collect()
}

/// Weekly awards from team totals: top score, lowest score, largest margin.
pub fn compute_awards(matchups: &[Matchup]) -> Awards {
    if matchups.is_empty() {
        return Awards::default();
    }

    let mut by_team: Vec<(&str, f64)> = Vec::with_capacity(matchups.len() * 2);
    for m in matchups {
        by_team.push((&m.home.name, m.home.score));
        by_team.push((&m.away.name, m.away.score));
    }

    let top = by_team
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(t, p)| (t.to_string(), *p));
    let low = by_team
        .iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(t, p)| (t.to_string(), *p));
    let gap = matchups
        .iter()
        .max_by(|a, b| a.margin().total_cmp(&b.margin()))
        .map(|m| {
            (
                format!(
                    "{} {:.1} \u{2013} {} {:.1}",
                    m.home.name, m.home.score, m.away.name, m.away.score
                ),
                m.margin(),
            )
        });

    Awards {
        top_score: top,
        low_score: low,
        largest_gap: gap,
    }
}
