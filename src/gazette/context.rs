//! The placeholder map handed to the docx renderer.
//!
//! Templates address matchups through enumerated keys (`MATCHUP3_HOME`,
//! `MATCHUP3_BLURB`, ...), so the game list is flattened into exactly
//! `slots` numbered groups, padding missing slots with empty strings.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::branding::MascotBook;
use crate::cli::types::Week;
use crate::config::{LeagueConfig, RenderOverrides};
use crate::espn::compute::{Awards, Matchup};

#[cfg(test)]
mod tests;

/// Integral scores print bare, everything else with one decimal.
pub fn fmt_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as i64)
    } else {
        format!("{:.1}", points)
    }
}

/// Filesystem-safe name: runs of anything outside `[A-Za-z0-9._-]` become `_`.
pub fn safe_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sub = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            out.push(c);
            last_was_sub = false;
        } else if !last_was_sub {
            out.push('_');
            last_was_sub = true;
        }
    }
    out
}

/// One rendered matchup slot: text fields plus resolved logo paths.
#[derive(Debug, Clone, Default)]
pub struct SlotContent {
    pub home: String,
    pub away: String,
    pub home_score: String,
    pub away_score: String,
    pub home_mascot: String,
    pub away_mascot: String,
    pub top_home: String,
    pub top_away: String,
    pub bust: String,
    pub blurb: String,
    pub home_logo: Option<PathBuf>,
    pub away_logo: Option<PathBuf>,
}

impl SlotContent {
    /// Combine a matchup, branding lookups, and an optional blurb.
    pub fn new(matchup: &Matchup, book: &MascotBook, blurb: Option<String>) -> Self {
        Self {
            home: matchup.home.name.clone(),
            away: matchup.away.name.clone(),
            home_score: fmt_points(matchup.home.score),
            away_score: fmt_points(matchup.away.score),
            home_mascot: book
                .mascot_for(&matchup.home.name)
                .unwrap_or_default()
                .to_string(),
            away_mascot: book
                .mascot_for(&matchup.away.name)
                .unwrap_or_default()
                .to_string(),
            top_home: matchup.home.top_scorer.clone().unwrap_or_default(),
            top_away: matchup.away.top_scorer.clone().unwrap_or_default(),
            bust: matchup.biggest_bust.clone().unwrap_or_default(),
            blurb: blurb.unwrap_or_default(),
            home_logo: book.logo_for(&matchup.home.name).map(|p| p.to_path_buf()),
            away_logo: book.logo_for(&matchup.away.name).map(|p| p.to_path_buf()),
        }
    }

    fn scoreline(&self) -> String {
        if self.home_score.is_empty() || self.away_score.is_empty() {
            format!("{} vs {}", self.home, self.away)
                .trim()
                .to_string()
        } else {
            format!(
                "{} {} \u{2013} {} {}",
                self.home, self.home_score, self.away, self.away_score
            )
        }
    }

    fn headline(&self) -> String {
        match (
            self.home_score.parse::<f64>(),
            self.away_score.parse::<f64>(),
        ) {
            (Ok(hs), Ok(aws)) => {
                let (winner, loser) = if hs >= aws {
                    (&self.home, &self.away)
                } else {
                    (&self.away, &self.home)
                };
                format!("{} def. {}", winner, loser)
            }
            _ => self.scoreline(),
        }
    }
}

/// The full placeholder map for one gazette, plus logo paths keyed by their
/// placeholder names (`MATCHUP1_HOME_LOGO`, ...).
#[derive(Debug, Clone, Default)]
pub struct GazetteContext {
    values: BTreeMap<String, String>,
    logos: BTreeMap<String, PathBuf>,
}

impl GazetteContext {
    /// Base keys: league, title, week, date, sponsor/footer lines, awards.
    pub fn build(
        cfg: &LeagueConfig,
        week: Week,
        week_label: Option<&str>,
        date: &str,
        awards: &Awards,
        overrides: &RenderOverrides,
    ) -> Self {
        let mut ctx = Self::default();

        let label = week_label
            .map(|l| l.to_string())
            .or_else(|| cfg.week_label.clone())
            .unwrap_or_else(|| format!("Week {}", week.as_u16()));

        ctx.set("LEAGUE_NAME", &cfg.name);
        ctx.set("TITLE", format!("{} \u{2014} {}", cfg.name, label));
        ctx.set("WEEK_LABEL", &label);
        ctx.set("WEEK_NUMBER", week.as_u16().to_string());
        ctx.set("GAZETTE_DATE", date);

        let sponsor_line = overrides
            .sponsor_line
            .clone()
            .or_else(|| cfg.sponsor.line.clone())
            .unwrap_or_default();
        let footer_note = overrides
            .footer_note
            .clone()
            .unwrap_or_else(|| sponsor_line.clone());
        ctx.set("SPONSOR_NAME", cfg.sponsor.name.clone().unwrap_or_default());
        ctx.set("SPONSOR_LINE", sponsor_line);
        ctx.set("FOOTER_NOTE", footer_note);

        let (top_team, top_note) = awards
            .top_score
            .as_ref()
            .map(|(t, p)| (t.clone(), fmt_points(*p)))
            .unwrap_or_default();
        let (low_team, low_note) = awards
            .low_score
            .as_ref()
            .map(|(t, p)| (t.clone(), fmt_points(*p)))
            .unwrap_or_default();
        let (gap_desc, gap_note) = awards
            .largest_gap
            .as_ref()
            .map(|(d, g)| (d.clone(), fmt_points(*g)))
            .unwrap_or_default();
        ctx.set("AWARD_TOP_TEAM", top_team);
        ctx.set("AWARD_TOP_NOTE", top_note);
        ctx.set("AWARD_CUPCAKE_TEAM", low_team);
        ctx.set("AWARD_CUPCAKE_NOTE", low_note);
        ctx.set("AWARD_KITTY_TEAM", gap_desc);
        ctx.set("AWARD_KITTY_NOTE", gap_note);

        ctx
    }

    /// Flatten the games into `MATCHUP{1..=slots}_*` keys. Slots past the end
    /// of the list get empty strings so leftover template tags render blank.
    pub fn add_matchup_slots(&mut self, slots: usize, games: &[SlotContent]) {
        let empty = SlotContent::default();
        for i in 1..=slots {
            let g = games.get(i - 1).unwrap_or(&empty);
            self.set(format!("MATCHUP{i}_HOME"), &g.home);
            self.set(format!("MATCHUP{i}_AWAY"), &g.away);
            self.set(format!("MATCHUP{i}_HS"), &g.home_score);
            self.set(format!("MATCHUP{i}_AS"), &g.away_score);
            self.set(format!("MATCHUP{i}_HOME_NAME"), &g.home);
            self.set(format!("MATCHUP{i}_AWAY_NAME"), &g.away);
            self.set(format!("MATCHUP{i}_HOME_MASCOT"), &g.home_mascot);
            self.set(format!("MATCHUP{i}_AWAY_MASCOT"), &g.away_mascot);
            self.set(format!("MATCHUP{i}_TOP_HOME"), &g.top_home);
            self.set(format!("MATCHUP{i}_TOP_AWAY"), &g.top_away);
            self.set(format!("MATCHUP{i}_BUST"), &g.bust);
            self.set(format!("MATCHUP{i}_BLURB"), &g.blurb);

            // Legacy/compatibility fields
            self.set(format!("MATCHUP{i}_TEAMS"), g.scoreline());
            self.set(format!("MATCHUP{i}_HEADLINE"), g.headline());
            self.set(format!("MATCHUP{i}_BODY"), &g.blurb);

            if let Some(path) = &g.home_logo {
                self.logos
                    .insert(format!("MATCHUP{i}_HOME_LOGO"), path.clone());
            }
            if let Some(path) = &g.away_logo {
                self.logos
                    .insert(format!("MATCHUP{i}_AWAY_LOGO"), path.clone());
            }
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn add_logo(&mut self, key: impl Into<String>, path: impl Into<PathBuf>) {
        self.logos.insert(key.into(), path.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn logos(&self) -> &BTreeMap<String, PathBuf> {
        &self.logos
    }
}
