use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, COOKIE},
    Client,
};
use tracing::{debug, warn};

use crate::cli::types::{LeagueId, Season, Week};
use crate::config::StatsDepth;
use crate::espn::types::ScoreboardEnvelope;
use crate::Result;

#[cfg(test)]
mod tests;

/// Base path for ESPN Fantasy Football v3 API.
pub const FFL_BASE_URL: &str = "https://lm-api-reads.fantasy.espn.com/apis/v3/games/ffl";

const MAX_RETRIES: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Thin ESPN API client; the base URL is swappable for tests.
pub struct EspnClient {
    client: Client,
    base_url: String,
}

impl Default for EspnClient {
    fn default() -> Self {
        Self::new()
    }
}

impl EspnClient {
    pub fn new() -> Self {
        Self::with_base_url(FFL_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Headers for a scoreboard request; private leagues need the
    /// `espn_s2` + `SWID` cookie pair.
    fn headers(espn_s2: Option<&str>, swid: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let (Some(s2), Some(swid)) = (espn_s2, swid) {
            let cookie = format!("espn_s2={}; SWID={}", s2, swid);
            headers.insert(COOKIE, HeaderValue::from_str(&cookie)?);
        }
        Ok(headers)
    }

    /// Fetch the scoreboard for a league week with retry/backoff.
    ///
    /// `week == None` asks for the current scoring period. Depth `full` adds
    /// `view=mRoster` so lineups come back for highlight computation.
    pub async fn get_scoreboard(
        &self,
        league_id: LeagueId,
        season: Season,
        week: Option<Week>,
        depth: StatsDepth,
        espn_s2: Option<&str>,
        swid: Option<&str>,
    ) -> Result<ScoreboardEnvelope> {
        let url = format!(
            "{}/seasons/{}/segments/0/leagues/{}",
            self.base_url, season, league_id
        );

        let mut params: Vec<(&str, String)> = vec![
            ("view", "mMatchupScore".to_string()),
            ("view", "mTeam".to_string()),
        ];
        if depth == StatsDepth::Full {
            params.push(("view", "mRoster".to_string()));
        }
        if let Some(w) = week {
            params.push(("scoringPeriodId", w.as_u16().to_string()));
        }

        let mut attempt = 0;
        loop {
            let res = self
                .client
                .get(&url)
                .headers(Self::headers(espn_s2, swid)?)
                .query(&params)
                .send()
                .await
                .and_then(|r| r.error_for_status());

            match res {
                Ok(resp) => {
                    debug!(league = %league_id, "scoreboard fetched on attempt {}", attempt + 1);
                    return Ok(resp.json::<ScoreboardEnvelope>().await?);
                }
                Err(e) => {
                    warn!(
                        "scoreboard attempt {}/{} failed for league {}: {}",
                        attempt + 1,
                        MAX_RETRIES,
                        league_id,
                        e
                    );
                    attempt += 1;
                    if attempt >= MAX_RETRIES {
                        return Err(e.into());
                    }
                    let delay = RETRY_BASE_DELAY * 2u32.pow(attempt - 1);
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
