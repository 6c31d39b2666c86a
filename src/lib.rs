//! Gridiron Gazette Library
//!
//! Builds a weekly fantasy-football recap document ("gazette") for one or
//! more ESPN leagues: fetch the week's matchups from the ESPN Fantasy v3 API,
//! derive highlights and awards, optionally generate narrative blurbs via the
//! OpenAI API, and render a Word/PDF document from a placeholder template.
//!
//! ## Features
//!
//! - **Scoreboard Retrieval**: Weekly matchup scores and lineups from ESPN,
//!   with retry/backoff and a two-tier (memory + disk) cache
//! - **Highlights**: Top scorer per side, biggest bust, weekly awards
//! - **Blurbs**: LLM-generated matchup recaps in several voices, with a
//!   deterministic fallback when no API key is configured
//! - **Branding**: Mascot and logo resolution from a branding directory tree
//! - **Rendering**: `MATCHUPi_*` placeholder substitution and inline logo
//!   images straight into the docx OOXML, plus PDF export via LibreOffice
//!
//! ## Environment Configuration
//!
//! Cache knobs: `FORCE_LIVE`, `NO_CACHE`, `CACHE_TTL_S`. Fetch depth:
//! `STATS_DEPTH` (`basic`|`full`). Render overrides: `FOOTER_NOTE`,
//! `SPONSOR_LINE`. Private-league cookies: `ESPN_S2`, `SWID`. LLM:
//! `OPENAI_API_KEY`, `OPENAI_MODEL`.

pub mod branding;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod espn;
pub mod gazette;
pub mod llm;
pub mod render;

// Re-export commonly used types
pub use cli::types::{BlurbStyle, LeagueId, PdfEngine, Season, Week};
pub use config::{CachePolicy, LeagueConfig, RenderOverrides};
pub use error::{GazetteError, Result};
pub use espn::compute::{Awards, Matchup, TeamScore};

pub const ESPN_S2_ENV_VAR: &str = "ESPN_S2";
pub const SWID_ENV_VAR: &str = "SWID";
pub const OPENAI_API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const OPENAI_MODEL_ENV_VAR: &str = "OPENAI_MODEL";
