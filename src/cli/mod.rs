//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{BlurbStyle, PdfEngine, Week};

/// League selection and input paths shared between commands
#[derive(Debug, Args)]
pub struct LeagueOpts {
    /// League config file.
    #[clap(long, default_value = "leagues.json")]
    pub leagues: PathBuf,

    /// Run only this league by name.
    #[clap(long)]
    pub league: Option<String>,

    /// Process all leagues in the config file.
    #[clap(long)]
    pub multi: bool,
}

/// LLM blurb generation parameters
#[derive(Debug, Args)]
pub struct BlurbOpts {
    /// Generate LLM-powered matchup blurbs (needs `OPENAI_API_KEY`).
    #[clap(long)]
    pub llm_blurbs: bool,

    /// Target blurb length in words.
    #[clap(long, default_value_t = 200)]
    pub blurb_words: u32,

    /// OpenAI model name (or set `OPENAI_MODEL` env var).
    #[clap(long)]
    pub model: Option<String>,

    /// Sampling temperature.
    #[clap(long, default_value_t = 0.8)]
    pub temperature: f64,

    /// Blurb voice.
    #[clap(long, default_value_t = BlurbStyle::default())]
    pub blurb_style: BlurbStyle,
}

#[derive(Debug, Parser)]
#[clap(name = "gazette", about = "Gridiron Gazette (ESPN -> DOCX/PDF)")]
pub struct Gazette {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose logging.
    #[clap(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the weekly gazette for one or more leagues.
    ///
    /// Fetches the week's matchups from ESPN (cached; see `FORCE_LIVE`,
    /// `NO_CACHE`, `CACHE_TTL_S`), fills the enumerated `MATCHUPi_*`
    /// placeholders of the docx template, and optionally exports a PDF.
    Build {
        #[clap(flatten)]
        leagues: LeagueOpts,

        /// Override ESPN week (default: current scoring period).
        #[clap(long, short)]
        week: Option<Week>,

        /// Visible label, e.g. "Week 1 (Sep 13-15, 2025)".
        #[clap(long)]
        week_label: Option<String>,

        /// Output folder date (default: today, e.g. "2025-09-15").
        #[clap(long)]
        date: Option<String>,

        /// Docx template path.
        #[clap(long, default_value = "recap_template.docx")]
        template: PathBuf,

        /// Output directory root.
        #[clap(long, default_value = "recaps")]
        out_dir: PathBuf,

        /// How many MATCHUPi_* slots exist in the template.
        #[clap(long, default_value_t = 12)]
        slots: usize,

        /// Logo width (mm) for inline images.
        #[clap(long, default_value_t = 18.0)]
        logo_mm: f64,

        /// Print team -> logo resolution and continue.
        #[clap(long)]
        print_logo_map: bool,

        /// Also export PDF.
        #[clap(long)]
        pdf: bool,

        /// Conversion backend for --pdf.
        #[clap(long, default_value_t = PdfEngine::default())]
        pdf_engine: PdfEngine,

        #[clap(flatten)]
        blurbs: BlurbOpts,

        /// Resolve mascots/logos for every team this week, then exit.
        #[clap(long)]
        branding_test: bool,

        /// Generate one sample blurb, print it, then exit.
        #[clap(long)]
        blurb_test: bool,
    },

    /// Check the local setup: config, template slots, logos, external tools.
    Doctor {
        #[clap(flatten)]
        leagues: LeagueOpts,

        /// Docx template path.
        #[clap(long, default_value = "recap_template.docx")]
        template: PathBuf,
    },

    /// Remove the scoreboard disk cache.
    Clean {
        /// Also remove the output directory.
        #[clap(long)]
        outputs: bool,

        /// Output directory root (used with --outputs).
        #[clap(long, default_value = "recaps")]
        out_dir: PathBuf,
    },
}
