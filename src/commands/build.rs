//! The `build` command: fetch, derive, render, convert.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::branding::MascotBook;
use crate::cli::types::{PdfEngine, Week};
use crate::config::{
    load_leagues, select_leagues, CachePolicy, LeagueConfig, RenderOverrides,
};
use crate::espn::compute::{build_matchups, compute_awards, Matchup, TeamScore};
use crate::espn::http::EspnClient;
use crate::espn::scoreboard::{effective_week, load_or_fetch_scoreboard};
use crate::gazette::{safe_filename, GazetteContext, SlotContent};
use crate::llm::{BlurbParams, BlurbWriter};
use crate::render::{convert_to_pdf, render_docx};
use crate::Result;


/// Everything the build pipeline needs, assembled from the CLI in `main`.
pub struct BuildParams {
    pub leagues_path: PathBuf,
    pub league: Option<String>,
    pub multi: bool,
    pub week: Option<Week>,
    pub week_label: Option<String>,
    pub date: Option<String>,
    pub template: PathBuf,
    pub out_dir: PathBuf,
    pub slots: usize,
    pub logo_mm: f64,
    pub print_logo_map: bool,
    pub pdf: bool,
    pub pdf_engine: PdfEngine,
    pub llm_blurbs: bool,
    pub blurb: BlurbParams,
    pub branding_test: bool,
    pub blurb_test: bool,
}

/// Where one gazette lands: `{out}/{league}/{date}/Gazette_{week}.docx`.
pub fn output_path(out_dir: &Path, league: &str, date: &str, week_label: &str) -> PathBuf {
    out_dir
        .join(safe_filename(league))
        .join(date)
        .join(format!("Gazette_{}.docx", safe_filename(week_label)))
}

fn team_names(matchups: &[Matchup]) -> Vec<String> {
    let mut names = Vec::with_capacity(matchups.len() * 2);
    for m in matchups {
        names.push(m.home.name.clone());
        names.push(m.away.name.clone());
    }
    names
}

/// Synthetic matchup for `--blurb-test`.
fn sample_matchup() -> Matchup {
    Matchup {
        home: TeamScore {
            name: "Testville Tornadoes".to_string(),
            score: 112.4,
            top_scorer: Some("Sample Star 29.8 pts (WR)".to_string()),
        },
        away: TeamScore {
            name: "Mock City Mashers".to_string(),
            score: 98.6,
            top_scorer: Some("Backup Bob 21.0 pts (RB)".to_string()),
        },
        biggest_bust: Some("Flop Johnson (TE) 2.1 vs 11.4 proj".to_string()),
    }
}

async fn run_blurb_test(params: &BuildParams) -> Result<()> {
    let writer = BlurbWriter::new();
    if !writer.has_api_key() {
        warn!("OPENAI_API_KEY not set, showing the fallback blurb");
    }
    let blurb = writer
        .blurb(&sample_matchup(), Week::new(1), &params.blurb)
        .await;
    println!("--- blurb test ({} style) ---", params.blurb.style);
    println!("{blurb}");
    Ok(())
}

async fn build_blurbs(
    cfg: &LeagueConfig,
    matchups: &[Matchup],
    week: Week,
    params: &BuildParams,
) -> Vec<Option<String>> {
    if !params.llm_blurbs || !cfg.blurbs {
        return vec![None; matchups.len()];
    }
    let writer = BlurbWriter::new();
    if !writer.has_api_key() {
        warn!(
            "OPENAI_API_KEY not set, using fallback blurbs for {}",
            cfg.name
        );
    }
    let mut blurbs = Vec::with_capacity(matchups.len());
    for m in matchups {
        blurbs.push(Some(writer.blurb(m, week, &params.blurb).await));
    }
    blurbs
}

async fn build_one_league(
    cfg: &LeagueConfig,
    client: &EspnClient,
    book: &MascotBook,
    policy: CachePolicy,
    overrides: &RenderOverrides,
    date: &str,
    params: &BuildParams,
) -> Result<Vec<PathBuf>> {
    let (envelope, _status) = load_or_fetch_scoreboard(
        client,
        cfg,
        params.week,
        overrides.stats_depth(),
        policy,
    )
    .await?;
    let week = effective_week(&envelope, params.week);
    let matchups = build_matchups(&envelope, week);

    if matchups.is_empty() {
        warn!(
            "No games returned for {} (week={}). If private, ensure espn_s2/SWID cookies in {}.",
            cfg.name,
            week,
            params.leagues_path.display()
        );
    }

    let teams = team_names(&matchups);
    if params.branding_test {
        book.print_logo_map(&teams);
        return Ok(Vec::new());
    }
    if params.print_logo_map {
        book.print_logo_map(&teams);
    }

    let blurbs = build_blurbs(cfg, &matchups, week, params).await;
    let games: Vec<SlotContent> = matchups
        .iter()
        .zip(blurbs)
        .map(|(m, blurb)| SlotContent::new(m, book, blurb))
        .collect();

    let awards = compute_awards(&matchups);
    let mut ctx = GazetteContext::build(
        cfg,
        week,
        params.week_label.as_deref(),
        date,
        &awards,
        overrides,
    );
    ctx.add_matchup_slots(params.slots, &games);

    let week_label = ctx.get("WEEK_LABEL").unwrap_or("Week").to_string();
    let docx = output_path(&params.out_dir, &cfg.name, date, &week_label);
    render_docx(&params.template, &docx, &ctx, params.logo_mm)?;
    info!("gazette rendered: {}", docx.display());

    let mut outputs = vec![docx.clone()];
    if params.pdf {
        if let Some(pdf) = convert_to_pdf(&docx, params.pdf_engine) {
            outputs.push(pdf);
        }
    }
    Ok(outputs)
}

pub async fn handle_build(params: BuildParams) -> Result<()> {
    if params.blurb_test {
        return run_blurb_test(&params).await;
    }

    let leagues = load_leagues(&params.leagues_path)?;
    let selected = select_leagues(
        leagues,
        params.league.as_deref(),
        params.multi,
        &params.leagues_path,
    )?;

    let policy = CachePolicy::from_env();
    let overrides = RenderOverrides::from_env();
    let book = MascotBook::load(Path::new("."));
    let client = EspnClient::new();
    let date = params
        .date
        .clone()
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

    let mut outputs: Vec<PathBuf> = Vec::new();
    for cfg in &selected {
        outputs.extend(
            build_one_league(cfg, &client, &book, policy, &overrides, &date, &params).await?,
        );
    }

    if !params.branding_test {
        println!("\nGenerated files:");
        for p in &outputs {
            println!(" \u{2022} {}", p.display());
        }
    }
    Ok(())
}
