use super::*;
use crate::cli::types::{LeagueId, Season};
use crate::config::SponsorConfig;
use crate::espn::compute::TeamScore;

fn league() -> LeagueConfig {
    LeagueConfig {
        name: "Sunday League".to_string(),
        league_id: LeagueId::new(123456),
        year: Season::new(2025),
        espn_s2: None,
        swid: None,
        week_label: None,
        blurbs: true,
        sponsor: SponsorConfig {
            name: Some("Joe's Deli".to_string()),
            line: Some("Brought to you by Joe's Deli".to_string()),
            logo: None,
        },
    }
}

fn matchup() -> Matchup {
    Matchup {
        home: TeamScore {
            name: "Gridiron Goblins".to_string(),
            score: 120.0,
            top_scorer: Some("Saquon Barkley 31.5 pts (RB)".to_string()),
        },
        away: TeamScore {
            name: "Mudville Sluggers".to_string(),
            score: 80.5,
            top_scorer: None,
        },
        biggest_bust: Some("Dud Receiver (WR) 1.2 vs 15.5 proj".to_string()),
    }
}

fn awards() -> Awards {
    Awards {
        top_score: Some(("Gridiron Goblins".to_string(), 120.0)),
        low_score: Some(("Mudville Sluggers".to_string(), 80.5)),
        largest_gap: Some((
            "Gridiron Goblins 120.0 \u{2013} Mudville Sluggers 80.5".to_string(),
            39.5,
        )),
    }
}

fn empty_book() -> (tempfile::TempDir, MascotBook) {
    let dir = tempfile::tempdir().unwrap();
    let book = MascotBook::load(dir.path());
    (dir, book)
}

#[test]
fn test_fmt_points() {
    assert_eq!(fmt_points(120.0), "120");
    assert_eq!(fmt_points(80.5), "80.5");
    assert_eq!(fmt_points(0.0), "0");
    assert_eq!(fmt_points(99.94), "99.9");
}

#[test]
fn test_safe_filename() {
    assert_eq!(safe_filename("Week 5"), "Week_5");
    assert_eq!(safe_filename("Sunday League!!"), "Sunday_League_");
    assert_eq!(safe_filename("a/b\\c: d"), "a_b_c_d");
    assert_eq!(safe_filename("plain-name_1.2"), "plain-name_1.2");
}

#[test]
fn test_build_base_context() {
    let ctx = GazetteContext::build(
        &league(),
        Week::new(5),
        None,
        "2025-10-07",
        &awards(),
        &RenderOverrides::default(),
    );

    assert_eq!(ctx.get("LEAGUE_NAME"), Some("Sunday League"));
    assert_eq!(ctx.get("WEEK_LABEL"), Some("Week 5"));
    assert_eq!(ctx.get("WEEK_NUMBER"), Some("5"));
    assert_eq!(ctx.get("TITLE"), Some("Sunday League \u{2014} Week 5"));
    assert_eq!(ctx.get("GAZETTE_DATE"), Some("2025-10-07"));
    assert_eq!(ctx.get("SPONSOR_NAME"), Some("Joe's Deli"));
    assert_eq!(ctx.get("SPONSOR_LINE"), Some("Brought to you by Joe's Deli"));
    // Footer falls back to the sponsor line
    assert_eq!(ctx.get("FOOTER_NOTE"), Some("Brought to you by Joe's Deli"));

    assert_eq!(ctx.get("AWARD_TOP_TEAM"), Some("Gridiron Goblins"));
    assert_eq!(ctx.get("AWARD_TOP_NOTE"), Some("120"));
    assert_eq!(ctx.get("AWARD_CUPCAKE_TEAM"), Some("Mudville Sluggers"));
    assert_eq!(ctx.get("AWARD_CUPCAKE_NOTE"), Some("80.5"));
    assert_eq!(ctx.get("AWARD_KITTY_NOTE"), Some("39.5"));
}

#[test]
fn test_week_label_precedence() {
    // Explicit label beats config label beats derived label
    let mut cfg = league();
    cfg.week_label = Some("Rivalry Week".to_string());

    let ctx = GazetteContext::build(
        &cfg,
        Week::new(5),
        Some("Week 5 (Oct 5-7)"),
        "2025-10-07",
        &Awards::default(),
        &RenderOverrides::default(),
    );
    assert_eq!(ctx.get("WEEK_LABEL"), Some("Week 5 (Oct 5-7)"));

    let ctx = GazetteContext::build(
        &cfg,
        Week::new(5),
        None,
        "2025-10-07",
        &Awards::default(),
        &RenderOverrides::default(),
    );
    assert_eq!(ctx.get("WEEK_LABEL"), Some("Rivalry Week"));
}

#[test]
fn test_env_overrides_win() {
    let overrides = RenderOverrides {
        footer_note: Some("Footer from env".to_string()),
        sponsor_line: Some("Sponsor from env".to_string()),
        stats_depth: None,
    };
    let ctx = GazetteContext::build(
        &league(),
        Week::new(5),
        None,
        "2025-10-07",
        &Awards::default(),
        &overrides,
    );
    assert_eq!(ctx.get("SPONSOR_LINE"), Some("Sponsor from env"));
    assert_eq!(ctx.get("FOOTER_NOTE"), Some("Footer from env"));
}

#[test]
fn test_add_matchup_slots_fills_and_pads() {
    let (_dir, book) = empty_book();
    let games = vec![SlotContent::new(&matchup(), &book, Some("Big win.".to_string()))];

    let mut ctx = GazetteContext::build(
        &league(),
        Week::new(5),
        None,
        "2025-10-07",
        &Awards::default(),
        &RenderOverrides::default(),
    );
    ctx.add_matchup_slots(3, &games);

    assert_eq!(ctx.get("MATCHUP1_HOME"), Some("Gridiron Goblins"));
    assert_eq!(ctx.get("MATCHUP1_AWAY"), Some("Mudville Sluggers"));
    assert_eq!(ctx.get("MATCHUP1_HS"), Some("120"));
    assert_eq!(ctx.get("MATCHUP1_AS"), Some("80.5"));
    assert_eq!(
        ctx.get("MATCHUP1_TOP_HOME"),
        Some("Saquon Barkley 31.5 pts (RB)")
    );
    assert_eq!(ctx.get("MATCHUP1_BLURB"), Some("Big win."));
    assert_eq!(ctx.get("MATCHUP1_BODY"), Some("Big win."));
    assert_eq!(
        ctx.get("MATCHUP1_TEAMS"),
        Some("Gridiron Goblins 120 \u{2013} Mudville Sluggers 80.5")
    );
    assert_eq!(
        ctx.get("MATCHUP1_HEADLINE"),
        Some("Gridiron Goblins def. Mudville Sluggers")
    );

    // Unfilled slots exist and are empty
    assert_eq!(ctx.get("MATCHUP2_HOME"), Some(""));
    assert_eq!(ctx.get("MATCHUP3_BLURB"), Some(""));
    // No slot 4 keys at slots=3
    assert_eq!(ctx.get("MATCHUP4_HOME"), None);
}

#[test]
fn test_slot_logos_resolved_into_context() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("logos")).unwrap();
    std::fs::write(dir.path().join("logos/gridiron_goblins.png"), b"png").unwrap();
    let book = MascotBook::load(dir.path());

    let games = vec![SlotContent::new(&matchup(), &book, None)];
    let mut ctx = GazetteContext::default();
    ctx.add_matchup_slots(1, &games);

    assert!(ctx.logos().contains_key("MATCHUP1_HOME_LOGO"));
    assert!(!ctx.logos().contains_key("MATCHUP1_AWAY_LOGO"));
}

#[test]
fn test_headline_away_winner() {
    let mut m = matchup();
    m.home.score = 70.0;
    m.away.score = 90.0;
    let (_dir, book) = empty_book();
    let slot = SlotContent::new(&m, &book, None);
    assert_eq!(slot.headline(), "Mudville Sluggers def. Gridiron Goblins");
}
