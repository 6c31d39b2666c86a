use super::*;
use crate::espn::compute::TeamScore;
use httpmock::prelude::*;
use serde_json::json;

fn sample_matchup() -> Matchup {
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

fn params(style: BlurbStyle) -> BlurbParams {
    BlurbParams {
        style,
        model: Some("gpt-4o-mini".to_string()),
        temperature: 0.8,
        words: 120,
    }
}

#[test]
fn test_clean_markdown() {
    let input = "## Recap\n**Goblins** rolled with *style*, `stats` don't lie.\n> quote\n~~old~~";
    let cleaned = clean_markdown(input);
    assert_eq!(
        cleaned,
        "Recap\nGoblins rolled with style, stats don't lie.\nquote\nold"
    );
}

#[test]
fn test_matchup_prompt_contains_data() {
    let prompt = matchup_prompt(&sample_matchup(), Week::new(5), 120);
    assert!(prompt.contains("Week 5"));
    assert!(prompt.contains("Gridiron Goblins 120.0 - Mudville Sluggers 80.5"));
    assert!(prompt.contains("Saquon Barkley"));
    assert!(prompt.contains("Dud Receiver"));
    assert!(prompt.contains("at most 120 words"));
}

#[test]
fn test_fallback_blurb_margin_buckets() {
    let mut m = sample_matchup();

    m.home.score = 100.0;
    m.away.score = 98.5;
    assert!(fallback_blurb(&m, Week::new(1), BlurbStyle::Default).contains("squeaked by"));

    m.away.score = 92.0;
    assert!(fallback_blurb(&m, Week::new(1), BlurbStyle::Default).contains("edged out"));

    m.away.score = 85.0;
    assert!(fallback_blurb(&m, Week::new(1), BlurbStyle::Default).contains("defeated"));

    m.away.score = 70.0;
    assert!(fallback_blurb(&m, Week::new(1), BlurbStyle::Default).contains("dominated"));

    m.away.score = 40.0;
    assert!(
        fallback_blurb(&m, Week::new(1), BlurbStyle::Default).contains("absolutely demolished")
    );
}

#[test]
fn test_fallback_blurb_winner_is_away_side() {
    let mut m = sample_matchup();
    m.home.score = 50.0;
    m.away.score = 90.0;
    let blurb = fallback_blurb(&m, Week::new(3), BlurbStyle::Default);
    assert!(blurb.starts_with("Week 3: Mudville Sluggers"));
}

#[test]
fn test_fallback_blurb_mascot_signature() {
    let blurb = fallback_blurb(&sample_matchup(), Week::new(5), BlurbStyle::Mascot);
    assert!(blurb.contains("\u{2014} Sabre, Gridiron Gazette"));

    let plain = fallback_blurb(&sample_matchup(), Week::new(5), BlurbStyle::Default);
    assert!(!plain.contains("Sabre"));
}

#[test]
fn test_system_prompts_differ_by_style() {
    assert!(system_prompt(BlurbStyle::Mascot).contains("Doberman"));
    assert!(system_prompt(BlurbStyle::Rtg).contains("1-10"));
    assert!(!system_prompt(BlurbStyle::Default).contains("Sabre"));
}

#[tokio::test]
async fn test_blurb_without_api_key_uses_fallback() {
    // BlurbWriter reads the key at construction; with_api_url on a mock URL
    // plus a cleared env gives the no-key path.
    let writer = BlurbWriter {
        client: reqwest::Client::new(),
        api_url: "http://localhost:9".to_string(),
        api_key: None,
    };
    let blurb = writer
        .blurb(&sample_matchup(), Week::new(5), &params(BlurbStyle::Default))
        .await;
    assert!(blurb.contains("absolutely demolished"));
}

#[tokio::test]
async fn test_blurb_calls_api_and_cleans_markdown() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "**Goblins** win big."}}
            ]
        }));
    });

    let writer = BlurbWriter {
        client: reqwest::Client::new(),
        api_url: format!("{}/v1/chat/completions", server.base_url()),
        api_key: Some("sk-test".to_string()),
    };
    let blurb = writer
        .blurb(&sample_matchup(), Week::new(5), &params(BlurbStyle::Default))
        .await;

    mock.assert();
    assert_eq!(blurb, "Goblins win big.");
}

#[tokio::test]
async fn test_blurb_api_error_falls_back() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(429);
    });

    let writer = BlurbWriter {
        client: reqwest::Client::new(),
        api_url: format!("{}/v1/chat/completions", server.base_url()),
        api_key: Some("sk-test".to_string()),
    };
    let blurb = writer
        .blurb(&sample_matchup(), Week::new(5), &params(BlurbStyle::Mascot))
        .await;

    assert!(blurb.contains("Sabre, Gridiron Gazette"));
}
