use super::*;
use httpmock::prelude::*;
use serde_json::json;

fn scoreboard_body() -> serde_json::Value {
    json!({
        "scoringPeriodId": 3,
        "seasonId": 2025,
        "schedule": [
            {
                "matchupPeriodId": 3,
                "home": {"teamId": 1, "totalPoints": 112.2},
                "away": {"teamId": 2, "totalPoints": 96.4}
            }
        ],
        "teams": [
            {"id": 1, "name": "Gridiron Goblins"},
            {"id": 2, "name": "Mudville Sluggers"}
        ]
    })
}

#[tokio::test]
async fn test_get_scoreboard_basic_depth() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/seasons/2025/segments/0/leagues/123456")
            .query_param("scoringPeriodId", "3");
        then.status(200).json_body(scoreboard_body());
    });

    let client = EspnClient::with_base_url(server.base_url());
    let env = client
        .get_scoreboard(
            LeagueId::new(123456),
            Season::new(2025),
            Some(Week::new(3)),
            StatsDepth::Basic,
            None,
            None,
        )
        .await
        .unwrap();

    mock.assert();
    assert_eq!(env.schedule.len(), 1);
    assert_eq!(env.teams[0].display_name(), "Gridiron Goblins");
}

#[tokio::test]
async fn test_get_scoreboard_full_depth_requests_rosters() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/seasons/2025/segments/0/leagues/321")
            .query_param("view", "mMatchupScore")
            .query_param("view", "mTeam")
            .query_param("view", "mRoster");
        then.status(200).json_body(scoreboard_body());
    });

    let client = EspnClient::with_base_url(server.base_url());
    client
        .get_scoreboard(
            LeagueId::new(321),
            Season::new(2025),
            Some(Week::new(3)),
            StatsDepth::Full,
            None,
            None,
        )
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_get_scoreboard_basic_depth_omits_rosters() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/seasons/2025/segments/0/leagues/322")
            .matches(|req| {
                let q = req.query_params.clone().unwrap_or_default();
                q.iter().any(|(k, v)| k == "view" && v == "mMatchupScore")
                    && !q.iter().any(|(k, v)| k == "view" && v == "mRoster")
            });
        then.status(200).json_body(scoreboard_body());
    });

    let client = EspnClient::with_base_url(server.base_url());
    client
        .get_scoreboard(
            LeagueId::new(322),
            Season::new(2025),
            Some(Week::new(3)),
            StatsDepth::Basic,
            None,
            None,
        )
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_get_scoreboard_current_week_omits_period_param() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/seasons/2025/segments/0/leagues/777")
            .matches(|req| {
                let q = req.query_params.clone().unwrap_or_default();
                !q.iter().any(|(k, _)| k == "scoringPeriodId")
            });
        then.status(200).json_body(scoreboard_body());
    });

    let client = EspnClient::with_base_url(server.base_url());
    let env = client
        .get_scoreboard(
            LeagueId::new(777),
            Season::new(2025),
            None,
            StatsDepth::Basic,
            None,
            None,
        )
        .await
        .unwrap();

    mock.assert();
    // Current week reported by the payload itself
    assert_eq!(env.scoring_period_id.as_u16(), 3);
}

#[tokio::test]
async fn test_get_scoreboard_sends_cookies() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/seasons/2025/segments/0/leagues/55")
            .header("cookie", "espn_s2=secret; SWID={ABC}");
        then.status(200).json_body(scoreboard_body());
    });

    let client = EspnClient::with_base_url(server.base_url());
    client
        .get_scoreboard(
            LeagueId::new(55),
            Season::new(2025),
            Some(Week::new(3)),
            StatsDepth::Basic,
            Some("secret"),
            Some("{ABC}"),
        )
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_get_scoreboard_retries_then_succeeds() {
    let server = MockServer::start();
    // First responses are 500s; the mock framework serves the same mock each
    // time, so assert on call count instead of ordering.
    let failing = server.mock(|when, then| {
        when.method(GET).path("/seasons/2025/segments/0/leagues/99");
        then.status(500);
    });

    let client = EspnClient::with_base_url(server.base_url());
    let res = client
        .get_scoreboard(
            LeagueId::new(99),
            Season::new(2025),
            Some(Week::new(1)),
            StatsDepth::Basic,
            None,
            None,
        )
        .await;

    assert!(res.is_err());
    failing.assert_hits(3);
}
