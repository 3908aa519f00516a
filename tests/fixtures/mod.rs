//! Test fixtures shared by the integration tests
#![allow(dead_code)]

use std::path::PathBuf;
use xg_ratings::types::{BaseRating, Fixture, FixtureCode, RankingRow, TeamId, TeamRecord};

pub fn base(team_id: TeamId, off: f64, def: f64) -> BaseRating {
    BaseRating {
        team_id,
        off_rating: off,
        def_rating: def,
    }
}

/// A fixture with xG on both sides
pub fn played(
    code: FixtureCode,
    event: u32,
    team_h: TeamId,
    team_a: TeamId,
    team_h_xg: f64,
    team_a_xg: f64,
) -> Fixture {
    Fixture {
        code,
        id: None,
        event: Some(event),
        finished: true,
        team_h,
        team_a,
        kickoff_time: None,
        team_h_xg: Some(team_h_xg),
        team_a_xg: Some(team_a_xg),
    }
}

/// A scheduled fixture without xG yet
pub fn unplayed(code: FixtureCode, event: u32, team_h: TeamId, team_a: TeamId) -> Fixture {
    Fixture {
        code,
        id: None,
        event: Some(event),
        finished: false,
        team_h,
        team_a,
        kickoff_time: None,
        team_h_xg: None,
        team_a_xg: None,
    }
}

pub fn team_records() -> Vec<TeamRecord> {
    vec![
        record(3, 1, "Arsenal", "ARS"),
        record(8, 7, "Chelsea", "CHE"),
        record(14, 12, "Liverpool", "LIV"),
        record(43, 13, "Man City", "MCI"),
        record(6, 18, "Spurs", "TOT"),
    ]
}

fn record(code: u32, id: TeamId, name: &str, short_name: &str) -> TeamRecord {
    TeamRecord {
        code: Some(code),
        id,
        name: name.to_string(),
        short_name: Some(short_name.to_string()),
    }
}

pub fn ranking(name: &str, off: &str, def: &str) -> RankingRow {
    RankingRow {
        name: name.to_string(),
        offensive_rating: off.to_string(),
        defensive_rating: def.to_string(),
    }
}

/// Ranking table as scraped: display names, one unknown team
pub fn rankings() -> Vec<RankingRow> {
    vec![
        ranking("Liverpool", "1", "3"),
        ranking("Arsenal", "2", "1"),
        ranking("Manchester City", "3", "2"),
        ranking("Chelsea", "4", "5"),
        ranking("Tottenham Hotspur", "5", "4"),
        ranking("Atlantis FC", "6", "6"),
    ]
}

/// Double round robin between `teams` teams with deterministic xG values
pub fn sample_season(teams: u32) -> (Vec<BaseRating>, Vec<Fixture>) {
    let bases = (1..=teams)
        .map(|id| {
            let spread = (id * 37 % 400) as f64;
            base(id, 1300.0 + spread, 1700.0 - spread)
        })
        .collect();

    let mut fixtures = Vec::new();
    let mut code: FixtureCode = 1000;
    let mut event = 1;
    for home in 1..=teams {
        for away in 1..=teams {
            if home == away {
                continue;
            }
            let h_xg = ((home * 7 + away * 3) % 30) as f64 / 10.0;
            let a_xg = ((home * 5 + away * 11) % 25) as f64 / 10.0;
            fixtures.push(played(code, event, home, away, h_xg, a_xg));
            code += 1;
            if code % (teams as FixtureCode / 2).max(1) == 0 {
                event += 1;
            }
        }
    }

    (bases, fixtures)
}

/// Fresh directory under the system temp dir
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("xg-ratings-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
