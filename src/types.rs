//! Common types used throughout the rating engine

use serde::{Deserialize, Deserializer, Serialize};

/// Canonical team identifier
pub type TeamId = u32;

/// Unique, stable fixture identifier
pub type FixtureCode = i64;

/// Gameweek number; defines chronological order
pub type Event = u32;

/// Which half of a team's rating a computation is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingAxis {
    Offense,
    Defense,
}

impl std::fmt::Display for RatingAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingAxis::Offense => write!(f, "offensive"),
            RatingAxis::Defense => write!(f, "defensive"),
        }
    }
}

/// Offensive and defensive rating pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamRating {
    pub off_rating: f64,
    pub def_rating: f64,
}

/// Seed rating of a team before any match-driven adjustment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseRating {
    pub team_id: TeamId,
    #[serde(rename = "off_elo", alias = "off_rating")]
    pub off_rating: f64,
    #[serde(rename = "def_elo", alias = "def_rating")]
    pub def_rating: f64,
}

impl BaseRating {
    pub fn rating(&self) -> TeamRating {
        TeamRating {
            off_rating: self.off_rating,
            def_rating: self.def_rating,
        }
    }
}

/// Integer rating row produced by the seeder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRating {
    pub team_id: TeamId,
    #[serde(rename = "off_elo")]
    pub off_rating: i64,
    #[serde(rename = "def_elo")]
    pub def_rating: i64,
}

impl From<SeededRating> for BaseRating {
    fn from(seeded: SeededRating) -> Self {
        Self {
            team_id: seeded.team_id,
            off_rating: seeded.off_rating as f64,
            def_rating: seeded.def_rating as f64,
        }
    }
}

/// A league fixture as exported by the fixtures collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub code: FixtureCode,
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub event: Option<Event>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub finished: bool,
    pub team_h: TeamId,
    pub team_a: TeamId,
    #[serde(default)]
    pub kickoff_time: Option<String>,
    #[serde(default)]
    pub team_h_xg: Option<f64>,
    #[serde(default)]
    pub team_a_xg: Option<f64>,
}

impl Fixture {
    /// Both sides carry xG data; `finished` plays no part
    pub fn is_eligible(&self) -> bool {
        self.team_h_xg.is_some() && self.team_a_xg.is_some()
    }
}

/// One ledger row: the adjustment a fixture made to one team
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub fixture_code: FixtureCode,
    pub team_id: TeamId,
    pub off_change: f64,
    pub def_change: f64,
}

impl RatingChange {
    pub fn key(&self) -> (FixtureCode, TeamId) {
        (self.fixture_code, self.team_id)
    }
}

/// Row of the team identity table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    #[serde(default)]
    pub code: Option<u32>,
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
}

/// Row of the scraped ranking table. Metrics stay raw until parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub name: String,
    #[serde(alias = "offensive_metric")]
    pub offensive_rating: String,
    #[serde(alias = "defensive_metric")]
    pub defensive_rating: String,
}

impl RankingRow {
    pub fn metric(&self, axis: RatingAxis) -> Option<f64> {
        let raw = match axis {
            RatingAxis::Offense => &self.offensive_rating,
            RatingAxis::Defense => &self.defensive_rating,
        };
        raw.trim().parse::<f64>().ok().filter(|m| m.is_finite())
    }
}

/// Current rating of a team, as printed by the `ratings` command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentRating {
    pub team_id: TeamId,
    pub off_rating: f64,
    pub def_rating: f64,
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid boolean value: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(h_xg: Option<f64>, a_xg: Option<f64>, finished: bool) -> Fixture {
        Fixture {
            code: 1,
            id: None,
            event: Some(1),
            finished,
            team_h: 1,
            team_a: 2,
            kickoff_time: None,
            team_h_xg: h_xg,
            team_a_xg: a_xg,
        }
    }

    #[test]
    fn test_eligibility_ignores_finished_flag() {
        assert!(fixture(Some(1.0), Some(0.4), false).is_eligible());
        assert!(!fixture(Some(1.0), None, true).is_eligible());
        assert!(!fixture(None, Some(0.4), true).is_eligible());
    }

    #[test]
    fn test_ranking_metric_parsing() {
        let row = RankingRow {
            name: "Arsenal".to_string(),
            offensive_rating: " 3 ".to_string(),
            defensive_rating: "n/a".to_string(),
        };
        assert_eq!(row.metric(RatingAxis::Offense), Some(3.0));
        assert_eq!(row.metric(RatingAxis::Defense), None);

        let nan = RankingRow {
            defensive_rating: "NaN".to_string(),
            ..row
        };
        assert_eq!(nan.metric(RatingAxis::Defense), None);
    }

    #[test]
    fn test_seeded_into_base() {
        let base: BaseRating = SeededRating {
            team_id: 4,
            off_rating: 1700,
            def_rating: 1300,
        }
        .into();
        assert_eq!(base.off_rating, 1700.0);
        assert_eq!(base.def_rating, 1300.0);
    }
}
