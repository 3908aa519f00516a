//! Rating system configuration

use serde::{Deserialize, Serialize};

use crate::error::RatingError;

/// How fixtures sharing an event see each other's updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameweekPolicy {
    /// Every fixture observes all earlier fixtures, same event included
    #[default]
    Sequential,
    /// Fixtures of one event share the state frozen after the previous event
    Snapshot,
}

impl std::str::FromStr for GameweekPolicy {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(GameweekPolicy::Sequential),
            "snapshot" => Ok(GameweekPolicy::Snapshot),
            other => Err(RatingError::ConfigurationError {
                message: format!("Unknown gameweek policy: {}", other),
            }),
        }
    }
}

impl std::fmt::Display for GameweekPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameweekPolicy::Sequential => write!(f, "sequential"),
            GameweekPolicy::Snapshot => write!(f, "snapshot"),
        }
    }
}

/// Constants of the seeding scale and the xG update rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Sensitivity of the update (K)
    pub k_factor: f64,
    /// Rating points that correspond to `xg_per_scale` expected goals
    pub rating_scale: f64,
    pub xg_per_scale: f64,
    /// Rating given to the best-ranked team
    pub seed_best: f64,
    /// Rating given to the worst-ranked team
    pub seed_worst: f64,
    /// Rating given when only one team is ranked
    pub seed_single: f64,
    pub gameweek_policy: GameweekPolicy,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: 20.0,
            rating_scale: 100.0,
            xg_per_scale: 0.3,
            seed_best: 1700.0,
            seed_worst: 1300.0,
            seed_single: 1500.0,
            gameweek_policy: GameweekPolicy::Sequential,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(self.k_factor.is_finite() && self.k_factor > 0.0) {
            return Err(RatingError::ConfigurationError {
                message: "K factor must be positive".to_string(),
            }
            .into());
        }

        if !(self.rating_scale.is_finite() && self.rating_scale > 0.0) {
            return Err(RatingError::ConfigurationError {
                message: "Rating scale must be positive".to_string(),
            }
            .into());
        }

        if !self.xg_per_scale.is_finite() {
            return Err(RatingError::ConfigurationError {
                message: "xG per scale must be finite".to_string(),
            }
            .into());
        }

        if self.seed_best < self.seed_worst {
            return Err(RatingError::ConfigurationError {
                message: "Best seed rating must not be below the worst".to_string(),
            }
            .into());
        }

        if !(self.seed_worst..=self.seed_best).contains(&self.seed_single) {
            return Err(RatingError::ConfigurationError {
                message: "Single-team seed must lie within the seeding range".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
