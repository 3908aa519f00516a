//! Error types for the rating engine
//!
//! `RatingError` names the failing key of every domain failure. Fallible
//! functions return the crate-wide `anyhow`-backed `Result`, which carries
//! these variants alongside I/O and CSV errors with added context.

use crate::types::{FixtureCode, TeamId};

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Required input file not found: {path}")]
    MissingInput { path: String },

    #[error("No base rating for team {team_id}")]
    MissingBaseRating { team_id: TeamId },

    #[error("Base rating table lists team {team_id} more than once")]
    DuplicateBaseRating { team_id: TeamId },

    #[error("Fixture {fixture_code} has xG data but no event")]
    MissingEventKey { fixture_code: FixtureCode },

    #[error("Fixture {fixture_code} has a non-finite xG value")]
    InvalidXg { fixture_code: FixtureCode },

    #[error("Fixture code {fixture_code} appears more than once")]
    DuplicateFixture { fixture_code: FixtureCode },

    #[error("No eligible fixtures (both sides need xG data)")]
    NoEligibleFixtures,

    #[error("No team in the ranking source has a numeric metric")]
    NoRankableTeams,

    #[error("Ledger already holds a change for fixture {fixture_code}, team {team_id}")]
    DuplicateChange {
        fixture_code: FixtureCode,
        team_id: TeamId,
    },

    #[error("Fixture {fixture_code} lists team {team_id} on both sides")]
    SelfFixture {
        fixture_code: FixtureCode,
        team_id: TeamId,
    },

    #[error("Run aborted in strict mode: {count} item(s) failed")]
    StrictModeViolation { count: usize },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
