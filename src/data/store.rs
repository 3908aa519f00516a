//! Rating store interface and the CSV implementation
//!
//! The engine itself never touches the filesystem: it reads every table once
//! through a [`RatingStore`], computes in memory, and writes once.

use crate::config::PathSettings;
use crate::data::csv_io::{read_file, write_file};
use crate::rating::RatingLedger;
use crate::types::{BaseRating, Fixture, RankingRow, RatingChange, SeededRating, TeamRecord};
use tracing::debug;

/// Trait for loading engine inputs and persisting its outputs
pub trait RatingStore: Send + Sync {
    /// Team identity table
    fn load_teams(&self) -> crate::error::Result<Vec<TeamRecord>>;

    /// Scraped ranking table
    fn load_rankings(&self) -> crate::error::Result<Vec<RankingRow>>;

    /// Every fixture of the season, played or not
    fn load_fixtures(&self) -> crate::error::Result<Vec<Fixture>>;

    /// Seeded base-rating table
    fn load_base_ratings(&self) -> crate::error::Result<Vec<BaseRating>>;

    /// Previously written rating changes
    fn load_ledger(&self) -> crate::error::Result<Vec<RatingChange>>;

    /// Replace the base-rating table
    fn save_base_ratings(&self, rows: &[SeededRating]) -> crate::error::Result<()>;

    /// Replace the ledger with a freshly computed one
    fn save_ledger(&self, ledger: &RatingLedger) -> crate::error::Result<()>;
}

/// CSV files in a data directory
#[derive(Debug, Clone)]
pub struct CsvRatingStore {
    paths: PathSettings,
}

impl CsvRatingStore {
    pub fn new(paths: PathSettings) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &PathSettings {
        &self.paths
    }
}

impl RatingStore for CsvRatingStore {
    fn load_teams(&self) -> crate::error::Result<Vec<TeamRecord>> {
        let path = self.paths.teams_path();
        debug!("Loading teams from {}", path.display());
        read_file(&path)
    }

    fn load_rankings(&self) -> crate::error::Result<Vec<RankingRow>> {
        let path = self.paths.rankings_path();
        debug!("Loading rankings from {}", path.display());
        read_file(&path)
    }

    fn load_fixtures(&self) -> crate::error::Result<Vec<Fixture>> {
        let path = self.paths.fixtures_path();
        debug!("Loading fixtures from {}", path.display());
        read_file(&path)
    }

    fn load_base_ratings(&self) -> crate::error::Result<Vec<BaseRating>> {
        let path = self.paths.team_elos_path();
        debug!("Loading base ratings from {}", path.display());
        read_file(&path)
    }

    fn load_ledger(&self) -> crate::error::Result<Vec<RatingChange>> {
        let path = self.paths.elo_changes_path();
        debug!("Loading rating changes from {}", path.display());
        read_file(&path)
    }

    fn save_base_ratings(&self, rows: &[SeededRating]) -> crate::error::Result<()> {
        write_file(&self.paths.team_elos_path(), rows)
    }

    fn save_ledger(&self, ledger: &RatingLedger) -> crate::error::Result<()> {
        write_file(&self.paths.elo_changes_path(), ledger.changes())
    }
}
