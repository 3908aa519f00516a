//! Batch runs of the rating engine
//!
//! `RatingService` wires a [`RatingStore`] to the seeder, the update engine
//! and the resolver. Each run is one bulk read, an in-memory computation and
//! one bulk write; nothing is written when a run fails.

use crate::config::AppConfig;
use crate::data::{CsvRatingStore, RatingStore};
use crate::error::{RatingError, Result};
use crate::rating::{
    build_base_table, resolve_all, seed_base_ratings, RatingLedger, RatingSeeder, UpdateEngine,
};
use crate::report::{SeedReport, UpdateReport};
use crate::teams::TeamDirectory;
use crate::types::CurrentRating;
use std::sync::Arc;
use tracing::{info, warn};

/// Coordinates the seed, update and ratings runs
pub struct RatingService {
    config: AppConfig,
    store: Arc<dyn RatingStore>,
}

impl RatingService {
    pub fn new(config: AppConfig, store: Arc<dyn RatingStore>) -> Self {
        Self { config, store }
    }

    /// Service backed by the CSV files named in the configuration
    pub fn from_config(config: AppConfig) -> Self {
        let store = Arc::new(CsvRatingStore::new(config.paths.clone()));
        Self::new(config, store)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Seed base ratings from the ranking table and save them
    pub fn seed(&self, dry_run: bool) -> Result<SeedReport> {
        info!("⚽ Starting team rating seeding...");

        let teams = self.store.load_teams()?;
        let directory = TeamDirectory::from_records(&teams, &self.config.aliases);
        info!("   Loaded {} team mappings", directory.len());

        let rankings = self.store.load_rankings()?;
        info!("   Read {} ranking rows", rankings.len());

        let seeder = RatingSeeder::new(&self.config.rating);
        let (seeded, report) = seed_base_ratings(&rankings, &directory, &seeder)?;
        report.log_summary();
        self.check_strict(report.failure_count())?;

        if dry_run {
            info!("Dry run: {} base ratings not written", seeded.len());
        } else {
            self.store.save_base_ratings(&seeded)?;
            info!("✨ Done! Saved ratings for {} teams", seeded.len());
        }

        Ok(report)
    }

    /// Recompute the rating-change ledger from scratch and save it
    pub fn update(&self, dry_run: bool) -> Result<UpdateReport> {
        info!("📊 Starting rating update process...");

        let base_rows = self.store.load_base_ratings()?;
        let fixtures = self.store.load_fixtures()?;
        info!("   Loaded {} total fixtures", fixtures.len());

        let base_table = build_base_table(base_rows)?;
        let engine = UpdateEngine::new(&self.config.rating);
        let (ledger, report) = engine.recompute(&fixtures, &base_table)?;
        report.log_summary();
        self.check_strict(report.failure_count())?;

        if dry_run {
            info!("Dry run: {} rating changes not written", ledger.len());
        } else {
            self.store.save_ledger(&ledger)?;
            info!("✨ Done! Saved {} rating changes", ledger.len());
        }

        Ok(report)
    }

    /// Current rating of every team with a base rating.
    ///
    /// A ledger that has not been written yet counts as empty. Ledger rows
    /// for a team missing from the base table fail the run.
    pub fn current_ratings(&self) -> Result<Vec<CurrentRating>> {
        let base_table = build_base_table(self.store.load_base_ratings()?)?;

        let changes = match self.store.load_ledger() {
            Ok(changes) => changes,
            Err(e) if matches!(
                e.downcast_ref::<RatingError>(),
                Some(RatingError::MissingInput { .. })
            ) =>
            {
                warn!("No rating changes yet ({}), using base ratings", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let ledger = RatingLedger::from_changes(changes)?;
        Ok(resolve_all(&base_table, ledger.changes())?)
    }

    fn check_strict(&self, failures: usize) -> Result<()> {
        if self.config.service.strict && failures > 0 {
            return Err(RatingError::StrictModeViolation { count: failures }.into());
        }
        Ok(())
    }
}
