//! Run summaries
//!
//! Per-item failures are collected here instead of aborting a batch, then
//! logged once at the end of the run.

use crate::config::GameweekPolicy;
use crate::types::{FixtureCode, TeamId};
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// A fixture that could not be folded into the ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureFailure {
    pub fixture_code: FixtureCode,
    pub reason: String,
}

/// Outcome of a seeding pass
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub generated_at: DateTime<Utc>,
    pub rows_read: usize,
    pub teams_seeded: usize,
    /// Ranking names with no canonical id
    pub unmatched_names: Vec<String>,
    /// Rows skipped because a metric was not numeric
    pub non_numeric_rows: Vec<String>,
    /// Rows dropped because their team was already ranked
    pub duplicate_teams: Vec<(String, TeamId)>,
}

impl SeedReport {
    pub fn new(rows_read: usize) -> Self {
        Self {
            generated_at: current_timestamp(),
            rows_read,
            teams_seeded: 0,
            unmatched_names: Vec::new(),
            non_numeric_rows: Vec::new(),
            duplicate_teams: Vec::new(),
        }
    }

    /// Items that failed outright (skipped non-numeric rows are not failures)
    pub fn failure_count(&self) -> usize {
        self.unmatched_names.len() + self.duplicate_teams.len()
    }

    pub fn log_summary(&self) {
        info!("📈 Seeding summary:");
        info!("   Ranking rows read: {}", self.rows_read);
        info!("   Teams seeded: {}", self.teams_seeded);
        if !self.non_numeric_rows.is_empty() {
            info!(
                "   Rows skipped (non-numeric metric): {}",
                self.non_numeric_rows.len()
            );
        }
        for name in &self.unmatched_names {
            warn!("   ⚠️  No team ID found for: {}", name);
        }
        for (name, team_id) in &self.duplicate_teams {
            warn!("   ⚠️  Team {} ranked twice, dropped row: {}", team_id, name);
        }
    }
}

/// Outcome of an update run
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub generated_at: DateTime<Utc>,
    pub policy: GameweekPolicy,
    pub fixtures_total: usize,
    pub fixtures_eligible: usize,
    pub fixtures_processed: usize,
    pub teams_affected: usize,
    pub changes_recorded: usize,
    pub failures: Vec<FixtureFailure>,
}

impl UpdateReport {
    pub fn new(policy: GameweekPolicy, fixtures_total: usize) -> Self {
        Self {
            generated_at: current_timestamp(),
            policy,
            fixtures_total,
            fixtures_eligible: 0,
            fixtures_processed: 0,
            teams_affected: 0,
            changes_recorded: 0,
            failures: Vec::new(),
        }
    }

    pub fn record_failure(&mut self, fixture_code: FixtureCode, reason: impl ToString) {
        let reason = reason.to_string();
        warn!("Skipping fixture {}: {}", fixture_code, reason);
        self.failures.push(FixtureFailure {
            fixture_code,
            reason,
        });
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn log_summary(&self) {
        info!("{}", "─".repeat(50));
        info!("📈 Summary:");
        info!("   Gameweek policy: {}", self.policy);
        info!(
            "   Fixtures processed: {}/{} eligible ({} total)",
            self.fixtures_processed, self.fixtures_eligible, self.fixtures_total
        );
        info!("   Teams affected: {}", self.teams_affected);
        info!("   Rating change records: {}", self.changes_recorded);
        if !self.failures.is_empty() {
            let codes: Vec<String> = self
                .failures
                .iter()
                .map(|f| f.fixture_code.to_string())
                .collect();
            warn!(
                "   ⚠️  {} fixture(s) failed: {}",
                self.failures.len(),
                codes.join(", ")
            );
        }
        info!("{}", "─".repeat(50));
    }
}
