//! Initial ratings from an external ranking
//!
//! Teams are ordered by a lower-is-better metric and spread linearly over the
//! seeding range: the best team gets the top of the range, the worst the
//! bottom. Offense and defense are seeded independently.

use crate::config::RatingConfig;
use crate::error::RatingError;
use crate::report::SeedReport;
use crate::teams::TeamDirectory;
use crate::types::{RankingRow, RatingAxis, SeededRating, TeamId};
use crate::utils::round_rating;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Converts rank orderings into seed ratings
#[derive(Debug, Clone)]
pub struct RatingSeeder {
    best: f64,
    worst: f64,
    single: f64,
}

impl Default for RatingSeeder {
    fn default() -> Self {
        Self::new(&RatingConfig::default())
    }
}

impl RatingSeeder {
    pub fn new(config: &RatingConfig) -> Self {
        Self {
            best: config.seed_best,
            worst: config.seed_worst,
            single: config.seed_single,
        }
    }

    /// Rating for a 1-based rank among `total` teams
    pub fn rating_for_rank(&self, rank: usize, total: usize) -> i64 {
        debug_assert!(rank >= 1 && rank <= total);

        if total == 1 {
            return round_rating(self.single);
        }

        let proportion = (rank - 1) as f64 / (total - 1) as f64;
        round_rating(self.best - proportion * (self.best - self.worst))
    }

    /// Seed one axis. Output is in rank order, best first; ties keep input order.
    pub fn seed(&self, metrics: &[(TeamId, f64)]) -> Result<Vec<(TeamId, i64)>, RatingError> {
        if metrics.is_empty() {
            return Err(RatingError::NoRankableTeams);
        }

        let mut ordered = metrics.to_vec();
        ordered.sort_by(|a, b| a.1.total_cmp(&b.1));

        let total = ordered.len();
        Ok(ordered
            .into_iter()
            .enumerate()
            .map(|(i, (team_id, _))| (team_id, self.rating_for_rank(i + 1, total)))
            .collect())
    }
}

/// Seed both axes for every ranking row that resolves to a known team.
///
/// Rows with a non-numeric metric are skipped and counted; names the
/// directory does not know are reported and skipped. Fails only when no row
/// is left to rank.
pub fn seed_base_ratings(
    rankings: &[RankingRow],
    directory: &TeamDirectory,
    seeder: &RatingSeeder,
) -> crate::error::Result<(Vec<SeededRating>, SeedReport)> {
    let mut report = SeedReport::new(rankings.len());
    let mut offense: Vec<(TeamId, f64)> = Vec::new();
    let mut defense: Vec<(TeamId, f64)> = Vec::new();
    let mut seen: HashSet<TeamId> = HashSet::new();

    for row in rankings {
        let (off_metric, def_metric) = match (
            row.metric(RatingAxis::Offense),
            row.metric(RatingAxis::Defense),
        ) {
            (Some(off), Some(def)) => (off, def),
            _ => {
                debug!("Non-numeric metric for {}, skipping", row.name);
                report.non_numeric_rows.push(row.name.clone());
                continue;
            }
        };

        let Some(team_id) = directory.lookup(&row.name) else {
            report.unmatched_names.push(row.name.clone());
            continue;
        };

        if !seen.insert(team_id) {
            report.duplicate_teams.push((row.name.clone(), team_id));
            continue;
        }

        offense.push((team_id, off_metric));
        defense.push((team_id, def_metric));
    }

    if offense.is_empty() {
        return Err(RatingError::NoRankableTeams.into());
    }

    info!("🎯 Calculating {} ratings...", RatingAxis::Offense);
    let off_ratings: HashMap<TeamId, i64> = seeder.seed(&offense)?.into_iter().collect();
    info!("🎯 Calculating {} ratings...", RatingAxis::Defense);
    let def_ratings: HashMap<TeamId, i64> = seeder.seed(&defense)?.into_iter().collect();

    let mut seeded: Vec<SeededRating> = off_ratings
        .iter()
        .filter_map(|(&team_id, &off_rating)| {
            def_ratings.get(&team_id).map(|&def_rating| SeededRating {
                team_id,
                off_rating,
                def_rating,
            })
        })
        .collect();
    seeded.sort_by_key(|s| s.team_id);

    report.teams_seeded = seeded.len();
    Ok((seeded, report))
}
