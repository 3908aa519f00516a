//! Current-rating resolution
//!
//! A team's current rating is its base rating plus the sum of its ledger
//! rows. [`resolve`] computes that directly from a ledger slice;
//! [`RunningTotals`] keeps the sums incrementally for use inside the fold.

use crate::error::RatingError;
use crate::types::{BaseRating, CurrentRating, RatingChange, TeamId, TeamRating};
use std::collections::HashMap;

/// Base ratings keyed by team
pub type BaseTable = HashMap<TeamId, BaseRating>;

/// Index base rating rows by team, rejecting repeated teams
pub fn build_base_table<I>(rows: I) -> Result<BaseTable, RatingError>
where
    I: IntoIterator<Item = BaseRating>,
{
    let mut table = BaseTable::new();
    for row in rows {
        if table.insert(row.team_id, row).is_some() {
            return Err(RatingError::DuplicateBaseRating {
                team_id: row.team_id,
            });
        }
    }
    Ok(table)
}

/// Resolve a team's current rating from its base row and the ledger
pub fn resolve(
    team_id: TeamId,
    base_table: &BaseTable,
    ledger: &[RatingChange],
) -> Result<TeamRating, RatingError> {
    let base = base_table
        .get(&team_id)
        .ok_or(RatingError::MissingBaseRating { team_id })?;

    let mut rating = base.rating();
    for change in ledger.iter().filter(|c| c.team_id == team_id) {
        rating.off_rating += change.off_change;
        rating.def_rating += change.def_change;
    }

    Ok(rating)
}

/// Resolve every team of the base table, ordered by team id.
///
/// Ledger rows for a team without a base row mean the two tables are out of
/// step; the smallest such team id is reported as `MissingBaseRating`.
pub fn resolve_all(
    base_table: &BaseTable,
    ledger: &[RatingChange],
) -> Result<Vec<CurrentRating>, RatingError> {
    if let Some(team_id) = ledger
        .iter()
        .map(|c| c.team_id)
        .filter(|id| !base_table.contains_key(id))
        .min()
    {
        return Err(RatingError::MissingBaseRating { team_id });
    }

    let mut totals = RunningTotals::new(base_table);
    for change in ledger {
        totals.apply(change);
    }

    let mut team_ids: Vec<TeamId> = base_table.keys().copied().collect();
    team_ids.sort_unstable();

    team_ids
        .into_iter()
        .map(|team_id| {
            totals.current(team_id).map(|r| CurrentRating {
                team_id,
                off_rating: r.off_rating,
                def_rating: r.def_rating,
            })
        })
        .collect()
}

/// Running per-team sums of ledger rows
#[derive(Debug, Clone)]
pub struct RunningTotals<'a> {
    base_table: &'a BaseTable,
    totals: HashMap<TeamId, TeamRating>,
}

impl<'a> RunningTotals<'a> {
    pub fn new(base_table: &'a BaseTable) -> Self {
        Self {
            base_table,
            totals: HashMap::new(),
        }
    }

    /// Current rating of a team: base plus everything applied so far
    pub fn current(&self, team_id: TeamId) -> Result<TeamRating, RatingError> {
        let base = self
            .base_table
            .get(&team_id)
            .ok_or(RatingError::MissingBaseRating { team_id })?;

        let mut rating = base.rating();
        if let Some(total) = self.totals.get(&team_id) {
            rating.off_rating += total.off_rating;
            rating.def_rating += total.def_rating;
        }
        Ok(rating)
    }

    /// Fold one ledger row into the sums
    pub fn apply(&mut self, change: &RatingChange) {
        let total = self.totals.entry(change.team_id).or_default();
        total.off_rating += change.off_change;
        total.def_rating += change.def_change;
    }
}
