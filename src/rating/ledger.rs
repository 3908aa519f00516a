//! Append-only ledger of rating changes
//!
//! The ledger is the only place match-driven history lives. Rows are never
//! updated or removed, and `(fixture_code, team_id)` is unique.

use crate::error::RatingError;
use crate::types::{FixtureCode, RatingChange, TeamId};
use std::collections::HashSet;

/// Ordered collection of rating changes in the order they were produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingLedger {
    changes: Vec<RatingChange>,
    keys: HashSet<(FixtureCode, TeamId)>,
}

impl RatingLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from stored rows, rejecting duplicate keys
    pub fn from_changes<I>(changes: I) -> crate::error::Result<Self>
    where
        I: IntoIterator<Item = RatingChange>,
    {
        let mut ledger = Self::new();
        for change in changes {
            ledger.append(change)?;
        }
        Ok(ledger)
    }

    /// Append a single change
    pub fn append(&mut self, change: RatingChange) -> crate::error::Result<()> {
        if !self.keys.insert(change.key()) {
            return Err(RatingError::DuplicateChange {
                fixture_code: change.fixture_code,
                team_id: change.team_id,
            }
            .into());
        }
        self.changes.push(change);
        Ok(())
    }

    /// Append both rows of one fixture, or neither
    pub fn append_pair(
        &mut self,
        home: RatingChange,
        away: RatingChange,
    ) -> crate::error::Result<()> {
        for change in [&home, &away] {
            if self.contains(change.fixture_code, change.team_id) {
                return Err(RatingError::DuplicateChange {
                    fixture_code: change.fixture_code,
                    team_id: change.team_id,
                }
                .into());
            }
        }
        if home.key() == away.key() {
            return Err(RatingError::SelfFixture {
                fixture_code: home.fixture_code,
                team_id: home.team_id,
            }
            .into());
        }

        self.append(home)?;
        self.append(away)
    }

    pub fn contains(&self, fixture_code: FixtureCode, team_id: TeamId) -> bool {
        self.keys.contains(&(fixture_code, team_id))
    }

    /// True if any row references the fixture
    pub fn has_fixture(&self, fixture_code: FixtureCode) -> bool {
        self.changes.iter().any(|c| c.fixture_code == fixture_code)
    }

    pub fn changes(&self) -> &[RatingChange] {
        &self.changes
    }

    pub fn iter(&self) -> impl Iterator<Item = &RatingChange> {
        self.changes.iter()
    }

    pub fn into_changes(self) -> Vec<RatingChange> {
        self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of distinct teams with at least one row
    pub fn teams_affected(&self) -> usize {
        self.changes
            .iter()
            .map(|c| c.team_id)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of distinct fixtures with at least one row
    pub fn fixtures_recorded(&self) -> usize {
        self.changes
            .iter()
            .map(|c| c.fixture_code)
            .collect::<HashSet<_>>()
            .len()
    }
}
