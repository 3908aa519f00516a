//! xG-driven rating updates
//!
//! The engine folds every eligible fixture, in chronological order, into a
//! freshly built [`RatingLedger`]. Each fixture compares the xG a side
//! produced with what the current ratings predicted and moves both teams'
//! ratings by the gap. Every change to one team's offense is mirrored as an
//! equal and opposite change to the opponent's defense, and vice versa.
//!
//! The result is a pure function of the base ratings and the fixture list:
//! input row order and previous runs have no influence.

use crate::config::{GameweekPolicy, RatingConfig};
use crate::error::RatingError;
use crate::rating::ledger::RatingLedger;
use crate::rating::resolver::{BaseTable, RunningTotals};
use crate::report::UpdateReport;
use crate::types::{Event, Fixture, FixtureCode, RatingChange, TeamId, TeamRating};
use std::collections::HashSet;
use tracing::{debug, info};

/// The two ledger rows a fixture produces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureChanges {
    pub home: RatingChange,
    pub away: RatingChange,
}

/// Expected-vs-actual xG update rule
#[derive(Debug, Clone)]
pub struct XgEloCalculator {
    k_factor: f64,
    rating_scale: f64,
    xg_per_scale: f64,
}

impl Default for XgEloCalculator {
    fn default() -> Self {
        Self::new(&RatingConfig::default())
    }
}

impl XgEloCalculator {
    pub fn new(config: &RatingConfig) -> Self {
        Self {
            k_factor: config.k_factor,
            rating_scale: config.rating_scale,
            xg_per_scale: config.xg_per_scale,
        }
    }

    /// xG an attack is expected to produce against a defense
    pub fn expected_xg(&self, attack: f64, defense: f64) -> f64 {
        (attack - defense) / self.rating_scale * self.xg_per_scale
    }

    /// Rating changes for one fixture given both teams' current ratings
    pub fn fixture_changes(
        &self,
        fixture: &EligibleFixture,
        home: TeamRating,
        away: TeamRating,
    ) -> FixtureChanges {
        let expected_home_xg = self.expected_xg(home.off_rating, away.def_rating);
        let delta_off = fixture.home_xg - expected_home_xg;
        let home_off_change = self.k_factor * delta_off;
        let away_def_change = -self.k_factor * delta_off;

        let expected_away_conceded = self.expected_xg(away.off_rating, home.def_rating);
        let delta_def = fixture.away_xg - expected_away_conceded;
        let home_def_change = self.k_factor * delta_def;
        let away_off_change = -self.k_factor * delta_def;

        FixtureChanges {
            home: RatingChange {
                fixture_code: fixture.code,
                team_id: fixture.team_h,
                off_change: home_off_change,
                def_change: home_def_change,
            },
            away: RatingChange {
                fixture_code: fixture.code,
                team_id: fixture.team_a,
                off_change: away_off_change,
                def_change: away_def_change,
            },
        }
    }
}

/// A fixture that passed the eligibility filter, with its ordering key
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleFixture {
    pub code: FixtureCode,
    pub event: Event,
    pub kickoff_time: Option<String>,
    pub team_h: TeamId,
    pub team_a: TeamId,
    pub home_xg: f64,
    pub away_xg: f64,
}

/// Keep fixtures with xG on both sides and order them by
/// `(event, kickoff_time, code)`.
///
/// An eligible fixture without an event cannot be placed in time, which
/// fails the whole run.
pub fn eligible_fixtures(fixtures: &[Fixture]) -> Result<Vec<EligibleFixture>, RatingError> {
    let mut eligible = Vec::new();
    let mut missing_event: Option<FixtureCode> = None;

    for fixture in fixtures {
        let (Some(home_xg), Some(away_xg)) = (fixture.team_h_xg, fixture.team_a_xg) else {
            continue;
        };

        let Some(event) = fixture.event else {
            missing_event = Some(missing_event.map_or(fixture.code, |c| c.min(fixture.code)));
            continue;
        };

        eligible.push(EligibleFixture {
            code: fixture.code,
            event,
            kickoff_time: fixture.kickoff_time.clone(),
            team_h: fixture.team_h,
            team_a: fixture.team_a,
            home_xg,
            away_xg,
        });
    }

    if let Some(fixture_code) = missing_event {
        return Err(RatingError::MissingEventKey { fixture_code });
    }

    eligible.sort_by(|a, b| {
        (a.event, &a.kickoff_time, a.code).cmp(&(b.event, &b.kickoff_time, b.code))
    });
    Ok(eligible)
}

/// Codes carried by more than one eligible fixture
fn repeated_codes(eligible: &[EligibleFixture]) -> HashSet<FixtureCode> {
    let mut seen = HashSet::new();
    eligible
        .iter()
        .filter(|f| !seen.insert(f.code))
        .map(|f| f.code)
        .collect()
}

/// Builds the rating-change ledger from scratch
#[derive(Debug, Clone, Default)]
pub struct UpdateEngine {
    calculator: XgEloCalculator,
    policy: GameweekPolicy,
}

impl UpdateEngine {
    pub fn new(config: &RatingConfig) -> Self {
        Self {
            calculator: XgEloCalculator::new(config),
            policy: config.gameweek_policy,
        }
    }

    pub fn with_policy(mut self, policy: GameweekPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> GameweekPolicy {
        self.policy
    }

    /// Recompute the whole ledger from the base ratings and every fixture.
    ///
    /// Fixtures that reference unknown teams (or are otherwise malformed) are
    /// skipped and listed in the report; the rest of the batch still runs.
    pub fn recompute(
        &self,
        fixtures: &[Fixture],
        base_table: &BaseTable,
    ) -> crate::error::Result<(RatingLedger, UpdateReport)> {
        let mut report = UpdateReport::new(self.policy, fixtures.len());

        info!("🔧 Filtering to completed fixtures (with xG data)...");
        let eligible = eligible_fixtures(fixtures)?;
        report.fixtures_eligible = eligible.len();
        info!("   Found {} completed fixtures to process", eligible.len());

        if eligible.is_empty() {
            return Err(RatingError::NoEligibleFixtures.into());
        }

        let repeated = repeated_codes(&eligible);
        let mut ledger = RatingLedger::new();
        let mut totals = RunningTotals::new(base_table);
        let mut attempted = 0usize;

        for gameweek in eligible.chunk_by(|a, b| a.event == b.event) {
            // Snapshot policy: changes of this event wait until all of its
            // fixtures have been resolved against the prior state.
            let mut pending: Vec<(FixtureCode, FixtureChanges)> = Vec::new();

            for fixture in gameweek {
                attempted += 1;
                if attempted % 10 == 0 {
                    debug!("   Processed {}/{} fixtures...", attempted, eligible.len());
                }

                // Every copy of a repeated code is rejected, whatever its row order
                if repeated.contains(&fixture.code) {
                    report.record_failure(
                        fixture.code,
                        RatingError::DuplicateFixture {
                            fixture_code: fixture.code,
                        },
                    );
                    continue;
                }

                let changes = match self.fixture_changes(fixture, &totals) {
                    Ok(changes) => changes,
                    Err(e) => {
                        report.record_failure(fixture.code, e);
                        continue;
                    }
                };

                match self.policy {
                    GameweekPolicy::Sequential => {
                        commit(&mut ledger, &mut totals, &mut report, fixture.code, changes)
                    }
                    GameweekPolicy::Snapshot => pending.push((fixture.code, changes)),
                }
            }

            for (code, changes) in pending {
                commit(&mut ledger, &mut totals, &mut report, code, changes);
            }
        }

        report.fixtures_processed = ledger.fixtures_recorded();
        report.teams_affected = ledger.teams_affected();
        report.changes_recorded = ledger.len();

        Ok((ledger, report))
    }

    fn fixture_changes(
        &self,
        fixture: &EligibleFixture,
        totals: &RunningTotals<'_>,
    ) -> Result<FixtureChanges, RatingError> {
        if fixture.team_h == fixture.team_a {
            return Err(RatingError::SelfFixture {
                fixture_code: fixture.code,
                team_id: fixture.team_h,
            });
        }
        if !(fixture.home_xg.is_finite() && fixture.away_xg.is_finite()) {
            return Err(RatingError::InvalidXg {
                fixture_code: fixture.code,
            });
        }

        let home = totals.current(fixture.team_h)?;
        let away = totals.current(fixture.team_a)?;

        Ok(self.calculator.fixture_changes(fixture, home, away))
    }
}

/// Apply both rows of a fixture to the ledger and the running totals together
fn commit(
    ledger: &mut RatingLedger,
    totals: &mut RunningTotals<'_>,
    report: &mut UpdateReport,
    code: FixtureCode,
    changes: FixtureChanges,
) {
    match ledger.append_pair(changes.home, changes.away) {
        Ok(()) => {
            totals.apply(&changes.home);
            totals.apply(&changes.away);
        }
        Err(e) => report.record_failure(code, e),
    }
}
