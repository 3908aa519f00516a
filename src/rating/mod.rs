//! Rating engine: seeding, the change ledger, resolution and the xG update
//!
//! This module turns an external ranking into base ratings and folds
//! completed fixtures into an append-only ledger of rating changes.

pub mod engine;
pub mod ledger;
pub mod resolver;
pub mod seeder;

// Re-export commonly used types
pub use engine::{eligible_fixtures, EligibleFixture, FixtureChanges, UpdateEngine, XgEloCalculator};
pub use ledger::RatingLedger;
pub use resolver::{build_base_table, resolve, resolve_all, BaseTable, RunningTotals};
pub use seeder::{seed_base_ratings, RatingSeeder};
