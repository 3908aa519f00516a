//! xG Ratings - offensive/defensive team ratings for a football league
//!
//! This crate seeds per-team ratings from an external ranking and folds
//! completed fixtures into an append-only ledger of xG-driven rating changes.

pub mod config;
pub mod data;
pub mod error;
pub mod rating;
pub mod report;
pub mod service;
pub mod teams;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use data::{CsvRatingStore, RatingStore};
pub use rating::{RatingLedger, RatingSeeder, UpdateEngine};
pub use service::RatingService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
