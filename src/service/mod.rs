//! Service layer for the rating engine
//!
//! This module contains the batch runs that read inputs through a store,
//! drive the engine and persist its outputs.

pub mod app;

pub use app::RatingService;
