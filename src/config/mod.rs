//! Configuration management for the rating engine
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{default_aliases, validate_config, AppConfig, PathSettings, ServiceSettings};
pub use rating::{GameweekPolicy, RatingConfig};
