//! Utility functions for the rating engine

use chrono::{DateTime, Utc};

/// Tolerance used when comparing accumulated rating sums
pub const RATING_EPSILON: f64 = 1e-9;

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Round a rating to the nearest integer, halves away from zero
pub fn round_rating(value: f64) -> i64 {
    value.round() as i64
}

/// Check if two ratings are equal within the given tolerance
pub fn ratings_within_tolerance(rating1: f64, rating2: f64, tolerance: f64) -> bool {
    (rating1 - rating2).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_rating() {
        assert_eq!(round_rating(1678.947), 1679);
        assert_eq!(round_rating(1321.05), 1321);
        assert_eq!(round_rating(1500.5), 1501);
    }

    #[test]
    fn test_ratings_within_tolerance() {
        assert!(ratings_within_tolerance(1500.0, 1450.0, 100.0));
        assert!(!ratings_within_tolerance(1500.0, 1350.0, 100.0));
        assert!(ratings_within_tolerance(40.0, 40.0 + 1e-12, RATING_EPSILON));
    }
}
