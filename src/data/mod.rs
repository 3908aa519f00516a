//! Data layer: typed CSV tables and the store the engine reads and writes
//! through.

pub mod csv_io;
pub mod store;

pub use csv_io::{read_file, read_rows, write_file, write_rows};
pub use store::{CsvRatingStore, RatingStore};
