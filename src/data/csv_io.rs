//! Typed CSV reading and writing for the boundary tables

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use crate::error::RatingError;

/// Deserialize every row of a headed CSV document
pub fn read_rows<T, R>(reader: R) -> crate::error::Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize().enumerate() {
        // +2: header line, 1-based numbering
        let row: T = record.with_context(|| format!("Malformed CSV row at line {}", index + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read a required CSV file; a missing file is a run-level failure
pub fn read_file<T>(path: &Path) -> crate::error::Result<Vec<T>>
where
    T: DeserializeOwned,
{
    if !path.exists() {
        return Err(RatingError::MissingInput {
            path: path.display().to_string(),
        }
        .into());
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    read_rows(file).with_context(|| format!("Failed to read {}", path.display()))
}

/// Serialize rows with a header line
pub fn write_rows<T, W>(writer: W, rows: &[T]) -> crate::error::Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a CSV file in one go, creating its directory if needed.
///
/// Rows are rendered in memory first so a failure never leaves a half
/// written table behind.
pub fn write_file<T>(path: &Path, rows: &[T]) -> crate::error::Result<()>
where
    T: Serialize,
{
    let mut buffer = Vec::new();
    write_rows(&mut buffer, rows)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, buffer).with_context(|| format!("Failed to write {}", path.display()))
}
