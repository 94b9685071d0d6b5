//! CSV Data Loader Module
//! Reads a polling CSV file and parses it strictly into a `PollTable`.

use crate::data::table::{PollRecord, PollTable, SampleType};
use polars::prelude::PolarsError;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("Failed to build table: {0}")]
    Table(#[from] PolarsError),
}

/// Loads polling CSV files relative to a fixed base directory.
pub struct DataLoader {
    base_dir: PathBuf,
}

impl DataLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve `file_name` against the base directory. Absolute paths are kept as-is.
    pub fn resolve(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(file_name)
    }

    /// Load and parse a CSV file. The first line is a header and is discarded.
    pub fn load_csv(&self, file_name: impl AsRef<Path>) -> Result<PollTable, LoaderError> {
        let path = self.resolve(file_name);
        debug!(path = %path.display(), "reading poll file");

        let contents = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LoaderError::FileNotFound(path.clone())
            } else {
                LoaderError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let table = parse_csv(&contents)?;
        info!(
            path = %path.display(),
            records = table.height(),
            "loaded poll table"
        );
        Ok(table)
    }
}

/// Raw data line, fields in file order. The sample field is split afterwards.
#[derive(Debug, Deserialize)]
struct RawRow {
    month: String,
    date: i64,
    sample: String,
    harris: f64,
    trump: f64,
}

/// Parse CSV text (header included) into a table. Any bad line aborts the whole parse.
///
/// Quoting is disabled, so a field with an embedded comma shows up as a field-count error.
pub fn parse_csv(contents: &str) -> Result<PollTable, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and lines are 1-based.
        let fallback_line = idx + 2;
        let record = result.map_err(|e| malformed_from_csv(e, fallback_line))?;
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(fallback_line);

        let raw: RawRow = record
            .deserialize(None)
            .map_err(|e| malformed_from_csv(e, line))?;
        records.push(parse_row(raw, line)?);
    }

    Ok(PollTable::from_records(&records)?)
}

fn malformed_from_csv(err: csv::Error, fallback_line: usize) -> LoaderError {
    let line = err
        .position()
        .map(|pos| pos.line() as usize)
        .unwrap_or(fallback_line);
    let reason = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, found {len}"),
        csv::ErrorKind::Deserialize { err, .. } => format!("invalid value: {err}"),
        _ => err.to_string(),
    };
    LoaderError::MalformedRecord { line, reason }
}

/// Validate a deserialized row and split its `"<count> <type>"` sample field.
fn parse_row(raw: RawRow, line: usize) -> Result<PollRecord, LoaderError> {
    let malformed = |reason: String| LoaderError::MalformedRecord { line, reason };

    if raw.month.is_empty() || !raw.month.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(malformed(format!(
            "month '{}' is not a lower-case abbreviation",
            raw.month
        )));
    }

    let (count, type_code) = raw
        .sample
        .split_once(' ')
        .ok_or_else(|| malformed(format!("sample '{}' is not '<count> <type>'", raw.sample)))?;
    let sample = count
        .parse::<i64>()
        .map_err(|e| malformed(format!("invalid sample count '{count}': {e}")))?;
    if sample <= 0 {
        return Err(malformed(format!("sample count must be positive, got {sample}")));
    }
    let sample_type = type_code.trim().parse::<SampleType>().map_err(malformed)?;

    let harris = check_result(raw.harris, "Harris", line)?;
    let trump = check_result(raw.trump, "Trump", line)?;

    Ok(PollRecord {
        month: raw.month,
        date: raw.date,
        sample,
        sample_type,
        harris,
        trump,
    })
}

/// Results are fractions; NaN fails the range check too.
fn check_result(value: f64, candidate: &str, line: usize) -> Result<f64, LoaderError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(LoaderError::MalformedRecord {
            line,
            reason: format!("{candidate} result {value} outside [0, 1]"),
        });
    }
    Ok(value)
}
