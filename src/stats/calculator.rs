//! Statistics Calculator Module
//! Handles the descriptive polling statistics over a loaded `PollTable`.

use crate::data::{PollTable, SampleType};
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Number of records in each of the earliest and latest history windows.
pub const HISTORY_WINDOW: usize = 30;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Poll table has no records")]
    EmptyTable,
    #[error("Need at least {required} records, table has {available}")]
    InsufficientData { required: usize, available: usize },
    #[error("Polars error: {0}")]
    Table(#[from] PolarsError),
}

/// Outcome of comparing the two candidates' single best results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Leader {
    Harris,
    Trump,
    #[serde(rename = "EVEN")]
    Even,
}

impl fmt::Display for Leader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leader::Harris => f.write_str("Harris"),
            Leader::Trump => f.write_str("Trump"),
            Leader::Even => f.write_str("EVEN"),
        }
    }
}

/// Highest single polling result and who holds it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HighestPolling {
    pub leader: Leader,
    /// Fraction in [0, 1]; rendered as a percentage only by `Display`.
    pub fraction: f64,
}

impl fmt::Display for HighestPolling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with {:.1}%", self.leader, self.fraction * 100.0)
    }
}

/// A value per candidate, Harris first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidatePair {
    pub harris: f64,
    pub trump: f64,
}

/// Polling statistics over an immutable table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Candidate with the highest single result. Ties use exact `f64` equality.
    pub fn highest_polling_candidate(table: &PollTable) -> Result<HighestPolling, StatsError> {
        let highest_harris = table.harris()?.max().ok_or(StatsError::EmptyTable)?;
        let highest_trump = table.trump()?.max().ok_or(StatsError::EmptyTable)?;
        debug!(highest_harris, highest_trump, "computed column maxima");

        let (leader, fraction) = if highest_harris > highest_trump {
            (Leader::Harris, highest_harris)
        } else if highest_trump > highest_harris {
            (Leader::Trump, highest_trump)
        } else {
            (Leader::Even, highest_harris)
        };

        Ok(HighestPolling { leader, fraction })
    }

    /// Mean result per candidate among likely-voter polls; `0.0` each when there are none.
    pub fn likely_voter_polling_average(table: &PollTable) -> Result<CandidatePair, StatsError> {
        let likely = table.filter_sample_type(SampleType::LV)?;
        let count = likely.height();
        if count == 0 {
            warn!("no likely-voter records; averages default to 0");
            return Ok(CandidatePair {
                harris: 0.0,
                trump: 0.0,
            });
        }

        let harris = Self::sum(likely.harris()?) / count as f64;
        let trump = Self::sum(likely.trump()?) / count as f64;
        debug!(count, harris, trump, "likely-voter averages");

        Ok(CandidatePair { harris, trump })
    }

    /// Latest-window mean minus earliest-window mean, per candidate.
    ///
    /// Requires at least [`HISTORY_WINDOW`] records. With fewer than twice that, the two
    /// windows overlap and share records.
    pub fn polling_history_change(table: &PollTable) -> Result<CandidatePair, StatsError> {
        let available = table.height();
        if available < HISTORY_WINDOW {
            return Err(StatsError::InsufficientData {
                required: HISTORY_WINDOW,
                available,
            });
        }
        if available < 2 * HISTORY_WINDOW {
            warn!(available, "earliest and latest history windows overlap");
        }

        let earliest = table.head(HISTORY_WINDOW);
        let latest = table.tail(HISTORY_WINDOW);
        let window = HISTORY_WINDOW as f64;

        let earliest_harris = Self::sum(earliest.harris()?) / window;
        let latest_harris = Self::sum(latest.harris()?) / window;
        let earliest_trump = Self::sum(earliest.trump()?) / window;
        let latest_trump = Self::sum(latest.trump()?) / window;

        let change = CandidatePair {
            harris: latest_harris - earliest_harris,
            trump: latest_trump - earliest_trump,
        };
        debug!(harris = change.harris, trump = change.trump, "history change");
        Ok(change)
    }

    /// Sequential sum in record order.
    fn sum(values: &Float64Chunked) -> f64 {
        values.into_iter().flatten().sum()
    }
}
