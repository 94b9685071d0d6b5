//! Report Module
//! Runs every statistic over a table and renders the result for the terminal or as JSON.

use crate::data::PollTable;
use crate::stats::{CandidatePair, HighestPolling, StatsCalculator, StatsError};
use serde::Serialize;
use std::fmt;

/// All three polling statistics for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollReport {
    pub records: usize,
    pub highest_polling_candidate: HighestPolling,
    pub likely_voter_average: CandidatePair,
    pub polling_history_change: CandidatePair,
}

impl PollReport {
    pub fn compute(table: &PollTable) -> Result<Self, StatsError> {
        Ok(Self {
            records: table.height(),
            highest_polling_candidate: StatsCalculator::highest_polling_candidate(table)?,
            likely_voter_average: StatsCalculator::likely_voter_polling_average(table)?,
            polling_history_change: StatsCalculator::polling_history_change(table)?,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for PollReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let avg = &self.likely_voter_average;
        let change = &self.polling_history_change;

        writeln!(f, "Highest Polling Candidate: {}", self.highest_polling_candidate)?;
        writeln!(f, "Likely Voter Polling Average:")?;
        writeln!(f, "  Harris: {:.2}%", avg.harris * 100.0)?;
        writeln!(f, "  Trump: {:.2}%", avg.trump * 100.0)?;
        writeln!(f, "Polling History Change:")?;
        writeln!(f, "  Harris: {:+.2}%", change.harris * 100.0)?;
        write!(f, "  Trump: {:+.2}%", change.trump * 100.0)
    }
}
