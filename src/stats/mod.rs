//! Stats module - polling aggregates

mod calculator;

pub use calculator::{
    CandidatePair, HighestPolling, Leader, StatsCalculator, StatsError, HISTORY_WINDOW,
};
