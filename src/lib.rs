//! Poll Analyzer - election polling CSV loader & descriptive statistics
//!
//! Loads a two-candidate polling CSV into an immutable columnar table and
//! answers three questions about it: who holds the single highest result, the
//! likely-voter average per candidate, and how the average moved between the
//! earliest and latest 30 polls.

pub mod cli;
pub mod data;
pub mod report;
pub mod stats;
