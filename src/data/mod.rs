//! Data module - CSV loading and columnar poll storage

mod loader;
pub(crate) mod table;

pub use loader::{parse_csv, DataLoader, LoaderError};
pub use table::{PollRecord, PollTable, SampleType, COLUMNS};
