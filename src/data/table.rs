//! Poll Table Module
//! Immutable columnar storage for polling records, backed by a Polars DataFrame.

use polars::prelude::*;
use std::str::FromStr;

pub const MONTH: &str = "month";
pub const DATE: &str = "date";
pub const SAMPLE: &str = "sample";
pub const SAMPLE_TYPE: &str = "sample type";
pub const HARRIS: &str = "Harris result";
pub const TRUMP: &str = "Trump result";

/// Column names in table order.
pub const COLUMNS: [&str; 6] = [MONTH, DATE, SAMPLE, SAMPLE_TYPE, HARRIS, TRUMP];

/// Respondent population a poll was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    /// Adults
    A,
    /// Voters
    V,
    /// Likely voters
    LV,
    /// Registered voters
    RV,
}

impl SampleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleType::A => "A",
            SampleType::V => "V",
            SampleType::LV => "LV",
            SampleType::RV => "RV",
        }
    }
}

impl FromStr for SampleType {
    type Err = String;

    /// Case-sensitive: `lv` is not a likely-voter code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(SampleType::A),
            "V" => Ok(SampleType::V),
            "LV" => Ok(SampleType::LV),
            "RV" => Ok(SampleType::RV),
            other => Err(format!("unknown sample type '{other}'")),
        }
    }
}

/// One parsed input row.
#[derive(Debug, Clone, PartialEq)]
pub struct PollRecord {
    pub month: String,
    pub date: i64,
    pub sample: i64,
    pub sample_type: SampleType,
    pub harris: f64,
    pub trump: f64,
}

/// Column-oriented poll data. Every column has one entry per record, in file order.
#[derive(Debug, Clone)]
pub struct PollTable {
    df: DataFrame,
}

impl PollTable {
    /// Build a table from parsed records, filling all six columns in lock-step.
    pub fn from_records(records: &[PollRecord]) -> PolarsResult<Self> {
        let n = records.len();
        let mut months: Vec<String> = Vec::with_capacity(n);
        let mut dates: Vec<i64> = Vec::with_capacity(n);
        let mut samples: Vec<i64> = Vec::with_capacity(n);
        let mut sample_types: Vec<String> = Vec::with_capacity(n);
        let mut harris: Vec<f64> = Vec::with_capacity(n);
        let mut trump: Vec<f64> = Vec::with_capacity(n);

        for record in records {
            months.push(record.month.clone());
            dates.push(record.date);
            samples.push(record.sample);
            sample_types.push(record.sample_type.as_str().to_string());
            harris.push(record.harris);
            trump.push(record.trump);
        }

        let df = DataFrame::new(vec![
            Column::new(MONTH.into(), months),
            Column::new(DATE.into(), dates),
            Column::new(SAMPLE.into(), samples),
            Column::new(SAMPLE_TYPE.into(), sample_types),
            Column::new(HARRIS.into(), harris),
            Column::new(TRUMP.into(), trump),
        ])?;

        Ok(Self { df })
    }

    /// Number of records.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Get list of column names.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Length of a named column.
    pub fn column_len(&self, name: &str) -> PolarsResult<usize> {
        Ok(self.df.column(name)?.len())
    }

    pub fn months(&self) -> PolarsResult<Vec<String>> {
        Ok(self
            .df
            .column(MONTH)?
            .str()?
            .into_iter()
            .flatten()
            .map(|s| s.to_string())
            .collect())
    }

    pub fn dates(&self) -> PolarsResult<Vec<i64>> {
        Ok(self.df.column(DATE)?.i64()?.into_iter().flatten().collect())
    }

    pub fn samples(&self) -> PolarsResult<Vec<i64>> {
        Ok(self.df.column(SAMPLE)?.i64()?.into_iter().flatten().collect())
    }

    pub fn sample_types(&self) -> PolarsResult<Vec<SampleType>> {
        self.df
            .column(SAMPLE_TYPE)?
            .str()?
            .into_iter()
            .flatten()
            .map(|s| {
                s.parse::<SampleType>()
                    .map_err(|e| PolarsError::ComputeError(e.into()))
            })
            .collect()
    }

    /// Harris result column (fractions in [0, 1]).
    pub fn harris(&self) -> PolarsResult<&Float64Chunked> {
        self.df.column(HARRIS)?.f64()
    }

    /// Trump result column (fractions in [0, 1]).
    pub fn trump(&self) -> PolarsResult<&Float64Chunked> {
        self.df.column(TRUMP)?.f64()
    }

    /// Rows whose sample type equals `sample_type` exactly.
    pub fn filter_sample_type(&self, sample_type: SampleType) -> PolarsResult<PollTable> {
        let df = self
            .df
            .clone()
            .lazy()
            .filter(col(SAMPLE_TYPE).eq(lit(sample_type.as_str())))
            .collect()?;
        Ok(Self { df })
    }

    /// First `n` records (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> PollTable {
        Self {
            df: self.df.head(Some(n)),
        }
    }

    /// Last `n` records (fewer if the table is shorter).
    pub fn tail(&self, n: usize) -> PollTable {
        Self {
            df: self.df.tail(Some(n)),
        }
    }
}

impl PartialEq for PollTable {
    fn eq(&self, other: &Self) -> bool {
        self.df.equals_missing(&other.df)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(sample_type: SampleType, harris: f64, trump: f64) -> PollRecord {
        PollRecord {
            month: "sept".to_string(),
            date: 19,
            sample: 1880,
            sample_type,
            harris,
            trump,
        }
    }

    #[test]
    fn columns_share_length() {
        let records = vec![
            record(SampleType::LV, 0.51, 0.45),
            record(SampleType::RV, 0.49, 0.47),
            record(SampleType::A, 0.50, 0.44),
        ];
        let table = PollTable::from_records(&records).unwrap();

        assert_eq!(table.height(), 3);
        assert_eq!(table.column_names(), COLUMNS.to_vec());
        for name in COLUMNS {
            assert_eq!(table.column_len(name).unwrap(), 3, "column {name}");
        }
    }

    #[test]
    fn accessors_preserve_file_order() {
        let records = vec![
            record(SampleType::LV, 0.51, 0.45),
            record(SampleType::V, 0.53, 0.47),
        ];
        let table = PollTable::from_records(&records).unwrap();

        let harris: Vec<f64> = table.harris().unwrap().into_iter().flatten().collect();
        assert_eq!(harris, vec![0.51, 0.53]);
        assert_eq!(
            table.sample_types().unwrap(),
            vec![SampleType::LV, SampleType::V]
        );
        assert_eq!(table.dates().unwrap(), vec![19, 19]);
        assert_eq!(table.samples().unwrap(), vec![1880, 1880]);
        assert_eq!(table.months().unwrap(), vec!["sept", "sept"]);
    }

    #[test]
    fn filter_is_exact_match() {
        let records = vec![
            record(SampleType::LV, 0.51, 0.45),
            record(SampleType::RV, 0.49, 0.47),
            record(SampleType::LV, 0.48, 0.46),
            record(SampleType::V, 0.52, 0.44),
        ];
        let table = PollTable::from_records(&records).unwrap();

        let lv = table.filter_sample_type(SampleType::LV).unwrap();
        assert_eq!(lv.height(), 2);
        assert!(lv
            .sample_types()
            .unwrap()
            .iter()
            .all(|t| *t == SampleType::LV));

        let a = table.filter_sample_type(SampleType::A).unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn head_and_tail_clamp_to_height() {
        let records: Vec<PollRecord> = [0.40, 0.41, 0.42, 0.43, 0.44]
            .iter()
            .map(|h| record(SampleType::LV, *h, 0.45))
            .collect();
        let table = PollTable::from_records(&records).unwrap();

        assert_eq!(table.head(2).height(), 2);
        assert_eq!(table.tail(10).height(), 5);
        let last: Vec<f64> = table.tail(1).harris().unwrap().into_iter().flatten().collect();
        assert_eq!(last, vec![0.44]);
    }

    #[test]
    fn sample_type_codes_are_case_sensitive() {
        assert_eq!("LV".parse::<SampleType>(), Ok(SampleType::LV));
        assert!("lv".parse::<SampleType>().is_err());
        assert!("X".parse::<SampleType>().is_err());
    }
}
