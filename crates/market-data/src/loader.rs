//! CSV loading for the market dataset.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::{CompanyRecord, DataError, MarketDataset};

/// Text columns every row needs. The ticker column may also be named
/// `TICKERS`, as in raw exports.
const REQUIRED_COLUMNS: &[&str] = &["Name", "Sector", "Industry"];
const TICKER_COLUMNS: &[&str] = &["Ticker", "TICKERS"];

/// Row counts from a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
}

impl MarketDataset {
    /// Load the dataset from a CSV file on disk.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;

        tracing::info!(
            "Loaded {} companies from {} ({} rows skipped)",
            dataset.summary().rows_loaded,
            path.display(),
            dataset.summary().rows_skipped
        );
        Ok(dataset)
    }

    /// Load the dataset from any CSV source with a header row.
    ///
    /// Rows that fail to deserialize are skipped with a warning.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        ensure_required_columns(&headers)?;

        let mut records = Vec::new();
        let mut summary = LoadSummary::default();

        for (idx, result) in reader.deserialize::<CompanyRecord>().enumerate() {
            summary.rows_read += 1;
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    // +2: header line plus 1-based numbering
                    tracing::warn!("Skipping CSV line {}: {}", idx + 2, e);
                    summary.rows_skipped += 1;
                }
            }
        }
        summary.rows_loaded = records.len();

        Ok(Self::with_summary(records, summary))
    }
}

fn ensure_required_columns(headers: &csv::StringRecord) -> Result<(), DataError> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    match TICKER_COLUMNS.iter().filter(|c| has(c)).count() {
        0 => return Err(DataError::MissingColumn("Ticker".to_string())),
        1 => {}
        _ => {
            return Err(DataError::DuplicateColumn(
                TICKER_COLUMNS[0].to_string(),
                TICKER_COLUMNS[1].to_string(),
            ))
        }
    }
    for column in REQUIRED_COLUMNS {
        if !has(column) {
            return Err(DataError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}
