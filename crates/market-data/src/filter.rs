//! Sector / industry filtering.

use serde::Serialize;

use crate::{CompanyRecord, MarketDataset};

/// A dropdown selection: one sector plus an optional set of industries.
/// An empty industry list means every industry in the sector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub sector: String,
    pub industries: Vec<String>,
}

impl Selection {
    pub fn new(sector: impl Into<String>, industries: Vec<String>) -> Self {
        Self {
            sector: sector.into(),
            industries,
        }
    }

    /// Rows of `dataset` inside this selection, copied in file order.
    pub fn apply(&self, dataset: &MarketDataset) -> Vec<CompanyRecord> {
        filter_data(dataset, &self.sector, &self.industries)
    }
}

/// Rows whose Sector equals `sector`, further restricted to `industries` when
/// that list is non-empty. An unknown sector gives an empty result.
pub fn filter_data(
    dataset: &MarketDataset,
    sector: &str,
    industries: &[String],
) -> Vec<CompanyRecord> {
    dataset
        .records()
        .iter()
        .filter(|r| r.sector == sector)
        .filter(|r| industries.is_empty() || industries.contains(&r.industry))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> MarketDataset {
        MarketDataset::from_records(vec![
            CompanyRecord::new("MCD", "McDonald's", "Consumer Cyclical", "Restaurants"),
            CompanyRecord::new("HD", "Home Depot", "Consumer Cyclical", "Home Improvement Retail"),
            CompanyRecord::new("JNJ", "Johnson & Johnson", "Healthcare", "Drug Manufacturers - General"),
            CompanyRecord::new("SBUX", "Starbucks", "Consumer Cyclical", "Restaurants"),
            CompanyRecord::new("TSLA", "Tesla", "Consumer Cyclical", "Auto Manufacturers"),
        ])
    }

    fn tickers(rows: &[CompanyRecord]) -> Vec<&str> {
        rows.iter().map(|r| r.ticker.as_str()).collect()
    }

    #[test]
    fn test_empty_industries_returns_whole_sector() {
        let rows = filter_data(&dataset(), "Consumer Cyclical", &[]);
        assert_eq!(tickers(&rows), vec!["MCD", "HD", "SBUX", "TSLA"]);
        assert!(rows.iter().all(|r| r.sector == "Consumer Cyclical"));
    }

    #[test]
    fn test_industries_restrict_within_sector() {
        let industries = vec!["Restaurants".to_string(), "Auto Manufacturers".to_string()];
        let rows = filter_data(&dataset(), "Consumer Cyclical", &industries);
        assert_eq!(tickers(&rows), vec!["MCD", "SBUX", "TSLA"]);
    }

    #[test]
    fn test_industry_from_other_sector_does_not_leak() {
        let industries = vec!["Drug Manufacturers - General".to_string()];
        let rows = filter_data(&dataset(), "Consumer Cyclical", &industries);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_unknown_sector_is_empty() {
        assert!(filter_data(&dataset(), "Utilities", &[]).is_empty());
        assert!(filter_data(&dataset(), "consumer cyclical", &[]).is_empty());
    }

    #[test]
    fn test_selection_apply_filters_by_sector_and_industries() {
        let data = dataset();

        let whole_sector = Selection::new("Consumer Cyclical", Vec::new()).apply(&data);
        assert_eq!(tickers(&whole_sector), vec!["MCD", "HD", "SBUX", "TSLA"]);

        let restaurants =
            Selection::new("Consumer Cyclical", vec!["Restaurants".to_string()]).apply(&data);
        assert_eq!(tickers(&restaurants), vec!["MCD", "SBUX"]);

        let leaked =
            Selection::new("Healthcare", vec!["Restaurants".to_string()]).apply(&data);
        assert!(leaked.is_empty());

        assert!(Selection::new("Utilities", Vec::new()).apply(&data).is_empty());
    }

    #[test]
    fn test_filter_leaves_dataset_untouched() {
        let data = dataset();
        let _ = filter_data(&data, "Healthcare", &[]);
        assert_eq!(data.len(), 5);
    }
}
