//! Dropdown option lists derived from the dataset.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{MarketDataset, Selection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

impl DropdownOption {
    pub fn new(value: &str) -> Self {
        Self {
            label: value.to_string(),
            value: value.to_string(),
        }
    }
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

impl MarketDataset {
    /// Distinct sectors in order of first appearance.
    pub fn sectors(&self) -> Vec<String> {
        unique_in_order(self.records().iter().map(|r| r.sector.as_str()))
    }

    /// Distinct industries of `sector`, in order of first appearance.
    pub fn industries_for_sector(&self, sector: &str) -> Vec<String> {
        unique_in_order(
            self.records()
                .iter()
                .filter(|r| r.sector == sector)
                .map(|r| r.industry.as_str()),
        )
    }

    pub fn industry_options(&self, sector: &str) -> Vec<DropdownOption> {
        self.industries_for_sector(sector)
            .iter()
            .map(|i| DropdownOption::new(i))
            .collect()
    }
}

/// Resolve the initial dropdown state against the loaded data.
///
/// Falls back to the first sector when `sector` is absent, and drops any
/// industry that does not belong to the resolved sector.
pub fn resolve_default_selection(
    dataset: &MarketDataset,
    sector: &str,
    industries: &[String],
) -> Selection {
    let sectors = dataset.sectors();
    let sector = if sectors.iter().any(|s| s == sector) {
        sector.to_string()
    } else {
        match sectors.into_iter().next() {
            Some(first) => {
                tracing::warn!("Default sector '{}' not in data, using '{}'", sector, first);
                first
            }
            None => return Selection::default(),
        }
    };

    let available = dataset.industries_for_sector(&sector);
    let industries = industries
        .iter()
        .filter(|i| available.contains(i))
        .cloned()
        .collect();

    Selection::new(sector, industries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompanyRecord;

    fn dataset() -> MarketDataset {
        MarketDataset::from_records(vec![
            CompanyRecord::new("XOM", "Exxon Mobil", "Energy", "Oil & Gas Integrated"),
            CompanyRecord::new("MCD", "McDonald's", "Consumer Cyclical", "Restaurants"),
            CompanyRecord::new("HD", "Home Depot", "Consumer Cyclical", "Home Improvement Retail"),
            CompanyRecord::new("SBUX", "Starbucks", "Consumer Cyclical", "Restaurants"),
            CompanyRecord::new("CVX", "Chevron", "Energy", "Oil & Gas Integrated"),
            CompanyRecord::new("SLB", "Schlumberger", "Energy", "Oil & Gas Equipment & Services"),
        ])
    }

    #[test]
    fn test_sectors_unique_in_order() {
        assert_eq!(dataset().sectors(), vec!["Energy", "Consumer Cyclical"]);
    }

    #[test]
    fn test_industries_follow_sector_selection() {
        let data = dataset();
        assert_eq!(
            data.industries_for_sector("Consumer Cyclical"),
            vec!["Restaurants", "Home Improvement Retail"]
        );
        assert_eq!(
            data.industries_for_sector("Energy"),
            vec!["Oil & Gas Integrated", "Oil & Gas Equipment & Services"]
        );
        assert!(data.industries_for_sector("Utilities").is_empty());
    }

    #[test]
    fn test_industry_options_label_equals_value() {
        let options = dataset().industry_options("Consumer Cyclical");
        assert_eq!(options[0], DropdownOption::new("Restaurants"));
        assert!(options.iter().all(|o| o.label == o.value));
    }

    #[test]
    fn test_default_selection_kept_when_present() {
        let selection = resolve_default_selection(
            &dataset(),
            "Consumer Cyclical",
            &["Restaurants".to_string()],
        );
        assert_eq!(selection.sector, "Consumer Cyclical");
        assert_eq!(selection.industries, vec!["Restaurants"]);
    }

    #[test]
    fn test_default_selection_falls_back_to_first_sector() {
        let selection =
            resolve_default_selection(&dataset(), "Technology", &["Restaurants".to_string()]);
        assert_eq!(selection.sector, "Energy");
        assert!(selection.industries.is_empty());
    }

    #[test]
    fn test_default_selection_on_empty_dataset() {
        let selection = resolve_default_selection(&MarketDataset::default(), "Energy", &[]);
        assert_eq!(selection, Selection::default());
    }
}
