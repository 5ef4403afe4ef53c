//! Data table columns and sorting.

use std::cmp::Ordering;

use crate::{CompanyRecord, DataError};

/// Columns shown in the dashboard table, in display order.
pub const TABLE_COLUMNS: &[&str] = &[
    "Ticker",
    "Name",
    "Beta",
    "Sector",
    "Industry",
    "P/E_Ratio",
    "FWD_P/E_Ratio",
    "PEG_Ratio",
    "P/B_Ratio",
    "P/S_Ratio_TTM",
    "EV/EBITDA",
    "Dividend_Yield",
    "Profit_Margin",
    "Operating_Margin",
];

/// Every column a record carries: the table columns plus `Market_Cap`.
pub const ALL_COLUMNS: &[&str] = &[
    "Ticker",
    "Name",
    "Sector",
    "Industry",
    "Market_Cap",
    "Beta",
    "P/E_Ratio",
    "FWD_P/E_Ratio",
    "PEG_Ratio",
    "P/B_Ratio",
    "P/S_Ratio_TTM",
    "EV/EBITDA",
    "Dividend_Yield",
    "Profit_Margin",
    "Operating_Margin",
];

/// A single cell, borrowed from its record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
}

impl ColumnValue<'_> {
    fn is_missing(&self) -> bool {
        match self {
            ColumnValue::Text(s) => s.is_empty(),
            ColumnValue::Number(v) => v.is_none(),
        }
    }
}

impl CompanyRecord {
    /// Look up a cell by its column name. `None` for an unknown column.
    pub fn column(&self, name: &str) -> Option<ColumnValue<'_>> {
        let value = match name {
            "Ticker" => ColumnValue::Text(&self.ticker),
            "Name" => ColumnValue::Text(&self.name),
            "Sector" => ColumnValue::Text(&self.sector),
            "Industry" => ColumnValue::Text(&self.industry),
            "Market_Cap" => ColumnValue::Number(self.market_cap),
            "Beta" => ColumnValue::Number(self.beta),
            "P/E_Ratio" => ColumnValue::Number(self.pe_ratio),
            "FWD_P/E_Ratio" => ColumnValue::Number(self.forward_pe_ratio),
            "PEG_Ratio" => ColumnValue::Number(self.peg_ratio),
            "P/B_Ratio" => ColumnValue::Number(self.pb_ratio),
            "P/S_Ratio_TTM" => ColumnValue::Number(self.ps_ratio_ttm),
            "EV/EBITDA" => ColumnValue::Number(self.ev_ebitda),
            "Dividend_Yield" => ColumnValue::Number(self.dividend_yield),
            "Profit_Margin" => ColumnValue::Number(self.profit_margin),
            "Operating_Margin" => ColumnValue::Number(self.operating_margin),
            _ => return None,
        };
        Some(value)
    }
}

fn compare_present(a: ColumnValue<'_>, b: ColumnValue<'_>) -> Ordering {
    match (a, b) {
        (ColumnValue::Text(x), ColumnValue::Text(y)) => x.cmp(y),
        (ColumnValue::Number(Some(x)), ColumnValue::Number(Some(y))) => x.total_cmp(&y),
        _ => Ordering::Equal,
    }
}

fn compare_cells(a: ColumnValue<'_>, b: ColumnValue<'_>, descending: bool) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if descending => compare_present(a, b).reverse(),
        (false, false) => compare_present(a, b),
    }
}

/// Stable sort by `column`. Missing cells go last in both directions.
pub fn sort_records(
    records: &mut [CompanyRecord],
    column: &str,
    descending: bool,
) -> Result<(), DataError> {
    if !ALL_COLUMNS.contains(&column) {
        return Err(DataError::UnknownColumn(column.to_string()));
    }

    records.sort_by(|a, b| match (a.column(column), b.column(column)) {
        (Some(x), Some(y)) => compare_cells(x, y, descending),
        _ => Ordering::Equal,
    });
    Ok(())
}
