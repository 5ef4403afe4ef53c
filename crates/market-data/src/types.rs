use serde::{Deserialize, Deserializer, Serialize};

use crate::loader::LoadSummary;

/// Cell values that mean "no data" in the source CSV.
const MISSING_TOKENS: &[&str] = &["", "nan", "na", "n/a", "null", "none", "-"];

/// One company row from the market data file.
///
/// Field names serialize to the CSV column names so table rows keep the
/// headers the dashboard displays (`P/E_Ratio`, `EV/EBITDA`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(rename = "Ticker", alias = "TICKERS")]
    pub ticker: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Market_Cap", default, deserialize_with = "deserialize_metric")]
    pub market_cap: Option<f64>,
    #[serde(rename = "Beta", default, deserialize_with = "deserialize_metric")]
    pub beta: Option<f64>,
    #[serde(rename = "P/E_Ratio", default, deserialize_with = "deserialize_metric")]
    pub pe_ratio: Option<f64>,
    #[serde(rename = "FWD_P/E_Ratio", default, deserialize_with = "deserialize_metric")]
    pub forward_pe_ratio: Option<f64>,
    #[serde(rename = "PEG_Ratio", default, deserialize_with = "deserialize_metric")]
    pub peg_ratio: Option<f64>,
    #[serde(rename = "P/B_Ratio", default, deserialize_with = "deserialize_metric")]
    pub pb_ratio: Option<f64>,
    #[serde(rename = "P/S_Ratio_TTM", default, deserialize_with = "deserialize_metric")]
    pub ps_ratio_ttm: Option<f64>,
    #[serde(rename = "EV/EBITDA", default, deserialize_with = "deserialize_metric")]
    pub ev_ebitda: Option<f64>,
    #[serde(rename = "Dividend_Yield", default, deserialize_with = "deserialize_metric")]
    pub dividend_yield: Option<f64>,
    #[serde(rename = "Profit_Margin", default, deserialize_with = "deserialize_metric")]
    pub profit_margin: Option<f64>,
    #[serde(rename = "Operating_Margin", default, deserialize_with = "deserialize_metric")]
    pub operating_margin: Option<f64>,
}

impl CompanyRecord {
    /// A record with the classification columns set and every metric missing.
    pub fn new(ticker: &str, name: &str, sector: &str, industry: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            name: name.to_string(),
            sector: sector.to_string(),
            industry: industry.to_string(),
            market_cap: None,
            beta: None,
            pe_ratio: None,
            forward_pe_ratio: None,
            peg_ratio: None,
            pb_ratio: None,
            ps_ratio_ttm: None,
            ev_ebitda: None,
            dividend_yield: None,
            profit_margin: None,
            operating_margin: None,
        }
    }
}

/// Parse one numeric cell. Missing-value tokens and non-finite numbers
/// (`inf`, `NaN`) come back as `None`.
pub fn parse_metric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if MISSING_TOKENS
        .iter()
        .any(|token| token.eq_ignore_ascii_case(trimmed))
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn deserialize_metric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_metric))
}

/// The immutable company dataset, rows kept in file order.
#[derive(Debug, Clone, Default)]
pub struct MarketDataset {
    records: Vec<CompanyRecord>,
    summary: LoadSummary,
}

impl MarketDataset {
    pub fn from_records(records: Vec<CompanyRecord>) -> Self {
        let summary = LoadSummary {
            rows_read: records.len(),
            rows_loaded: records.len(),
            rows_skipped: 0,
        };
        Self { records, summary }
    }

    pub(crate) fn with_summary(records: Vec<CompanyRecord>, summary: LoadSummary) -> Self {
        Self { records, summary }
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }
}
