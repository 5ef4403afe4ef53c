use std::fmt;
use std::str::FromStr;

use market_data::CompanyRecord;

use crate::ChartError;

/// A numeric column that can be plotted against tickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValuationMetric {
    Pe,
    Pb,
    Ps,
    EvEbitda,
    FwdPe,
    Peg,
    Beta,
    DividendYield,
    ProfitMargin,
    OperatingMargin,
    MarketCap,
}

/// The four scatters on the dashboard, in layout order.
pub const DASHBOARD_METRICS: [ValuationMetric; 4] = [
    ValuationMetric::Pe,
    ValuationMetric::Pb,
    ValuationMetric::Ps,
    ValuationMetric::EvEbitda,
];

impl ValuationMetric {
    pub const ALL: [ValuationMetric; 11] = [
        ValuationMetric::Pe,
        ValuationMetric::Pb,
        ValuationMetric::Ps,
        ValuationMetric::EvEbitda,
        ValuationMetric::FwdPe,
        ValuationMetric::Peg,
        ValuationMetric::Beta,
        ValuationMetric::DividendYield,
        ValuationMetric::ProfitMargin,
        ValuationMetric::OperatingMargin,
        ValuationMetric::MarketCap,
    ];

    /// URL-safe identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            ValuationMetric::Pe => "pe",
            ValuationMetric::Pb => "pb",
            ValuationMetric::Ps => "ps",
            ValuationMetric::EvEbitda => "ev_ebitda",
            ValuationMetric::FwdPe => "fwd_pe",
            ValuationMetric::Peg => "peg",
            ValuationMetric::Beta => "beta",
            ValuationMetric::DividendYield => "dividend_yield",
            ValuationMetric::ProfitMargin => "profit_margin",
            ValuationMetric::OperatingMargin => "operating_margin",
            ValuationMetric::MarketCap => "market_cap",
        }
    }

    /// Dataset column name, used for axis and title text.
    pub fn column(&self) -> &'static str {
        match self {
            ValuationMetric::Pe => "P/E_Ratio",
            ValuationMetric::Pb => "P/B_Ratio",
            ValuationMetric::Ps => "P/S_Ratio_TTM",
            ValuationMetric::EvEbitda => "EV/EBITDA",
            ValuationMetric::FwdPe => "FWD_P/E_Ratio",
            ValuationMetric::Peg => "PEG_Ratio",
            ValuationMetric::Beta => "Beta",
            ValuationMetric::DividendYield => "Dividend_Yield",
            ValuationMetric::ProfitMargin => "Profit_Margin",
            ValuationMetric::OperatingMargin => "Operating_Margin",
            ValuationMetric::MarketCap => "Market_Cap",
        }
    }

    pub fn value(&self, record: &CompanyRecord) -> Option<f64> {
        match self {
            ValuationMetric::Pe => record.pe_ratio,
            ValuationMetric::Pb => record.pb_ratio,
            ValuationMetric::Ps => record.ps_ratio_ttm,
            ValuationMetric::EvEbitda => record.ev_ebitda,
            ValuationMetric::FwdPe => record.forward_pe_ratio,
            ValuationMetric::Peg => record.peg_ratio,
            ValuationMetric::Beta => record.beta,
            ValuationMetric::DividendYield => record.dividend_yield,
            ValuationMetric::ProfitMargin => record.profit_margin,
            ValuationMetric::OperatingMargin => record.operating_margin,
            ValuationMetric::MarketCap => record.market_cap,
        }
    }
}

impl fmt::Display for ValuationMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Accepts either the slug (`pe`) or the column name (`P/E_Ratio`).
impl FromStr for ValuationMetric {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.slug() == s || m.column() == s)
            .ok_or_else(|| ChartError::UnknownMetric(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slug_and_column() {
        assert_eq!("pe".parse::<ValuationMetric>(), Ok(ValuationMetric::Pe));
        assert_eq!("EV/EBITDA".parse::<ValuationMetric>(), Ok(ValuationMetric::EvEbitda));
        assert_eq!("P/S_Ratio_TTM".parse::<ValuationMetric>(), Ok(ValuationMetric::Ps));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "volume".parse::<ValuationMetric>(),
            Err(ChartError::UnknownMetric("volume".into()))
        );
    }

    #[test]
    fn test_columns_exist_on_records() {
        let record = CompanyRecord::new("MCD", "McDonald's", "Consumer Cyclical", "Restaurants");
        for metric in ValuationMetric::ALL {
            assert!(record.column(metric.column()).is_some(), "{metric}");
        }
    }

    #[test]
    fn test_value_reads_matching_field() {
        let mut record = CompanyRecord::new("MCD", "McDonald's", "Consumer Cyclical", "Restaurants");
        record.ev_ebitda = Some(18.4);
        assert_eq!(ValuationMetric::EvEbitda.value(&record), Some(18.4));
        assert_eq!(ValuationMetric::Pe.value(&record), None);
    }
}
