//! Valuation Charts
//!
//! Turns filtered company rows into Plotly figures: a Sector → Industry →
//! Ticker treemap sized and colored by market cap, and per-metric scatters
//! with a median reference line.

pub mod error;
pub mod figure;
pub mod metric;
pub mod scatter;
pub mod stats;
pub mod treemap;

pub use error::ChartError;
pub use figure::{Figure, Layout, Trace};
pub use metric::{ValuationMetric, DASHBOARD_METRICS};
pub use scatter::{generate_scatter, median_line};
pub use treemap::{generate_treemap, market_cap_million};
