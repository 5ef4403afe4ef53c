//! Market Data
//!
//! The company dataset behind the valuation dashboard: one row per ticker with
//! its Sector/Industry classification, market cap and valuation ratios.
//! Loaded once from CSV, then only read and filtered.

pub mod error;
pub mod filter;
pub mod loader;
pub mod options;
pub mod table;
pub mod types;

pub use error::*;
pub use filter::{filter_data, Selection};
pub use loader::LoadSummary;
pub use options::{resolve_default_selection, DropdownOption};
pub use table::{sort_records, ColumnValue, ALL_COLUMNS, TABLE_COLUMNS};
pub use types::*;
