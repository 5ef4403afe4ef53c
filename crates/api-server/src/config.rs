use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Dashboard text shown above the dropdowns.
const TITLE: &str = "Stock Valuation Finder";
const SUBTITLE: &str = "By Daniel De La Hormaza";
const NOTES: &[&str] = &[
    "Version 1. Data as of Oct 23, 2024",
    "Select a Sector and an Industry. Explore stocks to find valuation targets.",
    "Data obtained from Yahoo Finance using yfinance API.",
];
const UPCOMING_IMPROVEMENTS: &[&str] = &[
    "Correct for Missing Data",
    "Improve Presentation of a number of data points",
    "Performance Improvements",
];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_path: PathBuf,
    pub host: String,
    pub port: u16,

    // Initial dropdown state
    pub default_sector: String,
    pub default_industries: Vec<String>,

    // CORS origins; empty allows any
    pub allowed_origins: Vec<String>,
    pub enable_hsts: bool,

    // Page text
    pub title: String,
    pub subtitle: String,
    pub notes: Vec<String>,
    pub upcoming_improvements: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port_raw = var("API_PORT", "8050");
        let port = port_raw
            .trim()
            .parse()
            .with_context(|| format!("API_PORT must be a port number, got '{port_raw}'"))?;

        let config = Self {
            data_path: var("MARKET_DATA_PATH", "data/Market_Data.csv").into(),
            host: var("API_HOST", "0.0.0.0"),
            port,

            default_sector: var("DEFAULT_SECTOR", "Consumer Cyclical"),
            // Industry names contain commas, so the list is '|'-separated
            default_industries: split_list(&var("DEFAULT_INDUSTRIES", "Restaurants"), '|'),

            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|v| split_list(&v, ','))
                .unwrap_or_default(),
            enable_hsts: lookup("ENABLE_HSTS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),

            title: var("DASHBOARD_TITLE", TITLE),
            subtitle: var("DASHBOARD_SUBTITLE", SUBTITLE),
            notes: NOTES.iter().map(|s| s.to_string()).collect(),
            upcoming_improvements: UPCOMING_IMPROVEMENTS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: "data/Market_Data.csv".into(),
            host: "0.0.0.0".to_string(),
            port: 8050,
            default_sector: "Consumer Cyclical".to_string(),
            default_industries: vec!["Restaurants".to_string()],
            allowed_origins: Vec::new(),
            enable_hsts: false,
            title: TITLE.to_string(),
            subtitle: SUBTITLE.to_string(),
            notes: NOTES.iter().map(|s| s.to_string()).collect(),
            upcoming_improvements: UPCOMING_IMPROVEMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn split_list(raw: &str, sep: char) -> Vec<String> {
    raw.split(sep)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
