use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChartError {
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),
}
