//! Chart API Routes
//!
//! Market-cap treemap and valuation-ratio scatters for a selection.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::Query;
use market_data::CompanyRecord;
use serde::Serialize;
use valuation_charts::{generate_scatter, generate_treemap, median_line, Figure, ValuationMetric};

use crate::selection::SelectionQuery;
use crate::{ApiResponse, AppError, AppState};

/// One scatter plus the median it was annotated with.
#[derive(Debug, Clone, Serialize)]
pub struct MetricFigure {
    pub metric: String,
    pub column: String,
    pub median: Option<f64>,
    pub figure: Figure,
}

impl MetricFigure {
    pub fn build(records: &[CompanyRecord], metric: ValuationMetric) -> Self {
        Self {
            metric: metric.slug().to_string(),
            column: metric.column().to_string(),
            median: median_line(records, metric),
            figure: generate_scatter(records, metric),
        }
    }
}

pub fn chart_routes() -> Router<AppState> {
    Router::new()
        .route("/api/treemap", get(get_treemap))
        .route("/api/scatter/:metric", get(get_scatter))
}

#[utoipa::path(
    get,
    path = "/api/treemap",
    params(SelectionQuery),
    responses(
        (status = 200, description = "Sector → Industry → Ticker treemap sized by market cap"),
        (status = 400, description = "Missing sector")
    ),
    tag = "Charts"
)]
pub async fn get_treemap(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<ApiResponse<Figure>>, AppError> {
    let selection = query.into_selection()?;
    let rows = selection.apply(&state.dataset);

    tracing::debug!("Treemap for '{}': {} rows", selection.sector, rows.len());

    Ok(Json(ApiResponse::success(generate_treemap(&rows))))
}

#[utoipa::path(
    get,
    path = "/api/scatter/{metric}",
    params(
        ("metric" = String, Path, description = "Metric slug (pe, pb, ps, ev_ebitda, ...) or column name"),
        SelectionQuery
    ),
    responses(
        (status = 200, description = "Per-ticker scatter with median line"),
        (status = 400, description = "Missing sector"),
        (status = 404, description = "Unknown metric")
    ),
    tag = "Charts"
)]
pub async fn get_scatter(
    State(state): State<AppState>,
    Path(metric): Path<String>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<ApiResponse<MetricFigure>>, AppError> {
    let metric: ValuationMetric = metric.parse()?;
    let selection = query.into_selection()?;
    let rows = selection.apply(&state.dataset);

    tracing::debug!(
        "{} scatter for '{}': {} rows",
        metric,
        selection.sector,
        rows.len()
    );

    Ok(Json(ApiResponse::success(MetricFigure::build(&rows, metric))))
}
