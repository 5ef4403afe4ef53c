//! Dashboard API Routes
//!
//! Page setup (title, notes, defaults), dropdown options, and a combined
//! endpoint that returns every panel for a selection in one response.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use market_data::{DropdownOption, Selection, TABLE_COLUMNS};
use serde::{Deserialize, Serialize};
use valuation_charts::{generate_treemap, Figure, DASHBOARD_METRICS};

use crate::chart_routes::MetricFigure;
use crate::selection::SelectionQuery;
use crate::table_routes::TableData;
use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct MetricInfo {
    pub slug: String,
    pub column: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DashboardConfig {
    pub title: String,
    pub subtitle: String,
    pub notes: Vec<String>,
    pub upcoming_improvements: Vec<String>,
    pub sectors: Vec<String>,
    pub default_sector: String,
    pub default_industries: Vec<String>,
    pub table_columns: Vec<String>,
    pub scatter_metrics: Vec<MetricInfo>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IndustryQuery {
    /// Sector whose industries to list; unknown or empty gives no options
    #[serde(default)]
    pub sector: String,
}

/// Everything the page shows for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub industry_options: Vec<DropdownOption>,
    pub treemap: Figure,
    pub scatters: Vec<MetricFigure>,
    pub table: TableData,
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard/config", get(get_dashboard_config))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/sectors", get(list_sectors))
        .route("/api/industries", get(list_industries))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/config",
    responses((status = 200, description = "Page text, default selection and panel setup")),
    tag = "Dashboard"
)]
pub async fn get_dashboard_config(
    State(state): State<AppState>,
) -> Json<ApiResponse<DashboardConfig>> {
    let settings = &state.settings;
    Json(ApiResponse::success(DashboardConfig {
        title: settings.title.clone(),
        subtitle: settings.subtitle.clone(),
        notes: settings.notes.clone(),
        upcoming_improvements: settings.upcoming_improvements.clone(),
        sectors: state.dataset.sectors(),
        default_sector: settings.default_selection.sector.clone(),
        default_industries: settings.default_selection.industries.clone(),
        table_columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        scatter_metrics: DASHBOARD_METRICS
            .iter()
            .map(|m| MetricInfo {
                slug: m.slug().to_string(),
                column: m.column().to_string(),
            })
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/sectors",
    responses((status = 200, description = "Sectors in order of first appearance")),
    tag = "Dashboard"
)]
pub async fn list_sectors(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::success(state.dataset.sectors()))
}

#[utoipa::path(
    get,
    path = "/api/industries",
    params(IndustryQuery),
    responses((status = 200, description = "Industry dropdown options for the sector")),
    tag = "Dashboard"
)]
pub async fn list_industries(
    State(state): State<AppState>,
    Query(query): Query<IndustryQuery>,
) -> Json<ApiResponse<Vec<DropdownOption>>> {
    Json(ApiResponse::success(
        state.dataset.industry_options(&query.sector),
    ))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(SelectionQuery),
    responses(
        (status = 200, description = "Treemap, the four ratio scatters, table rows and industry options"),
        (status = 400, description = "Missing sector")
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    axum_extra::extract::Query(query): axum_extra::extract::Query<SelectionQuery>,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let selection = query.into_selection()?;
    let rows = selection.apply(&state.dataset);

    tracing::info!(
        "Dashboard: sector='{}', industries={:?}, rows={}",
        selection.sector,
        selection.industries,
        rows.len()
    );

    let view = DashboardView {
        industry_options: state.dataset.industry_options(&selection.sector),
        treemap: generate_treemap(&rows),
        scatters: DASHBOARD_METRICS
            .iter()
            .map(|m| MetricFigure::build(&rows, *m))
            .collect(),
        table: TableData::build(rows, None, false)?,
        selection,
    };

    Ok(Json(ApiResponse::success(view)))
}
