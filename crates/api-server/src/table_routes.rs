//! Table API Routes
//!
//! Company rows for the data table, optionally sorted by a column.

use axum::{extract::State, routing::get, Json, Router};
use axum_extra::extract::Query;
use market_data::{sort_records, CompanyRecord, TABLE_COLUMNS};
use serde::{Deserialize, Serialize};

use crate::selection::SelectionQuery;
use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TableQuery {
    /// Sector to show
    pub sector: Option<String>,
    /// Industries inside the sector; repeat the key for several, omit for all
    #[serde(default)]
    pub industry: Vec<String>,
    /// Column to sort by, e.g. `P/E_Ratio`
    pub sort_by: Option<String>,
    /// Sort descending (default false)
    #[serde(default)]
    pub sort_desc: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<CompanyRecord>,
    pub row_count: usize,
}

impl TableData {
    /// Rows in file order, or sorted with missing cells last.
    pub fn build(
        mut rows: Vec<CompanyRecord>,
        sort_by: Option<&str>,
        descending: bool,
    ) -> Result<Self, AppError> {
        if let Some(column) = sort_by.filter(|c| !c.is_empty()) {
            sort_records(&mut rows, column, descending)?;
        }
        Ok(Self {
            columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            row_count: rows.len(),
            rows,
        })
    }
}

pub fn table_routes() -> Router<AppState> {
    Router::new().route("/api/table", get(get_table))
}

#[utoipa::path(
    get,
    path = "/api/table",
    params(TableQuery),
    responses(
        (status = 200, description = "Table columns and company rows"),
        (status = 400, description = "Missing sector or unknown sort column")
    ),
    tag = "Table"
)]
pub async fn get_table(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> Result<Json<ApiResponse<TableData>>, AppError> {
    let TableQuery {
        sector,
        industry,
        sort_by,
        sort_desc,
    } = query;
    let selection = SelectionQuery { sector, industry }.into_selection()?;
    let rows = selection.apply(&state.dataset);

    let table = TableData::build(rows, sort_by.as_deref(), sort_desc)?;
    Ok(Json(ApiResponse::success(table)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<CompanyRecord> {
        let mut a = CompanyRecord::new("MCD", "McDonald's", "Consumer Cyclical", "Restaurants");
        a.beta = Some(0.7);
        let mut b = CompanyRecord::new("SBUX", "Starbucks", "Consumer Cyclical", "Restaurants");
        b.beta = Some(1.0);
        vec![a, b]
    }

    #[test]
    fn test_build_keeps_file_order_without_sort() {
        let table = TableData::build(rows(), None, false).unwrap();
        assert_eq!(table.row_count, 2);
        assert_eq!(table.rows[0].ticker, "MCD");
        assert_eq!(table.columns.len(), TABLE_COLUMNS.len());
        assert_eq!(table.columns[0], "Ticker");
    }

    #[test]
    fn test_build_sorts_descending() {
        let table = TableData::build(rows(), Some("Beta"), true).unwrap();
        assert_eq!(table.rows[0].ticker, "SBUX");
    }

    #[test]
    fn test_build_rejects_unknown_column() {
        let err = TableData::build(rows(), Some("Volume"), false).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
