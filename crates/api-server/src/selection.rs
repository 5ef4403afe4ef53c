//! Query-string form of a dropdown selection.
//!
//! Industries arrive as repeated `industry=` keys because industry names can
//! contain commas, so these queries go through `axum_extra::extract::Query`.

use market_data::Selection;
use serde::Deserialize;

use crate::AppError;

#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SelectionQuery {
    /// Sector to show
    pub sector: Option<String>,
    /// Industries inside the sector; repeat the key for several, omit for all
    #[serde(default)]
    pub industry: Vec<String>,
}

impl SelectionQuery {
    pub fn into_selection(self) -> Result<Selection, AppError> {
        let sector = self
            .sector
            .ok_or_else(|| AppError::BadRequest("Missing required query parameter: sector".into()))?;
        let industries = self
            .industry
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
        Ok(Selection::new(sector, industries))
    }
}
