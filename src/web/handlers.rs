//! Request handlers: the dashboard page and the read-only JSON API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::data::{
    CategoryCounts, ColumnError, CrossTab, DataProcessor, Dataset, HrColumns, Selection,
};
use crate::stats::{StatsCalculator, Summary};
use crate::web::app::DashboardView;
use crate::web::page::{render_dashboard, render_load_error};
use crate::web::state::{AppState, SharedState};

/// Sidebar query string. Department and gender repeat once per checked box.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    #[serde(default)]
    pub department: Vec<String>,
    #[serde(default)]
    pub gender: Vec<String>,
    /// Present once the sidebar form has been submitted.
    pub filtered: Option<String>,
}

impl SelectionQuery {
    pub fn into_selection(self) -> Selection {
        if self.filtered.is_none() {
            return Selection::all();
        }
        Selection {
            departments: Some(self.department),
            genders: Some(self.gender),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Dataset unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Column(#[from] ColumnError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Column(ColumnError::Missing { .. }) => StatusCode::NOT_FOUND,
            ApiError::Column(ColumnError::PolarsError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn loaded(state: &AppState) -> Result<&Dataset, ApiError> {
    state
        .dataset
        .as_ref()
        .map_err(|err| ApiError::Unavailable(err.to_string()))
}

/// Dataset narrowed to the selection in the query string.
fn selected(state: &AppState, query: SelectionQuery) -> Result<Dataset, ApiError> {
    let dataset = loaded(state)?;
    let filtered = DataProcessor::filter(
        dataset,
        &query.into_selection(),
        &state.columns.department,
        &state.columns.gender_id,
    )?;
    Ok(filtered)
}

pub async fn dashboard(
    State(state): State<SharedState>,
    Query(query): Query<SelectionQuery>,
) -> Html<String> {
    match &state.dataset {
        Ok(dataset) => {
            let view = DashboardView::build(dataset, &state.columns, &query.into_selection());
            Html(render_dashboard(&view))
        }
        Err(err) => Html(render_load_error(&err.to_string())),
    }
}

pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
pub struct ColumnsResponse {
    pub rows: usize,
    pub columns: Vec<String>,
    /// Column each dashboard view reads.
    pub roles: HrColumns,
}

pub async fn api_columns(
    State(state): State<SharedState>,
) -> Result<Json<ColumnsResponse>, ApiError> {
    let dataset = loaded(&state)?;
    Ok(Json(ColumnsResponse {
        rows: dataset.row_count(),
        columns: dataset.columns(),
        roles: state.columns.clone(),
    }))
}

pub async fn api_summary(
    State(state): State<SharedState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<Summary>, ApiError> {
    let dataset = selected(&state, query)?;
    Ok(Json(StatsCalculator::summarize(&dataset, &state.columns)?))
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub column: String,
    pub total: usize,
    pub counts: CategoryCounts,
}

pub async fn api_count(
    State(state): State<SharedState>,
    Path(column): Path<String>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let dataset = selected(&state, query)?;
    let counts = DataProcessor::count_by(&dataset, &column).inspect_err(|err| {
        warn!(%column, error = %err, "count rejected");
    })?;
    Ok(Json(CountResponse {
        column,
        total: counts.total(),
        counts,
    }))
}

#[derive(Debug, Serialize)]
pub struct CrossTabResponse {
    pub row_column: String,
    pub column_column: String,
    #[serde(flatten)]
    pub table: CrossTab,
}

pub async fn api_crosstab(
    State(state): State<SharedState>,
    Path((column_a, column_b)): Path<(String, String)>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<CrossTabResponse>, ApiError> {
    let dataset = selected(&state, query)?;
    let table = DataProcessor::cross_tabulate(&dataset, &column_a, &column_b).inspect_err(
        |err| warn!(%column_a, %column_b, error = %err, "cross tabulation rejected"),
    )?;
    Ok(Json(CrossTabResponse {
        row_column: column_a,
        column_column: column_b,
        table,
    }))
}
