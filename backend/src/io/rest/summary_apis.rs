use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::{chart, range_summary};
use crate::AppState;

// Query parameters for the range summary API
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Create a router for aggregate views over the expense dataset
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/expenses/summary", get(get_range_summary))
        .route("/expenses/chart", get(get_chart_series))
}

/// Totals for a date range, defaulting to the current month
async fn get_range_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    info!("GET /api/expenses/summary - query: {:?}", query);

    if !state.range_summary_enabled {
        return (StatusCode::NOT_FOUND, "Range summary is disabled").into_response();
    }

    let range = match range_summary::resolve_range(query.start, query.end, Local::now().date_naive()) {
        Ok(range) => range,
        Err(e) => {
            warn!("Rejected summary range: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state.expense_service.list_expenses().await {
        Ok(expenses) => {
            let summary = range_summary::summarize(&expenses, range);
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e) => {
            error!("Error summarizing expenses: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing expenses").into_response()
        }
    }
}

async fn get_chart_series(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses/chart");

    if !state.chart_enabled {
        return (StatusCode::NOT_FOUND, "Chart is disabled").into_response();
    }

    match state.expense_service.list_expenses().await {
        Ok(expenses) => (StatusCode::OK, Json(chart::cost_over_date(&expenses))).into_response(),
        Err(e) => {
            error!("Error building chart series: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing expenses").into_response()
        }
    }
}
