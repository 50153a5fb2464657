use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Local;
use shared::{ExpenseFormInput, ExpenseListResponse, ExpenseTableResponse};
use tracing::{error, info};

use crate::AppState;

/// Create a router for expense entry and listing APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(submit_expense))
        .route("/expenses/form", get(get_form_defaults))
        .route("/expenses/validate", post(validate_expense))
        .route("/expenses/table", get(get_expense_table))
}

/// Initial values for a blank expense form, dated today
async fn get_form_defaults(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses/form");

    let defaults = state.expense_service.form_defaults(Local::now().date_naive());
    (StatusCode::OK, Json(defaults)).into_response()
}

/// Run the full submission workflow.
///
/// Always answers 200: rejection and storage failures are reported through
/// the diagnostics in the outcome.
async fn submit_expense(
    State(state): State<AppState>,
    Json(input): Json<ExpenseFormInput>,
) -> impl IntoResponse {
    info!("POST /api/expenses - input: {:?}", input);

    let outcome = state.expense_service.submit_expense(input).await;
    (StatusCode::OK, Json(outcome)).into_response()
}

async fn validate_expense(
    State(state): State<AppState>,
    Json(input): Json<ExpenseFormInput>,
) -> impl IntoResponse {
    info!("POST /api/expenses/validate - input: {:?}", input);

    let outcome = state
        .expense_service
        .validate_form(input, Local::now().date_naive());
    (StatusCode::OK, Json(outcome)).into_response()
}

async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses");

    match state.expense_service.list_expenses().await {
        Ok(expenses) => {
            let response = ExpenseListResponse {
                count: expenses.len(),
                expenses,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Error listing expenses: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing expenses").into_response()
        }
    }
}

/// The dataset formatted for a table, in store order
async fn get_expense_table(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses/table");

    match state.expense_service.list_expenses().await {
        Ok(expenses) => {
            let rows = state.expense_table_service.format_expenses_for_table(&expenses);
            (StatusCode::OK, Json(ExpenseTableResponse { rows })).into_response()
        }
        Err(e) => {
            error!("Error formatting expense table: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing expenses").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::{create_router, initialize_backend};
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use shared::{DiagnosticField, ExpenseFormDefaults, Severity, SubmissionOutcome, ValidationOutcome};
    use tower::ServiceExt;

    fn test_config() -> AppConfig {
        AppConfig {
            database_url: format!(
                "sqlite:file:memdb_{}?mode=memory&cache=shared",
                uuid::Uuid::new_v4().simple()
            ),
            ..AppConfig::default()
        }
    }

    async fn test_router() -> Result<Router, Box<dyn std::error::Error>> {
        let config = test_config();
        let app_state = initialize_backend(&config).await?;
        Ok(create_router(app_state, &config)?)
    }

    fn json_post(uri: &str, body: serde_json::Value) -> Result<Request<Body>, axum::http::Error> {
        Request::builder()
            .uri(uri)
            .method(Method::POST)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
    }

    #[tokio::test]
    async fn test_get_form_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let app = test_router().await?;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/expenses/form")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let defaults: ExpenseFormDefaults = serde_json::from_slice(&body)?;

        assert_eq!(defaults.date, defaults.max_date);
        assert_eq!(defaults.cost, 0.0);
        assert_eq!(defaults.cost_step, 1.0);
        assert!(defaults.location.is_empty());
        assert!(!defaults.gift);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_valid_expense_refreshes_dataset() -> Result<(), Box<dyn std::error::Error>> {
        let app = test_router().await?;

        let request = json_post(
            "/api/expenses",
            serde_json::json!({
                "date": "2024-03-01",
                "cost": 12.345,
                "location": "Market",
                "comment": "",
                "gift": true
            }),
        )?;
        let response = app.oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let outcome: SubmissionOutcome = serde_json::from_slice(&body)?;

        assert!(outcome.accepted);
        assert!(outcome.dataset_refreshed);
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| d.field == DiagnosticField::Comment && d.severity == Severity::Warning));

        let expenses = outcome.expenses.ok_or("expected refreshed dataset")?;
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].cost, 12.35);
        assert!(expenses[0].gift);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_rejected_expense_is_not_stored() -> Result<(), Box<dyn std::error::Error>> {
        let app = test_router().await?;

        let request = json_post(
            "/api/expenses",
            serde_json::json!({ "date": "2024-03-01", "cost": 0.0, "location": "" }),
        )?;
        let response = app.clone().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let outcome: SubmissionOutcome = serde_json::from_slice(&body)?;
        assert!(!outcome.accepted);
        assert!(!outcome.dataset_refreshed);
        assert_eq!(outcome.diagnostics.iter().filter(|d| d.is_error()).count(), 2);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/expenses")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let list: ExpenseListResponse = serde_json::from_slice(&body)?;
        assert_eq!(list.count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_validate_does_not_store() -> Result<(), Box<dyn std::error::Error>> {
        let app = test_router().await?;

        let request = json_post(
            "/api/expenses/validate",
            serde_json::json!({ "cost": 4.0, "location": "Bakery", "comment": "bread" }),
        )?;
        let response = app.clone().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let outcome: ValidationOutcome = serde_json::from_slice(&body)?;
        assert!(outcome.accepted);
        assert!(outcome.diagnostics.is_empty());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/expenses/table")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let table: ExpenseTableResponse = serde_json::from_slice(&body)?;
        assert!(table.rows.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let app = test_router().await?;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/expenses")
                    .method(Method::POST)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{ not json"))?,
            )
            .await?;

        assert!(response.status().is_client_error());

        Ok(())
    }
}
