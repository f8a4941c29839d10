//! API route definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;

use terralot_shared::AppError;

use crate::AppState;

pub mod activity_logs;
pub mod agents;
pub mod clients;
pub mod health;
pub mod payment_plans;
pub mod properties;
pub mod reports;
pub mod sales;
pub mod subdivision;
pub mod survey_jobs;
pub mod transfers;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(properties::routes())
        .merge(subdivision::routes())
        .merge(clients::routes())
        .merge(agents::routes())
        .merge(transfers::routes())
        .merge(sales::routes())
        .merge(survey_jobs::routes())
        .merge(payment_plans::routes())
        .merge(activity_logs::routes())
        .merge(reports::routes())
}

/// Maps a repository error onto the JSON error envelope.
pub(crate) fn error_response(err: impl Into<AppError>) -> Response {
    let err = err.into();
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}
