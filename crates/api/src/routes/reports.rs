//! Summary report route.
//!
//! The figures the original back office printed into reports, exposed
//! as plain JSON for whatever renders them.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use terralot_db::repositories::client::ClientRepository;
use terralot_db::repositories::property::PropertyRepository;
use terralot_db::repositories::sale::SaleRepository;
use terralot_db::repositories::survey::SurveyRepository;

use crate::routes::error_response;
use crate::AppState;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/summary", get(summary))
}

async fn summary(State(state): State<AppState>) -> impl IntoResponse {
    let properties = PropertyRepository::new((*state.db).clone());
    let clients = ClientRepository::new((*state.db).clone());
    let sales = SaleRepository::new((*state.db).clone());
    let survey = SurveyRepository::new((*state.db).clone());

    let property_counts = match properties.status_counts().await {
        Ok(counts) => counts,
        Err(err) => return error_response(err),
    };
    let active_clients = match clients.count_active().await {
        Ok(count) => count,
        Err(err) => return error_response(err),
    };
    let outstanding_balance = match sales.total_outstanding_balance().await {
        Ok(total) => total,
        Err(err) => return error_response(err),
    };
    let job_counts = match survey.status_counts().await {
        Ok(counts) => counts,
        Err(err) => return error_response(err),
    };

    Json(json!({
        "properties": property_counts,
        "active_clients": active_clients,
        "sales": {
            "total_outstanding_balance": outstanding_balance,
        },
        "survey_jobs": job_counts,
    }))
    .into_response()
}
