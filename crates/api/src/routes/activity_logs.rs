//! Audit trail routes.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use terralot_db::repositories::activity_log::{ActivityLogFilter, ActivityLogRepository};
use terralot_shared::types::{PageRequest, PageResponse};
use terralot_shared::AppError;

use crate::routes::error_response;
use crate::AppState;

/// Creates the activity log routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/activity-logs", get(list_logs))
}

/// Query parameters for the audit trail.
#[derive(Debug, Deserialize)]
pub struct ListLogsQuery {
    /// Filter by acting staff member.
    pub actor: Option<String>,
    /// Filter by action name, e.g. `sale.payment`.
    pub action: Option<String>,
    /// Pagination.
    #[serde(flatten)]
    pub page: PageRequest,
}

async fn list_logs(
    State(state): State<AppState>,
    Query(query): Query<ListLogsQuery>,
) -> impl IntoResponse {
    let repo = ActivityLogRepository::new((*state.db).clone());
    let filter = ActivityLogFilter {
        actor: query.actor,
        action: query.action,
    };

    match repo.list(filter, query.page).await {
        Ok((rows, total)) => {
            let data: Vec<Value> = rows
                .iter()
                .map(|row| {
                    json!({
                        "id": row.id,
                        "actor": row.actor,
                        "action": row.action,
                        "details": row.details,
                        "created_at": row.created_at,
                    })
                })
                .collect();
            Json(PageResponse::new(
                data,
                query.page.page,
                query.page.per_page,
                total,
            ))
            .into_response()
        }
        Err(err) => error_response(AppError::Database(err.to_string())),
    }
}
