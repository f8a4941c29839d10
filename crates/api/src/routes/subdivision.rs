//! Subdivision workflow routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use terralot_db::entities::proposed_lots;
use terralot_db::entities::sea_orm_active_enums::LotProposalStatus;
use terralot_db::repositories::subdivision::{ProposeLotInput, SubdivisionRepository};
use terralot_shared::types::{PageRequest, PageResponse};

use crate::routes::error_response;
use crate::routes::properties::property_json;
use crate::AppState;

/// Creates the subdivision routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subdivision/proposals", post(propose_lot))
        .route("/subdivision/proposals", get(list_proposals))
        .route("/subdivision/proposals/{id}/finalize", post(finalize_lot))
        .route("/subdivision/proposals/{id}/reject", post(reject_lot))
}

fn parse_status(value: &str) -> Option<LotProposalStatus> {
    match value {
        "proposed" => Some(LotProposalStatus::Proposed),
        "confirmed" => Some(LotProposalStatus::Confirmed),
        "rejected" => Some(LotProposalStatus::Rejected),
        _ => None,
    }
}

fn proposal_json(model: &proposed_lots::Model, parent_deed: Option<&str>) -> Value {
    json!({
        "id": model.id,
        "parent_block_id": model.parent_block_id,
        "parent_deed": parent_deed,
        "size": model.size,
        "location": model.location,
        "surveyor_name": model.surveyor_name,
        "title_deed_number": model.title_deed_number,
        "price": model.price,
        "status": terralot_core::subdivision::LotProposalStatus::from(model.status.clone()).to_string(),
        "created_by": model.created_by,
        "created_at": model.created_at,
        "decided_at": model.decided_at,
    })
}

/// Request body for proposing a lot.
#[derive(Debug, Deserialize)]
pub struct ProposeLotRequest {
    /// Block to carve from.
    pub parent_block_id: Uuid,
    /// Size of the lot in acres.
    pub size: Decimal,
    /// Location of the lot.
    pub location: String,
    /// Surveyor who marked it.
    pub surveyor_name: Option<String>,
    /// Deed number the lot will carry.
    pub title_deed_number: String,
    /// Asking price.
    pub price: Decimal,
    /// Staff member proposing.
    pub created_by: String,
}

/// Query parameters for listing proposals.
#[derive(Debug, Deserialize)]
pub struct ListProposalsQuery {
    /// Filter by proposal status.
    pub status: Option<String>,
    /// Pagination.
    #[serde(flatten)]
    pub page: PageRequest,
}

/// Request body naming the deciding staff member.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    /// Staff member deciding.
    pub actor: Option<String>,
}

async fn propose_lot(
    State(state): State<AppState>,
    Json(payload): Json<ProposeLotRequest>,
) -> impl IntoResponse {
    let repo = SubdivisionRepository::new((*state.db).clone());
    let input = ProposeLotInput {
        parent_block_id: payload.parent_block_id,
        size: payload.size,
        location: payload.location,
        surveyor_name: payload.surveyor_name,
        title_deed_number: payload.title_deed_number,
        price: payload.price,
        created_by: payload.created_by,
    };

    match repo.propose_lot(input).await {
        Ok(proposal) => {
            info!(
                proposal_id = %proposal.id,
                block_id = %proposal.parent_block_id,
                size = %proposal.size,
                "Lot proposed"
            );
            (StatusCode::CREATED, Json(proposal_json(&proposal, None))).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn list_proposals(
    State(state): State<AppState>,
    Query(query): Query<ListProposalsQuery>,
) -> impl IntoResponse {
    let status = match query.status.as_deref().map(parse_status) {
        Some(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "VALIDATION_ERROR",
                    "message": "Invalid status. Must be one of: proposed, confirmed, rejected"
                })),
            )
                .into_response();
        }
        Some(parsed) => parsed,
        None => None,
    };

    let repo = SubdivisionRepository::new((*state.db).clone());
    match repo.list_proposals(status, query.page).await {
        Ok((rows, total)) => {
            let data: Vec<Value> = rows
                .iter()
                .map(|row| proposal_json(&row.proposal, row.parent_deed.as_deref()))
                .collect();
            Json(PageResponse::new(
                data,
                query.page.page,
                query.page.per_page,
                total,
            ))
            .into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn finalize_lot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Option<Json<DecisionRequest>>,
) -> impl IntoResponse {
    let repo = SubdivisionRepository::new((*state.db).clone());
    let actor = payload
        .as_ref()
        .and_then(|p| p.actor.as_deref())
        .unwrap_or("system");

    match repo.finalize_lot(id, actor).await {
        Ok(property) => {
            info!(proposal_id = %id, property_id = %property.id, "Lot finalized");
            (StatusCode::CREATED, Json(property_json(&property))).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn reject_lot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Option<Json<DecisionRequest>>,
) -> impl IntoResponse {
    let repo = SubdivisionRepository::new((*state.db).clone());
    let actor = payload
        .as_ref()
        .and_then(|p| p.actor.as_deref())
        .unwrap_or("system");

    match repo.reject_lot(id, actor).await {
        Ok(proposal) => {
            info!(proposal_id = %id, "Lot proposal rejected");
            Json(proposal_json(&proposal, None)).into_response()
        }
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let state = AppState {
            db: Arc::new(DatabaseConnection::default()),
        };
        Router::new().merge(routes()).with_state(state)
    }

    /// Decision endpoints default the actor, so a bare POST with no body
    /// must reach the handler instead of dying in JSON extraction.
    #[tokio::test]
    async fn test_finalize_accepts_empty_body() {
        let app = test_app();
        let id = Uuid::new_v4();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/subdivision/proposals/{id}/finalize"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_ne!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_ne!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reject_accepts_empty_body() {
        let app = test_app();
        let id = Uuid::new_v4();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/subdivision/proposals/{id}/reject"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_ne!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_ne!(response.status(), StatusCode::BAD_REQUEST);
    }
}
