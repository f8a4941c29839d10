//! Property transfer routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use terralot_db::entities::property_transfers;
use terralot_db::repositories::transfer::{ExecuteTransferInput, TransferRepository};
use terralot_shared::types::{PageRequest, PageResponse};

use crate::routes::error_response;
use crate::AppState;

/// Creates the transfer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transfers", post(execute_transfer))
        .route("/transfers", get(list_transfers))
}

fn transfer_json(model: &property_transfers::Model) -> Value {
    json!({
        "id": model.id,
        "property_id": model.property_id,
        "from_client_id": model.from_client_id,
        "to_client_id": model.to_client_id,
        "transfer_price": model.transfer_price,
        "transfer_date": model.transfer_date,
        "supervising_agent_id": model.supervising_agent_id,
        "recorded_by": model.recorded_by,
        "created_at": model.created_at,
    })
}

/// Request body for executing a transfer.
#[derive(Debug, Deserialize)]
pub struct ExecuteTransferRequest {
    /// Parcel changing hands.
    pub property_id: Uuid,
    /// Previous owner, when known.
    pub from_client_id: Option<Uuid>,
    /// New owner.
    pub to_client_id: Uuid,
    /// Consideration paid.
    pub transfer_price: Decimal,
    /// Business date of the transfer.
    pub transfer_date: NaiveDate,
    /// Agent who supervised the conveyance, if any.
    pub supervising_agent_id: Option<Uuid>,
    /// Staff member executing the transfer.
    pub recorded_by: String,
}

/// Query parameters for listing transfers.
#[derive(Debug, Deserialize)]
pub struct ListTransfersQuery {
    /// Filter by property.
    pub property_id: Option<Uuid>,
    /// Pagination.
    #[serde(flatten)]
    pub page: PageRequest,
}

async fn execute_transfer(
    State(state): State<AppState>,
    Json(payload): Json<ExecuteTransferRequest>,
) -> impl IntoResponse {
    let repo = TransferRepository::new((*state.db).clone());
    let input = ExecuteTransferInput {
        property_id: payload.property_id,
        from_client_id: payload.from_client_id,
        to_client_id: payload.to_client_id,
        transfer_price: payload.transfer_price,
        transfer_date: payload.transfer_date,
        supervising_agent_id: payload.supervising_agent_id,
        recorded_by: payload.recorded_by,
    };

    match repo.execute_transfer(input).await {
        Ok(transfer) => {
            info!(
                transfer_id = %transfer.id,
                property_id = %transfer.property_id,
                "Property transferred"
            );
            (StatusCode::CREATED, Json(transfer_json(&transfer))).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn list_transfers(
    State(state): State<AppState>,
    Query(query): Query<ListTransfersQuery>,
) -> impl IntoResponse {
    let repo = TransferRepository::new((*state.db).clone());
    match repo.list_transfers(query.property_id, query.page).await {
        Ok((rows, total)) => {
            let data: Vec<Value> = rows.iter().map(transfer_json).collect();
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
