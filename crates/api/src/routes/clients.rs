//! Client admission and management routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use terralot_db::entities::clients;
use terralot_db::entities::sea_orm_active_enums::ClientStatus;
use terralot_db::repositories::client::{
    AdmissionOutcome, AdmitClientInput, ClientRepository, UpdateClientInput,
};
use terralot_shared::types::{PageRequest, PageResponse};

use crate::routes::error_response;
use crate::routes::properties::ActorQuery;
use crate::AppState;

/// Creates the client routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients", post(admit_client))
        .route("/clients", get(list_clients))
        .route("/clients/{id}", get(get_client))
        .route("/clients/{id}", patch(update_client))
        .route("/clients/{id}", delete(deactivate_client))
}

fn client_json(model: &clients::Model) -> Value {
    json!({
        "id": model.id,
        "name": model.name,
        "telephone_number": model.telephone_number,
        "email": model.email,
        "status": terralot_core::clients::ClientStatus::from(model.status.clone()).to_string(),
        "recorded_by": model.recorded_by,
        "created_at": model.created_at,
        "updated_at": model.updated_at,
    })
}

/// Request body for admitting a client.
#[derive(Debug, Deserialize)]
pub struct AdmitClientRequest {
    /// Client's name.
    pub name: String,
    /// Telephone number, the admission key.
    pub telephone_number: String,
    /// Contact email.
    pub email: Option<String>,
    /// Staff member admitting.
    pub recorded_by: String,
}

/// Request body for updating a client.
#[derive(Debug, Deserialize)]
pub struct UpdateClientRequest {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// Staff member making the change.
    pub actor: Option<String>,
}

/// Query parameters for listing clients.
#[derive(Debug, Deserialize)]
pub struct ListClientsQuery {
    /// Filter by status: `active` or `inactive`.
    pub status: Option<String>,
    /// Substring match against name or phone.
    pub search: Option<String>,
    /// Pagination.
    #[serde(flatten)]
    pub page: PageRequest,
}

async fn admit_client(
    State(state): State<AppState>,
    Json(payload): Json<AdmitClientRequest>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());
    let input = AdmitClientInput {
        name: payload.name,
        telephone_number: payload.telephone_number,
        email: payload.email,
        recorded_by: payload.recorded_by,
    };

    match repo.admit_client(input).await {
        Ok((client, outcome)) => {
            info!(client_id = %client.id, ?outcome, "Client admitted");
            let status = if outcome == AdmissionOutcome::Created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            let mut body = client_json(&client);
            body["admission"] = json!(outcome);
            (status, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ListClientsQuery>,
) -> impl IntoResponse {
    let status = match query.status.as_deref() {
        None => None,
        Some("active") => Some(ClientStatus::Active),
        Some("inactive") => Some(ClientStatus::Inactive),
        Some(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "VALIDATION_ERROR",
                    "message": "Invalid status. Must be one of: active, inactive"
                })),
            )
                .into_response();
        }
    };

    let repo = ClientRepository::new((*state.db).clone());
    match repo.list(status, query.search, query.page).await {
        Ok((rows, total)) => {
            let data: Vec<Value> = rows.iter().map(client_json).collect();
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

async fn get_client(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());
    match repo.get(id).await {
        Ok(client) => Json(client_json(&client)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientRequest>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());
    let actor = payload.actor.clone().unwrap_or_else(|| "system".to_owned());
    let input = UpdateClientInput {
        name: payload.name,
        email: payload.email,
    };

    match repo.update(id, input, &actor).await {
        Ok(client) => Json(client_json(&client)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn deactivate_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());
    match repo.deactivate(id, actor.name()).await {
        Ok(client) => {
            info!(client_id = %id, "Client deactivated");
            Json(client_json(&client)).into_response()
        }
        Err(err) => error_response(err),
    }
}
