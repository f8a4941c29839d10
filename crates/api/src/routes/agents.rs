//! Agent management routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use terralot_db::entities::agents;
use terralot_db::entities::sea_orm_active_enums::AgentStatus;
use terralot_db::repositories::agent::AgentRepository;

use crate::routes::error_response;
use crate::AppState;

/// Creates the agent routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/agents", post(add_agent))
        .route("/agents", get(list_agents))
        .route("/agents/{id}/status", post(set_agent_status))
}

fn agent_json(model: &agents::Model) -> Value {
    let status = match model.status {
        AgentStatus::Active => "active",
        AgentStatus::Inactive => "inactive",
    };
    json!({
        "id": model.id,
        "name": model.name,
        "status": status,
        "recorded_by": model.recorded_by,
        "created_at": model.created_at,
    })
}

/// Request body for adding an agent.
#[derive(Debug, Deserialize)]
pub struct AddAgentRequest {
    /// Agent's name, unique among agents.
    pub name: String,
    /// Staff member adding the agent.
    pub recorded_by: String,
}

/// Query parameters for listing agents.
#[derive(Debug, Deserialize)]
pub struct ListAgentsQuery {
    /// Filter by status: `active` or `inactive`.
    pub status: Option<String>,
}

/// Request body for setting an agent's status.
#[derive(Debug, Deserialize)]
pub struct SetAgentStatusRequest {
    /// `active` or `inactive`.
    pub status: String,
    /// Staff member making the change.
    pub actor: Option<String>,
}

fn parse_status(value: &str) -> Option<AgentStatus> {
    match value {
        "active" => Some(AgentStatus::Active),
        "inactive" => Some(AgentStatus::Inactive),
        _ => None,
    }
}

async fn add_agent(
    State(state): State<AppState>,
    Json(payload): Json<AddAgentRequest>,
) -> impl IntoResponse {
    let repo = AgentRepository::new((*state.db).clone());
    match repo.add(&payload.name, &payload.recorded_by).await {
        Ok(agent) => {
            info!(agent_id = %agent.id, name = %agent.name, "Agent added");
            (StatusCode::CREATED, Json(agent_json(&agent))).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn list_agents(
    State(state): State<AppState>,
    Query(query): Query<ListAgentsQuery>,
) -> impl IntoResponse {
    let status = match query.status.as_deref().map(parse_status) {
        Some(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "VALIDATION_ERROR",
                    "message": "Invalid status. Must be one of: active, inactive"
                })),
            )
                .into_response();
        }
        Some(parsed) => parsed,
        None => None,
    };

    let repo = AgentRepository::new((*state.db).clone());
    match repo.list(status).await {
        Ok(rows) => {
            let data: Vec<Value> = rows.iter().map(agent_json).collect();
            Json(json!({ "data": data })).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn set_agent_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetAgentStatusRequest>,
) -> impl IntoResponse {
    let Some(status) = parse_status(&payload.status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "VALIDATION_ERROR",
                "message": "Invalid status. Must be one of: active, inactive"
            })),
        )
            .into_response();
    };

    let repo = AgentRepository::new((*state.db).clone());
    let actor = payload.actor.as_deref().unwrap_or("system");
    match repo.set_status(id, status, actor).await {
        Ok(agent) => Json(agent_json(&agent)).into_response(),
        Err(err) => error_response(err),
    }
}
