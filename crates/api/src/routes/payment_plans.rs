//! Payment plan template routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use terralot_db::entities::payment_plans;
use terralot_db::repositories::payment_plan::{
    CreatePaymentPlanInput, PaymentPlanRepository, UpdatePaymentPlanInput,
};

use crate::routes::error_response;
use crate::routes::properties::ActorQuery;
use crate::AppState;

/// Creates the payment plan routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payment-plans", post(create_plan))
        .route("/payment-plans", get(list_plans))
        .route("/payment-plans/{id}", get(get_plan))
        .route("/payment-plans/{id}", put(update_plan))
        .route("/payment-plans/{id}", delete(delete_plan))
}

fn plan_json(model: &payment_plans::Model) -> Value {
    json!({
        "id": model.id,
        "name": model.name,
        "deposit_percentage": model.deposit_percentage,
        "duration_months": model.duration_months,
        "interest_rate": model.interest_rate,
        "created_by": model.created_by,
        "created_at": model.created_at,
    })
}

/// Request body for creating a payment plan.
#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    /// Unique template name.
    pub name: String,
    /// Deposit required, percent of the raw price.
    pub deposit_percentage: Decimal,
    /// Number of monthly installments.
    pub duration_months: i32,
    /// Simple annual interest rate, percent.
    pub interest_rate: Decimal,
    /// Staff member creating.
    pub created_by: String,
}

/// Request body for updating a payment plan.
#[derive(Debug, Deserialize)]
pub struct UpdatePlanRequest {
    /// New name.
    pub name: Option<String>,
    /// New deposit percentage.
    pub deposit_percentage: Option<Decimal>,
    /// New duration.
    pub duration_months: Option<i32>,
    /// New interest rate.
    pub interest_rate: Option<Decimal>,
    /// Staff member making the change.
    pub actor: Option<String>,
}

async fn create_plan(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlanRequest>,
) -> impl IntoResponse {
    let repo = PaymentPlanRepository::new((*state.db).clone());
    let input = CreatePaymentPlanInput {
        name: payload.name,
        deposit_percentage: payload.deposit_percentage,
        duration_months: payload.duration_months,
        interest_rate: payload.interest_rate,
        created_by: payload.created_by,
    };

    match repo.create(input).await {
        Ok(plan) => {
            info!(plan_id = %plan.id, name = %plan.name, "Payment plan created");
            (StatusCode::CREATED, Json(plan_json(&plan))).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn list_plans(State(state): State<AppState>) -> impl IntoResponse {
    let repo = PaymentPlanRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(rows) => {
            let data: Vec<Value> = rows.iter().map(plan_json).collect();
            Json(json!({ "data": data })).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn get_plan(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = PaymentPlanRepository::new((*state.db).clone());
    match repo.get(id).await {
        Ok(plan) => Json(plan_json(&plan)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn update_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePlanRequest>,
) -> impl IntoResponse {
    let repo = PaymentPlanRepository::new((*state.db).clone());
    let actor = payload.actor.clone().unwrap_or_else(|| "system".to_owned());
    let input = UpdatePaymentPlanInput {
        name: payload.name,
        deposit_percentage: payload.deposit_percentage,
        duration_months: payload.duration_months,
        interest_rate: payload.interest_rate,
    };

    match repo.update(id, input, &actor).await {
        Ok(plan) => Json(plan_json(&plan)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn delete_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> impl IntoResponse {
    let repo = PaymentPlanRepository::new((*state.db).clone());
    match repo.delete(id, actor.name()).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}
