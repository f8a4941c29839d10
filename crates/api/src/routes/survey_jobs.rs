//! Survey and title-search job routes.

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

use terralot_db::entities::sea_orm_active_enums::JobStatus;
use terralot_db::entities::{service_jobs, service_payments};
use terralot_db::repositories::survey::{
    CreateJobInput, DispatchJobInput, JobDetails, SurveyRepository,
};
use terralot_shared::types::{PageRequest, PageResponse};

use crate::routes::error_response;
use crate::AppState;

/// Creates the survey job routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/survey/jobs", post(create_job))
        .route("/survey/jobs", get(list_jobs))
        .route("/survey/jobs/counts", get(job_counts))
        .route("/survey/jobs/{id}", get(get_job))
        .route("/survey/jobs/{id}/payments", post(record_payment))
        .route("/survey/jobs/{id}/complete", post(complete_job))
        .route("/survey/jobs/{id}/cancel", post(cancel_job))
        .route("/survey/jobs/{id}/dispatch", post(dispatch_job))
        .route("/survey/jobs/{id}/history", get(payment_history))
}

fn parse_status(value: &str) -> Option<JobStatus> {
    match value {
        "ongoing" => Some(JobStatus::Ongoing),
        "completed" => Some(JobStatus::Completed),
        "dispatched" => Some(JobStatus::Dispatched),
        "cancelled" => Some(JobStatus::Cancelled),
        _ => None,
    }
}

fn job_json(model: &service_jobs::Model) -> Value {
    let status = match model.status {
        JobStatus::Ongoing => "ongoing",
        JobStatus::Completed => "completed",
        JobStatus::Dispatched => "dispatched",
        JobStatus::Cancelled => "cancelled",
    };
    json!({
        "id": model.id,
        "client_id": model.client_id,
        "description": model.description,
        "title_name": model.title_name,
        "title_number": model.title_number,
        "fee": model.fee,
        "status": status,
        "brought_by": model.brought_by,
        "recorded_by": model.recorded_by,
        "created_at": model.created_at,
    })
}

fn payment_json(model: &service_payments::Model) -> Value {
    use terralot_db::entities::sea_orm_active_enums::ServicePaymentStatus;
    let status = match model.status {
        ServicePaymentStatus::Unpaid => "unpaid",
        ServicePaymentStatus::PartiallyPaid => "partially_paid",
        ServicePaymentStatus::Paid => "paid",
    };
    json!({
        "fee": model.fee,
        "amount_paid": model.amount_paid,
        "balance": model.balance,
        "status": status,
        "updated_at": model.updated_at,
    })
}

fn details_json(details: &JobDetails) -> Value {
    let mut body = job_json(&details.job);
    body["payment"] = payment_json(&details.payment);
    if let Some(dispatch) = &details.dispatch {
        body["dispatch"] = json!({
            "reason": dispatch.reason,
            "collected_by": dispatch.collected_by,
            "collector_phone": dispatch.collector_phone,
            "dispatched_at": dispatch.dispatched_at,
        });
    }
    body
}

/// Request body for registering a job.
#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    /// Client commissioning the work.
    pub client_id: Uuid,
    /// What the job covers.
    pub description: String,
    /// Name on the title.
    pub title_name: Option<String>,
    /// Title number.
    pub title_number: Option<String>,
    /// Agreed fee.
    pub fee: Decimal,
    /// Who brought the job in.
    pub brought_by: Option<String>,
    /// Staff member registering.
    pub recorded_by: String,
}

/// Request body for a payment against a job.
#[derive(Debug, Deserialize)]
pub struct JobPaymentRequest {
    /// Amount received.
    pub amount: Decimal,
    /// How the money arrived, e.g. `cash` or `mobile`.
    pub payment_type: Option<String>,
    /// Staff member recording.
    pub recorded_by: String,
}

/// Request body for a lifecycle action on a job.
#[derive(Debug, Deserialize, Default)]
pub struct JobActionRequest {
    /// Staff member acting.
    pub actor: Option<String>,
}

/// Request body for dispatching a job's documents.
#[derive(Debug, Deserialize)]
pub struct DispatchRequest {
    /// Why or under what arrangement the documents left.
    pub reason: Option<String>,
    /// Person who collected them.
    pub collected_by: String,
    /// Collector's phone.
    pub collector_phone: Option<String>,
    /// Staff member acting.
    pub actor: Option<String>,
}

/// Query parameters for listing jobs.
#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    /// Filter by status.
    pub status: Option<String>,
    /// Substring match against description or title number.
    pub search: Option<String>,
    /// Pagination.
    #[serde(flatten)]
    pub page: PageRequest,
}

async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobRequest>,
) -> impl IntoResponse {
    let repo = SurveyRepository::new((*state.db).clone());
    let input = CreateJobInput {
        client_id: payload.client_id,
        description: payload.description,
        title_name: payload.title_name,
        title_number: payload.title_number,
        fee: payload.fee,
        brought_by: payload.brought_by,
        recorded_by: payload.recorded_by,
    };

    match repo.create_job(input).await {
        Ok(details) => {
            info!(job_id = %details.job.id, fee = %details.job.fee, "Survey job registered");
            (StatusCode::CREATED, Json(details_json(&details))).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListJobsQuery>,
) -> impl IntoResponse {
    let status = match query.status.as_deref().map(parse_status) {
        Some(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "VALIDATION_ERROR",
                    "message": "Invalid status. Must be one of: ongoing, completed, dispatched, cancelled"
                })),
            )
                .into_response();
        }
        Some(parsed) => parsed,
        None => None,
    };

    let repo = SurveyRepository::new((*state.db).clone());
    match repo.list_jobs(status, query.search, query.page).await {
        Ok((rows, total)) => {
            let data: Vec<Value> = rows.iter().map(job_json).collect();
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

async fn get_job(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = SurveyRepository::new((*state.db).clone());
    match repo.get_job(id).await {
        Ok(details) => Json(details_json(&details)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<JobPaymentRequest>,
) -> impl IntoResponse {
    let repo = SurveyRepository::new((*state.db).clone());
    let payment_type = payload.payment_type.as_deref().unwrap_or("cash");

    match repo
        .record_payment(id, payload.amount, payment_type, &payload.recorded_by)
        .await
    {
        Ok(payment) => {
            info!(job_id = %id, amount = %payload.amount, "Survey payment recorded");
            Json(payment_json(&payment)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn complete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Option<Json<JobActionRequest>>,
) -> impl IntoResponse {
    let repo = SurveyRepository::new((*state.db).clone());
    let actor = payload
        .as_ref()
        .and_then(|p| p.actor.as_deref())
        .unwrap_or("system");
    match repo.complete_job(id, actor).await {
        Ok(job) => {
            info!(job_id = %id, "Survey job completed");
            Json(job_json(&job)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn cancel_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Option<Json<JobActionRequest>>,
) -> impl IntoResponse {
    let repo = SurveyRepository::new((*state.db).clone());
    let actor = payload
        .as_ref()
        .and_then(|p| p.actor.as_deref())
        .unwrap_or("system");
    match repo.cancel_job(id, actor).await {
        Ok(job) => Json(job_json(&job)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn dispatch_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DispatchRequest>,
) -> impl IntoResponse {
    let repo = SurveyRepository::new((*state.db).clone());
    let actor = payload.actor.clone().unwrap_or_else(|| "system".to_owned());
    let input = DispatchJobInput {
        reason: payload.reason,
        collected_by: payload.collected_by,
        collector_phone: payload.collector_phone,
    };

    match repo.dispatch_job(id, input, &actor).await {
        Ok(details) => {
            info!(job_id = %id, "Survey job dispatched");
            Json(details_json(&details)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn payment_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SurveyRepository::new((*state.db).clone());
    match repo.payment_history(id).await {
        Ok(rows) => {
            let data: Vec<Value> = rows
                .iter()
                .map(|row| {
                    json!({
                        "id": row.id,
                        "amount": row.amount,
                        "payment_type": row.payment_type,
                        "recorded_at": row.recorded_at,
                    })
                })
                .collect();
            Json(json!({ "data": data })).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn job_counts(State(state): State<AppState>) -> impl IntoResponse {
    let repo = SurveyRepository::new((*state.db).clone());
    match repo.status_counts().await {
        Ok(counts) => Json(json!(counts)).into_response(),
        Err(err) => error_response(err),
    }
}
