//! Sales ledger routes.

use axum::{
    extract::{Path, Query, State},
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

use terralot_db::entities::sea_orm_active_enums::PaymentMode;
use terralot_db::entities::{installments, sale_transactions};
use terralot_db::repositories::sale::{
    RecordCashSaleInput, RecordInstallmentSaleInput, SaleDetails, SaleFilter, SaleRepository,
};
use terralot_shared::types::{PageRequest, PageResponse};

use crate::routes::error_response;
use crate::AppState;

/// Creates the sales routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales/cash", post(record_cash_sale))
        .route("/sales/installment", post(record_installment_sale))
        .route("/sales", get(list_sales))
        .route("/sales/{id}", get(get_sale))
        .route("/sales/{id}/payments", post(apply_payment))
        .route("/sales/{id}/history", get(payment_history))
}

fn sale_json(model: &sale_transactions::Model) -> Value {
    json!({
        "id": model.id,
        "property_id": model.property_id,
        "client_id": model.client_id,
        "agent_id": model.agent_id,
        "payment_mode": terralot_core::sales::PaymentMode::from(model.payment_mode.clone()).to_string(),
        "total_payable": model.total_payable,
        "total_amount_paid": model.total_amount_paid,
        "discount": model.discount,
        "balance": model.balance,
        "transaction_date": model.transaction_date,
        "recorded_by": model.recorded_by,
        "created_at": model.created_at,
        "updated_at": model.updated_at,
    })
}

fn installment_json(model: &installments::Model) -> Value {
    use terralot_db::entities::sea_orm_active_enums::InstallmentStatus;
    let status = match model.status {
        InstallmentStatus::Outstanding => "outstanding",
        InstallmentStatus::PartiallyPaid => "partially_paid",
        InstallmentStatus::Paid => "paid",
    };
    json!({
        "id": model.id,
        "sequence": model.sequence,
        "due_date": model.due_date,
        "amount_due": model.amount_due,
        "amount_paid": model.amount_paid,
        "status": status,
    })
}

fn details_json(details: &SaleDetails) -> Value {
    let mut body = sale_json(&details.transaction);
    if let Some(plan) = &details.installment_plan {
        body["installment_plan"] = json!({
            "id": plan.id,
            "payment_plan_id": plan.payment_plan_id,
            "financed_balance": plan.financed_balance,
            "monthly_amount": plan.monthly_amount,
            "start_date": plan.start_date,
        });
        body["installments"] = Value::Array(
            details.installments.iter().map(installment_json).collect(),
        );
    }
    body
}

/// Request body for recording a cash sale.
#[derive(Debug, Deserialize)]
pub struct CashSaleRequest {
    /// Property being sold.
    pub property_id: Uuid,
    /// Buying client.
    pub client_id: Uuid,
    /// Introducing agent.
    pub agent_id: Option<Uuid>,
    /// Discount off the asking price.
    #[serde(default)]
    pub discount: Decimal,
    /// Amount received now.
    pub amount_paid: Decimal,
    /// Business date of the sale.
    pub transaction_date: NaiveDate,
    /// Staff member recording.
    pub recorded_by: String,
}

/// Request body for recording an installment sale.
#[derive(Debug, Deserialize)]
pub struct InstallmentSaleRequest {
    /// Property being sold.
    pub property_id: Uuid,
    /// Buying client.
    pub client_id: Uuid,
    /// Introducing agent.
    pub agent_id: Option<Uuid>,
    /// Payment plan template.
    pub payment_plan_id: Uuid,
    /// Opening deposit received.
    pub amount_paid: Decimal,
    /// Date the schedule counts from.
    pub start_date: NaiveDate,
    /// Business date of the sale.
    pub transaction_date: NaiveDate,
    /// Staff member recording.
    pub recorded_by: String,
}

/// Request body for a payment against a sale.
#[derive(Debug, Deserialize)]
pub struct SalePaymentRequest {
    /// Amount received.
    pub amount: Decimal,
    /// Staff member recording.
    pub recorded_by: String,
}

/// Query parameters for listing sales.
#[derive(Debug, Deserialize)]
pub struct ListSalesQuery {
    /// Filter by payment mode: `cash` or `installments`.
    pub mode: Option<String>,
    /// Transaction date range start.
    pub date_from: Option<NaiveDate>,
    /// Transaction date range end.
    pub date_to: Option<NaiveDate>,
    /// Filter by buying client.
    pub client_id: Option<Uuid>,
    /// Pagination.
    #[serde(flatten)]
    pub page: PageRequest,
}

async fn record_cash_sale(
    State(state): State<AppState>,
    Json(payload): Json<CashSaleRequest>,
) -> impl IntoResponse {
    let repo = SaleRepository::new((*state.db).clone());
    let input = RecordCashSaleInput {
        property_id: payload.property_id,
        client_id: payload.client_id,
        agent_id: payload.agent_id,
        discount: payload.discount,
        amount_paid: payload.amount_paid,
        transaction_date: payload.transaction_date,
        recorded_by: payload.recorded_by,
    };

    match repo.record_cash_sale(input).await {
        Ok(sale) => {
            info!(
                sale_id = %sale.id,
                property_id = %sale.property_id,
                total = %sale.total_payable,
                "Cash sale recorded"
            );
            (StatusCode::CREATED, Json(sale_json(&sale))).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn record_installment_sale(
    State(state): State<AppState>,
    Json(payload): Json<InstallmentSaleRequest>,
) -> impl IntoResponse {
    let repo = SaleRepository::new((*state.db).clone());
    let input = RecordInstallmentSaleInput {
        property_id: payload.property_id,
        client_id: payload.client_id,
        agent_id: payload.agent_id,
        payment_plan_id: payload.payment_plan_id,
        amount_paid: payload.amount_paid,
        start_date: payload.start_date,
        transaction_date: payload.transaction_date,
        recorded_by: payload.recorded_by,
    };

    match repo.record_installment_sale(input).await {
        Ok(details) => {
            info!(
                sale_id = %details.transaction.id,
                property_id = %details.transaction.property_id,
                installments = details.installments.len(),
                "Installment sale recorded"
            );
            (StatusCode::CREATED, Json(details_json(&details))).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<ListSalesQuery>,
) -> impl IntoResponse {
    let mode = match query.mode.as_deref() {
        None => None,
        Some("cash") => Some(PaymentMode::Cash),
        Some("installments") => Some(PaymentMode::Installments),
        Some(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "VALIDATION_ERROR",
                    "message": "Invalid mode. Must be one of: cash, installments"
                })),
            )
                .into_response();
        }
    };

    let repo = SaleRepository::new((*state.db).clone());
    let filter = SaleFilter {
        mode,
        date_from: query.date_from,
        date_to: query.date_to,
        client_id: query.client_id,
    };

    match repo.list_sales(filter, query.page).await {
        Ok((rows, total)) => {
            let data: Vec<Value> = rows.iter().map(sale_json).collect();
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

async fn get_sale(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = SaleRepository::new((*state.db).clone());
    match repo.get_sale(id).await {
        Ok(details) => Json(details_json(&details)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn apply_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SalePaymentRequest>,
) -> impl IntoResponse {
    let repo = SaleRepository::new((*state.db).clone());
    match repo.apply_payment(id, payload.amount, &payload.recorded_by).await {
        Ok(sale) => {
            info!(sale_id = %id, amount = %payload.amount, "Sale payment applied");
            Json(sale_json(&sale)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn payment_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SaleRepository::new((*state.db).clone());
    match repo.payment_history(id).await {
        Ok(rows) => {
            let data: Vec<Value> = rows
                .iter()
                .map(|row| {
                    json!({
                        "id": row.id,
                        "installment_id": row.installment_id,
                        "amount": row.amount,
                        "reason": row.reason,
                        "recorded_at": row.recorded_at,
                    })
                })
                .collect();
            Json(json!({ "data": data })).into_response()
        }
        Err(err) => error_response(err),
    }
}
