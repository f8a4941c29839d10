//! Property inventory routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use terralot_db::entities::properties;
use terralot_db::entities::sea_orm_active_enums::{PropertyKind, PropertyStatus};
use terralot_db::repositories::property::{
    CreatePropertyInput, PropertyFilter, PropertyRepository, UpdatePropertyInput,
};
use terralot_shared::types::{PageRequest, PageResponse};

use crate::routes::error_response;
use crate::AppState;

/// Creates the property routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/properties", get(list_properties))
        .route("/properties", post(create_property))
        .route("/properties/{id}", get(get_property))
        .route("/properties/{id}", patch(update_property))
        .route("/properties/{id}", delete(delete_property))
        .route("/properties/{id}/book", post(book_property))
        .route("/properties/{id}/release", post(release_property))
        .route("/properties/counts", get(property_counts))
}

fn parse_kind(value: &str) -> Option<PropertyKind> {
    match value {
        "block" => Some(PropertyKind::Block),
        "lot" => Some(PropertyKind::Lot),
        _ => None,
    }
}

fn parse_status(value: &str) -> Option<PropertyStatus> {
    match value {
        "available" => Some(PropertyStatus::Available),
        "booked" => Some(PropertyStatus::Booked),
        "sold" => Some(PropertyStatus::Sold),
        "unavailable" => Some(PropertyStatus::Unavailable),
        _ => None,
    }
}

pub(crate) fn property_json(model: &properties::Model) -> Value {
    json!({
        "id": model.id,
        "kind": terralot_core::inventory::PropertyKind::from(model.kind.clone()).to_string(),
        "title_deed_number": model.title_deed_number,
        "location": model.location,
        "size": model.size,
        "price": model.price,
        "status": terralot_core::inventory::PropertyStatus::from(model.status.clone()).to_string(),
        "owner": model.owner,
        "description": model.description,
        "telephone_number": model.telephone_number,
        "email": model.email,
        "recorded_by": model.recorded_by,
        "created_at": model.created_at,
        "updated_at": model.updated_at,
    })
}

/// Query parameters for listing properties.
#[derive(Debug, Deserialize)]
pub struct ListPropertiesQuery {
    /// Filter by status.
    pub status: Option<String>,
    /// Filter by kind.
    pub kind: Option<String>,
    /// Substring match against deed number or location.
    pub search: Option<String>,
    /// Pagination.
    #[serde(flatten)]
    pub page: PageRequest,
}

/// Request body for registering a property.
#[derive(Debug, Deserialize)]
pub struct CreatePropertyRequest {
    /// `block` or `lot`.
    pub kind: String,
    /// Unique title deed number.
    pub title_deed_number: String,
    /// Location.
    pub location: String,
    /// Size in acres.
    pub size: Decimal,
    /// Asking price.
    pub price: Decimal,
    /// Registered owner.
    pub owner: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Owner contact phone.
    pub telephone_number: Option<String>,
    /// Owner contact email.
    pub email: Option<String>,
    /// Staff member registering the property.
    pub recorded_by: String,
}

/// Request body for updating a property.
#[derive(Debug, Deserialize)]
pub struct UpdatePropertyRequest {
    /// New location.
    pub location: Option<String>,
    /// New price.
    pub price: Option<Decimal>,
    /// New owner.
    pub owner: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New contact phone.
    pub telephone_number: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// Staff member making the change.
    pub actor: Option<String>,
}

/// Query parameter naming the acting staff member.
#[derive(Debug, Deserialize)]
pub struct ActorQuery {
    /// Staff member performing the action.
    pub actor: Option<String>,
}

impl ActorQuery {
    pub(crate) fn name(&self) -> &str {
        self.actor.as_deref().unwrap_or("system")
    }
}

async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<ListPropertiesQuery>,
) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());

    let status = match query.status.as_deref().map(parse_status) {
        Some(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "VALIDATION_ERROR",
                    "message": "Invalid status. Must be one of: available, booked, sold, unavailable"
                })),
            )
                .into_response();
        }
        Some(parsed) => parsed,
        None => None,
    };
    let kind = match query.kind.as_deref().map(parse_kind) {
        Some(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "VALIDATION_ERROR",
                    "message": "Invalid kind. Must be one of: block, lot"
                })),
            )
                .into_response();
        }
        Some(parsed) => parsed,
        None => None,
    };

    let filter = PropertyFilter {
        status,
        kind,
        search: query.search,
    };

    match repo.list(filter, query.page).await {
        Ok((rows, total)) => {
            let data: Vec<Value> = rows.iter().map(property_json).collect();
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

async fn create_property(
    State(state): State<AppState>,
    Json(payload): Json<CreatePropertyRequest>,
) -> impl IntoResponse {
    let Some(kind) = parse_kind(&payload.kind) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "VALIDATION_ERROR",
                "message": "Invalid kind. Must be one of: block, lot"
            })),
        )
            .into_response();
    };

    let repo = PropertyRepository::new((*state.db).clone());
    let input = CreatePropertyInput {
        kind,
        title_deed_number: payload.title_deed_number,
        location: payload.location,
        size: payload.size,
        price: payload.price,
        owner: payload.owner,
        description: payload.description,
        telephone_number: payload.telephone_number,
        email: payload.email,
        recorded_by: payload.recorded_by,
    };

    match repo.create(input).await {
        Ok(property) => {
            info!(property_id = %property.id, deed = %property.title_deed_number, "Property registered");
            (StatusCode::CREATED, Json(property_json(&property))).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn get_property(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());
    match repo.get(id).await {
        Ok(property) => Json(property_json(&property)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePropertyRequest>,
) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());
    let actor = payload.actor.clone().unwrap_or_else(|| "system".to_owned());
    let input = UpdatePropertyInput {
        location: payload.location,
        price: payload.price,
        owner: payload.owner,
        description: payload.description,
        telephone_number: payload.telephone_number,
        email: payload.email,
    };

    match repo.update(id, input, &actor).await {
        Ok(property) => Json(property_json(&property)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());
    match repo.delete(id, actor.name()).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

async fn book_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());
    match repo.book(id, actor.name()).await {
        Ok(property) => {
            info!(property_id = %id, "Property booked");
            Json(property_json(&property)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn release_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());
    match repo.release_booking(id, actor.name()).await {
        Ok(property) => Json(property_json(&property)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn property_counts(State(state): State<AppState>) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());
    match repo.status_counts().await {
        Ok(counts) => Json(json!(counts)).into_response(),
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    #[rstest]
    #[case("block", Some(PropertyKind::Block))]
    #[case("lot", Some(PropertyKind::Lot))]
    #[case("Block", None)]
    #[case("parcel", None)]
    fn test_parse_kind(#[case] input: &str, #[case] expected: Option<PropertyKind>) {
        assert_eq!(parse_kind(input), expected);
    }

    #[rstest]
    #[case("available", Some(PropertyStatus::Available))]
    #[case("booked", Some(PropertyStatus::Booked))]
    #[case("sold", Some(PropertyStatus::Sold))]
    #[case("unavailable", Some(PropertyStatus::Unavailable))]
    #[case("pending", None)]
    fn test_parse_status(#[case] input: &str, #[case] expected: Option<PropertyStatus>) {
        assert_eq!(parse_status(input), expected);
    }

    #[test]
    fn test_actor_query_defaults_to_system() {
        let query = ActorQuery { actor: None };
        assert_eq!(query.name(), "system");

        let query = ActorQuery {
            actor: Some("alice".to_string()),
        };
        assert_eq!(query.name(), "alice");
    }

    #[test]
    fn test_property_json_renders_enum_labels() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap().into();
        let model = properties::Model {
            id: Uuid::new_v4(),
            kind: PropertyKind::Block,
            title_deed_number: "BLOCK/001".to_string(),
            location: "Riverside".to_string(),
            size: Decimal::new(105, 1),
            price: Decimal::new(2_500_000, 0),
            status: PropertyStatus::Available,
            owner: None,
            description: None,
            telephone_number: None,
            email: None,
            recorded_by: "alice".to_string(),
            created_at: ts,
            updated_at: ts,
        };

        let body = property_json(&model);
        assert_eq!(body["kind"], "block");
        assert_eq!(body["status"], "available");
        assert_eq!(body["title_deed_number"], "BLOCK/001");
        assert_eq!(body["size"], serde_json::json!("10.5"));
    }
}
