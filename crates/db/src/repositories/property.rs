//! Property repository for inventory database operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use terralot_core::inventory::{InventoryError, InventoryService};
use terralot_shared::types::PageRequest;
use terralot_shared::AppError;

use crate::entities::sea_orm_active_enums::{LotProposalStatus, PropertyKind, PropertyStatus};
use crate::entities::{properties, proposed_lots, sale_transactions};
use crate::repositories::activity_log;

/// Error types for property operations.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    /// Property not found.
    #[error("Property not found: {0}")]
    NotFound(Uuid),

    /// Another property already carries this title deed number.
    #[error("Title deed number already registered: {0}")]
    DuplicateTitleDeed(String),

    /// The property still has pending subdivision proposals.
    #[error("Property {0} has pending subdivision proposals")]
    HasPendingProposals(Uuid),

    /// The property appears in recorded sales.
    #[error("Property {0} appears in recorded sales")]
    HasSales(Uuid),

    /// Size or price fails validation.
    #[error("Invalid figure: {0}")]
    InvalidFigure(String),

    /// Illegal status transition.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PropertyError> for AppError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::NotFound(_) => Self::NotFound(err.to_string()),
            PropertyError::DuplicateTitleDeed(_) => Self::Conflict(err.to_string()),
            PropertyError::HasPendingProposals(_)
            | PropertyError::HasSales(_)
            | PropertyError::Inventory(_) => Self::BusinessRule(err.to_string()),
            PropertyError::InvalidFigure(_) => Self::Validation(err.to_string()),
            PropertyError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for registering a property.
#[derive(Debug, Clone)]
pub struct CreatePropertyInput {
    /// Block or lot.
    pub kind: PropertyKind,
    /// Unique title deed number.
    pub title_deed_number: String,
    /// Human-readable location.
    pub location: String,
    /// Size in acres.
    pub size: Decimal,
    /// Asking price.
    pub price: Decimal,
    /// Registered owner, if known.
    pub owner: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Owner contact phone.
    pub telephone_number: Option<String>,
    /// Owner contact email.
    pub email: Option<String>,
    /// Staff member registering the property.
    pub recorded_by: String,
}

/// Fields a property update may change.
///
/// Size and status are deliberately absent: size is governed by the
/// subdivision workflow and status by sales and bookings.
#[derive(Debug, Clone, Default)]
pub struct UpdatePropertyInput {
    /// New location.
    pub location: Option<String>,
    /// New asking price.
    pub price: Option<Decimal>,
    /// New owner.
    pub owner: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New contact phone.
    pub telephone_number: Option<String>,
    /// New contact email.
    pub email: Option<String>,
}

/// Filter options for listing properties.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    /// Filter by status.
    pub status: Option<PropertyStatus>,
    /// Filter by kind.
    pub kind: Option<PropertyKind>,
    /// Substring match against deed number or location.
    pub search: Option<String>,
}

/// Inventory counts per status, for dashboards.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct StatusCounts {
    /// Properties open for sale or booking.
    pub available: u64,
    /// Properties reserved by clients.
    pub booked: u64,
    /// Properties sold.
    pub sold: u64,
    /// Exhausted blocks.
    pub unavailable: u64,
}

/// Property repository for CRUD and status operations.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    db: DatabaseConnection,
}

impl PropertyRepository {
    /// Creates a new property repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new property.
    ///
    /// # Errors
    ///
    /// Returns an error if the deed number is taken, a figure is
    /// negative, or the database operation fails.
    pub async fn create(
        &self,
        input: CreatePropertyInput,
    ) -> Result<properties::Model, PropertyError> {
        if input.size.is_sign_negative() {
            return Err(PropertyError::InvalidFigure("size must not be negative".into()));
        }
        if input.price.is_sign_negative() {
            return Err(PropertyError::InvalidFigure("price must not be negative".into()));
        }

        let txn = self.db.begin().await?;

        let taken = properties::Entity::find()
            .filter(properties::Column::TitleDeedNumber.eq(&input.title_deed_number))
            .one(&txn)
            .await?;
        if taken.is_some() {
            return Err(PropertyError::DuplicateTitleDeed(input.title_deed_number));
        }

        let now = Utc::now().into();
        let model = properties::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(input.kind),
            title_deed_number: Set(input.title_deed_number.clone()),
            location: Set(input.location),
            size: Set(input.size),
            price: Set(input.price),
            status: Set(PropertyStatus::Available),
            owner: Set(input.owner),
            description: Set(input.description),
            telephone_number: Set(input.telephone_number),
            email: Set(input.email),
            recorded_by: Set(input.recorded_by.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model.insert(&txn).await?;

        activity_log::append(
            &txn,
            &input.recorded_by,
            "property.create",
            Some(format!("deed {}", input.title_deed_number)),
        )
        .await?;

        txn.commit().await?;
        debug!(property_id = %created.id, "Property registered");
        Ok(created)
    }

    /// Fetches a property by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such property exists.
    pub async fn get(&self, id: Uuid) -> Result<properties::Model, PropertyError> {
        properties::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PropertyError::NotFound(id))
    }

    /// Lists properties with filters and pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: PropertyFilter,
        page: PageRequest,
    ) -> Result<(Vec<properties::Model>, u64), PropertyError> {
        let mut query = properties::Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(properties::Column::Status.eq(status));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(properties::Column::Kind.eq(kind));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(properties::Column::TitleDeedNumber.contains(search))
                    .add(properties::Column::Location.contains(search)),
            );
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(properties::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Updates a property's descriptive fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such property exists.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdatePropertyInput,
        actor: &str,
    ) -> Result<properties::Model, PropertyError> {
        if let Some(price) = input.price {
            if price.is_sign_negative() {
                return Err(PropertyError::InvalidFigure("price must not be negative".into()));
            }
        }

        let txn = self.db.begin().await?;

        let existing = properties::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PropertyError::NotFound(id))?;

        let mut model: properties::ActiveModel = existing.into();
        if let Some(location) = input.location {
            model.location = Set(location);
        }
        if let Some(price) = input.price {
            model.price = Set(price);
        }
        if let Some(owner) = input.owner {
            model.owner = Set(Some(owner));
        }
        if let Some(description) = input.description {
            model.description = Set(Some(description));
        }
        if let Some(phone) = input.telephone_number {
            model.telephone_number = Set(Some(phone));
        }
        if let Some(email) = input.email {
            model.email = Set(Some(email));
        }
        model.updated_at = Set(Utc::now().into());
        let updated = model.update(&txn).await?;

        activity_log::append(&txn, actor, "property.update", Some(format!("id {id}"))).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a property.
    ///
    /// Refused while the property has pending subdivision proposals or
    /// appears in any recorded sale.
    ///
    /// # Errors
    ///
    /// Returns `HasPendingProposals` or `HasSales` when the property is
    /// still referenced.
    pub async fn delete(&self, id: Uuid, actor: &str) -> Result<(), PropertyError> {
        let txn = self.db.begin().await?;

        let existing = properties::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PropertyError::NotFound(id))?;

        let pending = proposed_lots::Entity::find()
            .filter(proposed_lots::Column::ParentBlockId.eq(id))
            .filter(proposed_lots::Column::Status.eq(LotProposalStatus::Proposed))
            .count(&txn)
            .await?;
        if pending > 0 {
            return Err(PropertyError::HasPendingProposals(id));
        }

        let sales = sale_transactions::Entity::find()
            .filter(sale_transactions::Column::PropertyId.eq(id))
            .count(&txn)
            .await?;
        if sales > 0 {
            return Err(PropertyError::HasSales(id));
        }

        properties::Entity::delete_by_id(id).exec(&txn).await?;

        activity_log::append(
            &txn,
            actor,
            "property.delete",
            Some(format!("deed {}", existing.title_deed_number)),
        )
        .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Reserves an available property for a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not `Available`.
    pub async fn book(&self, id: Uuid, actor: &str) -> Result<properties::Model, PropertyError> {
        self.transition(id, actor, "property.book", InventoryService::book)
            .await
    }

    /// Releases a booked property back to the open market.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not `Booked`.
    pub async fn release_booking(
        &self,
        id: Uuid,
        actor: &str,
    ) -> Result<properties::Model, PropertyError> {
        self.transition(id, actor, "property.release", InventoryService::release_booking)
            .await
    }

    async fn transition(
        &self,
        id: Uuid,
        actor: &str,
        action: &str,
        step: impl Fn(
            terralot_core::inventory::PropertyStatus,
        ) -> Result<terralot_core::inventory::PropertyStatus, InventoryError>,
    ) -> Result<properties::Model, PropertyError> {
        let txn = self.db.begin().await?;

        let existing = properties::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PropertyError::NotFound(id))?;

        let next = step(existing.status.clone().into())?;

        let mut model: properties::ActiveModel = existing.into();
        model.status = Set(next.into());
        model.updated_at = Set(Utc::now().into());
        let updated = model.update(&txn).await?;

        activity_log::append(&txn, actor, action, Some(format!("id {id}"))).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Counts properties per status, for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if a count query fails.
    pub async fn status_counts(&self) -> Result<StatusCounts, PropertyError> {
        let count_for = |status: PropertyStatus| {
            properties::Entity::find()
                .filter(properties::Column::Status.eq(status))
                .count(&self.db)
        };

        Ok(StatusCounts {
            available: count_for(PropertyStatus::Available).await?,
            booked: count_for(PropertyStatus::Booked).await?,
            sold: count_for(PropertyStatus::Sold).await?,
            unavailable: count_for(PropertyStatus::Unavailable).await?,
        })
    }
}
