//! Property transfer repository.
//!
//! A transfer re-titles a parcel to a new client: the property's owner
//! field and the transfer record move together in one transaction, so
//! the register never shows an owner change without the deed trail
//! explaining it.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use terralot_shared::types::PageRequest;
use terralot_shared::AppError;

use crate::entities::{agents, clients, properties, property_transfers};
use crate::repositories::activity_log;

/// Error types for transfer operations.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Property not found.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// Client not found.
    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    /// Supervising agent not found.
    #[error("Agent not found: {0}")]
    AgentNotFound(Uuid),

    /// Price fails validation.
    #[error("Invalid figure: {0}")]
    InvalidFigure(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TransferError> for AppError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::PropertyNotFound(_)
            | TransferError::ClientNotFound(_)
            | TransferError::AgentNotFound(_) => Self::NotFound(err.to_string()),
            TransferError::InvalidFigure(_) => Self::Validation(err.to_string()),
            TransferError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for executing a property transfer.
#[derive(Debug, Clone)]
pub struct ExecuteTransferInput {
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

fn validate(transfer_price: Decimal) -> Result<(), TransferError> {
    if transfer_price.is_sign_negative() {
        return Err(TransferError::InvalidFigure(
            "transfer price must not be negative".into(),
        ));
    }
    Ok(())
}

/// Property transfer repository.
#[derive(Debug, Clone)]
pub struct TransferRepository {
    db: DatabaseConnection,
}

impl TransferRepository {
    /// Creates a new transfer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Re-titles a property to a new client and records the transfer,
    /// in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the property, a named client, or the
    /// supervising agent is missing, or the price is negative.
    pub async fn execute_transfer(
        &self,
        input: ExecuteTransferInput,
    ) -> Result<property_transfers::Model, TransferError> {
        validate(input.transfer_price)?;

        let txn = self.db.begin().await?;

        let property = properties::Entity::find_by_id(input.property_id)
            .one(&txn)
            .await?
            .ok_or(TransferError::PropertyNotFound(input.property_id))?;

        let new_owner = Self::load_client(&txn, input.to_client_id).await?;
        if let Some(from_id) = input.from_client_id {
            Self::load_client(&txn, from_id).await?;
        }
        if let Some(agent_id) = input.supervising_agent_id {
            agents::Entity::find_by_id(agent_id)
                .one(&txn)
                .await?
                .ok_or(TransferError::AgentNotFound(agent_id))?;
        }

        let mut property_model: properties::ActiveModel = property.into();
        property_model.owner = Set(Some(new_owner.name.clone()));
        property_model.updated_at = Set(Utc::now().into());
        property_model.update(&txn).await?;

        let transfer = property_transfers::ActiveModel {
            id: Set(Uuid::new_v4()),
            property_id: Set(input.property_id),
            from_client_id: Set(input.from_client_id),
            to_client_id: Set(input.to_client_id),
            transfer_price: Set(input.transfer_price),
            transfer_date: Set(input.transfer_date),
            supervising_agent_id: Set(input.supervising_agent_id),
            recorded_by: Set(input.recorded_by.clone()),
            created_at: Set(Utc::now().into()),
        };
        let transfer = transfer.insert(&txn).await?;

        activity_log::append(
            &txn,
            &input.recorded_by,
            "property.transfer",
            Some(format!(
                "property {} to client {} for {}",
                input.property_id, input.to_client_id, input.transfer_price
            )),
        )
        .await?;

        txn.commit().await?;
        debug!(
            transfer_id = %transfer.id,
            property_id = %input.property_id,
            "Property transfer executed"
        );
        Ok(transfer)
    }

    /// Lists transfers, newest first, optionally for one property.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_transfers(
        &self,
        property_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<(Vec<property_transfers::Model>, u64), TransferError> {
        let mut query = property_transfers::Entity::find();
        if let Some(property_id) = property_id {
            query = query.filter(property_transfers::Column::PropertyId.eq(property_id));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(property_transfers::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    async fn load_client(
        txn: &DatabaseTransaction,
        id: Uuid,
    ) -> Result<clients::Model, TransferError> {
        clients::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or(TransferError::ClientNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_rejects_negative_price() {
        let err = validate(dec!(-0.01)).unwrap_err();
        assert!(matches!(err, TransferError::InvalidFigure(_)));
        assert!(validate(Decimal::ZERO).is_ok());
        assert!(validate(dec!(250_000)).is_ok());
    }

    #[test]
    fn test_error_status_mapping() {
        let id = Uuid::new_v4();
        let not_found: AppError = TransferError::PropertyNotFound(id).into();
        assert_eq!(not_found.status_code(), 404);

        let invalid: AppError = TransferError::InvalidFigure("negative".into()).into();
        assert_eq!(invalid.status_code(), 400);
    }
}
