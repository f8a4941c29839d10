//! Client repository.
//!
//! Admission is a logical upsert keyed on the telephone number, and
//! deletion is always a soft delete so past sales keep their client.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use terralot_core::clients::{AdmissionPlan, ClientService};
use terralot_shared::types::PageRequest;
use terralot_shared::AppError;

use crate::entities::clients;
use crate::entities::sea_orm_active_enums::ClientStatus;
use crate::repositories::activity_log;

/// Error types for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Client not found.
    #[error("Client not found: {0}")]
    NotFound(Uuid),

    /// The client is already inactive.
    #[error("Client already inactive: {0}")]
    AlreadyInactive(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(_) => Self::NotFound(err.to_string()),
            ClientError::AlreadyInactive(_) => Self::BusinessRule(err.to_string()),
            ClientError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for admitting a client.
#[derive(Debug, Clone)]
pub struct AdmitClientInput {
    /// Client's name.
    pub name: String,
    /// Telephone number, the admission key.
    pub telephone_number: String,
    /// Contact email, if any.
    pub email: Option<String>,
    /// Staff member admitting the client.
    pub recorded_by: String,
}

/// Fields a client update may change.
#[derive(Debug, Clone, Default)]
pub struct UpdateClientInput {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
}

/// What an admission actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionOutcome {
    /// A new record was inserted.
    Created,
    /// A dormant record with the same number was revived.
    Reactivated,
    /// An active record with the same number was reused.
    Existing,
}

/// Client repository for admission and CRUD operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    /// Creates a new client repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Admits a client.
    ///
    /// An active record holding the number is reused untouched; an
    /// inactive one is revived and takes the new name and email; a
    /// number never seen before gets a fresh row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn admit_client(
        &self,
        input: AdmitClientInput,
    ) -> Result<(clients::Model, AdmissionOutcome), ClientError> {
        let txn = self.db.begin().await?;

        // Prefer the active holder of the number; fall back to the most
        // recently deactivated one.
        let active = clients::Entity::find()
            .filter(clients::Column::TelephoneNumber.eq(&input.telephone_number))
            .filter(clients::Column::Status.eq(ClientStatus::Active))
            .one(&txn)
            .await?;
        let existing = match active {
            Some(model) => Some(model),
            None => {
                clients::Entity::find()
                    .filter(clients::Column::TelephoneNumber.eq(&input.telephone_number))
                    .filter(clients::Column::Status.eq(ClientStatus::Inactive))
                    .order_by_desc(clients::Column::UpdatedAt)
                    .one(&txn)
                    .await?
            }
        };

        let plan = ClientService::plan_admission(
            existing
                .as_ref()
                .map(|c| (c.id, c.status.clone().into())),
        );

        let (result, outcome) = match plan {
            AdmissionPlan::Create => {
                let now = Utc::now().into();
                let model = clients::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    name: Set(input.name.clone()),
                    telephone_number: Set(input.telephone_number.clone()),
                    email: Set(input.email.clone()),
                    status: Set(ClientStatus::Active),
                    recorded_by: Set(input.recorded_by.clone()),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                let created = model.insert(&txn).await?;
                activity_log::append(
                    &txn,
                    &input.recorded_by,
                    "client.admit",
                    Some(format!("created {}", input.telephone_number)),
                )
                .await?;
                (created, AdmissionOutcome::Created)
            }
            AdmissionPlan::Reactivate { client_id } => {
                let dormant = clients::Entity::find_by_id(client_id)
                    .one(&txn)
                    .await?
                    .ok_or(ClientError::NotFound(client_id))?;
                let mut model: clients::ActiveModel = dormant.into();
                model.status = Set(ClientStatus::Active);
                model.name = Set(input.name.clone());
                model.email = Set(input.email.clone());
                model.updated_at = Set(Utc::now().into());
                let revived = model.update(&txn).await?;
                activity_log::append(
                    &txn,
                    &input.recorded_by,
                    "client.admit",
                    Some(format!("reactivated {}", input.telephone_number)),
                )
                .await?;
                (revived, AdmissionOutcome::Reactivated)
            }
            AdmissionPlan::UseExisting { client_id } => {
                let model = existing
                    .filter(|c| c.id == client_id)
                    .ok_or(ClientError::NotFound(client_id))?;
                (model, AdmissionOutcome::Existing)
            }
        };

        txn.commit().await?;
        debug!(client_id = %result.id, ?outcome, "Client admitted");
        Ok((result, outcome))
    }

    /// Fetches a client by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such client exists.
    pub async fn get(&self, id: Uuid) -> Result<clients::Model, ClientError> {
        clients::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ClientError::NotFound(id))
    }

    /// Lists clients with optional status filter and search.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        status: Option<ClientStatus>,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<(Vec<clients::Model>, u64), ClientError> {
        let mut query = clients::Entity::find();
        if let Some(status) = status {
            query = query.filter(clients::Column::Status.eq(status));
        }
        if let Some(search) = &search {
            query = query.filter(
                Condition::any()
                    .add(clients::Column::Name.contains(search))
                    .add(clients::Column::TelephoneNumber.contains(search)),
            );
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_asc(clients::Column::Name)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Updates a client's name or email.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such client exists.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateClientInput,
        actor: &str,
    ) -> Result<clients::Model, ClientError> {
        let txn = self.db.begin().await?;

        let existing = clients::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ClientError::NotFound(id))?;

        let mut model: clients::ActiveModel = existing.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(email) = input.email {
            model.email = Set(Some(email));
        }
        model.updated_at = Set(Utc::now().into());
        let updated = model.update(&txn).await?;

        activity_log::append(&txn, actor, "client.update", Some(format!("id {id}"))).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Soft-deletes a client by flipping it inactive.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyInactive` if the client is not active.
    pub async fn deactivate(&self, id: Uuid, actor: &str) -> Result<clients::Model, ClientError> {
        let txn = self.db.begin().await?;

        let existing = clients::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ClientError::NotFound(id))?;
        if existing.status == ClientStatus::Inactive {
            return Err(ClientError::AlreadyInactive(id));
        }

        let mut model: clients::ActiveModel = existing.into();
        model.status = Set(ClientStatus::Inactive);
        model.updated_at = Set(Utc::now().into());
        let updated = model.update(&txn).await?;

        activity_log::append(&txn, actor, "client.deactivate", Some(format!("id {id}"))).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Counts active clients, for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count_active(&self) -> Result<u64, ClientError> {
        let count = clients::Entity::find()
            .filter(clients::Column::Status.eq(ClientStatus::Active))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
