//! Agent repository.
//!
//! Agents introduce clients to sales. Names are unique; re-adding a
//! name that belongs to an inactive agent revives that record.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use terralot_shared::AppError;

use crate::entities::agents;
use crate::entities::sea_orm_active_enums::AgentStatus;
use crate::repositories::activity_log;

/// Error types for agent operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Agent not found.
    #[error("Agent not found: {0}")]
    NotFound(Uuid),

    /// An active agent already carries this name.
    #[error("Agent name already in use: {0}")]
    DuplicateName(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AgentError> for AppError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::NotFound(_) => Self::NotFound(err.to_string()),
            AgentError::DuplicateName(_) => Self::Conflict(err.to_string()),
            AgentError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Agent repository.
#[derive(Debug, Clone)]
pub struct AgentRepository {
    db: DatabaseConnection,
}

impl AgentRepository {
    /// Creates a new agent repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds an agent, reviving an inactive one of the same name.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if an active agent already uses the name.
    pub async fn add(&self, name: &str, recorded_by: &str) -> Result<agents::Model, AgentError> {
        let txn = self.db.begin().await?;

        let existing = agents::Entity::find()
            .filter(agents::Column::Name.eq(name))
            .one(&txn)
            .await?;

        let agent = match existing {
            Some(agent) if agent.status == AgentStatus::Active => {
                return Err(AgentError::DuplicateName(name.to_owned()));
            }
            Some(dormant) => {
                let mut model: agents::ActiveModel = dormant.into();
                model.status = Set(AgentStatus::Active);
                model.update(&txn).await?
            }
            None => {
                let model = agents::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    name: Set(name.to_owned()),
                    status: Set(AgentStatus::Active),
                    recorded_by: Set(recorded_by.to_owned()),
                    created_at: Set(Utc::now().into()),
                };
                model.insert(&txn).await?
            }
        };

        activity_log::append(&txn, recorded_by, "agent.add", Some(name.to_owned())).await?;

        txn.commit().await?;
        Ok(agent)
    }

    /// Lists agents, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, status: Option<AgentStatus>) -> Result<Vec<agents::Model>, AgentError> {
        let mut query = agents::Entity::find();
        if let Some(status) = status {
            query = query.filter(agents::Column::Status.eq(status));
        }
        let rows = query.order_by_asc(agents::Column::Name).all(&self.db).await?;
        Ok(rows)
    }

    /// Sets an agent's status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such agent exists.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: AgentStatus,
        actor: &str,
    ) -> Result<agents::Model, AgentError> {
        let txn = self.db.begin().await?;

        let existing = agents::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AgentError::NotFound(id))?;

        let mut model: agents::ActiveModel = existing.into();
        model.status = Set(status);
        let updated = model.update(&txn).await?;

        activity_log::append(&txn, actor, "agent.set_status", Some(format!("id {id}"))).await?;

        txn.commit().await?;
        Ok(updated)
    }
}
