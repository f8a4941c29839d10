//! Audit trail repository.
//!
//! Other repositories append through [`append`] inside their own
//! transactions so the audit row commits or rolls back together with
//! the mutation it describes.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use terralot_shared::types::PageRequest;

use crate::entities::activity_logs;

/// Appends one audit row on the given connection or transaction.
pub(crate) async fn append<C: ConnectionTrait>(
    conn: &C,
    actor: &str,
    action: &str,
    details: Option<String>,
) -> Result<(), DbErr> {
    let row = activity_logs::ActiveModel {
        id: Set(Uuid::new_v4()),
        actor: Set(actor.to_owned()),
        action: Set(action.to_owned()),
        details: Set(details),
        created_at: Set(Utc::now().into()),
    };
    row.insert(conn).await?;
    Ok(())
}

/// Filter options for querying the audit trail.
#[derive(Debug, Clone, Default)]
pub struct ActivityLogFilter {
    /// Only rows written by this actor.
    pub actor: Option<String>,
    /// Only rows whose action matches exactly.
    pub action: Option<String>,
}

/// Read access to the append-only audit trail.
#[derive(Debug, Clone)]
pub struct ActivityLogRepository {
    db: DatabaseConnection,
}

impl ActivityLogRepository {
    /// Creates a new activity log repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends an audit row outside any other repository's transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn record(
        &self,
        actor: &str,
        action: &str,
        details: Option<String>,
    ) -> Result<(), DbErr> {
        append(&self.db, actor, action, details).await
    }

    /// Lists audit rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: ActivityLogFilter,
        page: PageRequest,
    ) -> Result<(Vec<activity_logs::Model>, u64), DbErr> {
        let mut query = activity_logs::Entity::find();
        if let Some(actor) = &filter.actor {
            query = query.filter(activity_logs::Column::Actor.eq(actor));
        }
        if let Some(action) = &filter.action {
            query = query.filter(activity_logs::Column::Action.eq(action));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(activity_logs::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }
}
