//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//!
//! Every multi-step mutation (confirm a lot + create its property row,
//! record a sale + flip the property status, apply a payment + append
//! history) runs inside one database transaction.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    ActivityLogRepository, AgentRepository, ClientRepository, PaymentPlanRepository,
    PropertyRepository, SaleRepository, SubdivisionRepository, SurveyRepository,
    TransferRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
