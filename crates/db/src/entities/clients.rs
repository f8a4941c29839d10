//! `SeaORM` entity for the clients table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ClientStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub telephone_number: String,
    pub email: Option<String>,
    pub status: ClientStatus,
    pub recorded_by: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale_transactions::Entity")]
    SaleTransactions,
    #[sea_orm(has_many = "super::service_jobs::Entity")]
    ServiceJobs,
}

impl Related<super::sale_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleTransactions.def()
    }
}

impl Related<super::service_jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceJobs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
