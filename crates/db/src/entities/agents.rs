//! `SeaORM` entity for the agents table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AgentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "agents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub status: AgentStatus,
    pub recorded_by: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale_transactions::Entity")]
    SaleTransactions,
}

impl Related<super::sale_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
