//! `SeaORM` entity for the properties table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{PropertyKind, PropertyStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: PropertyKind,
    #[sea_orm(unique)]
    pub title_deed_number: String,
    pub location: String,
    pub size: Decimal,
    pub price: Decimal,
    pub status: PropertyStatus,
    pub owner: Option<String>,
    pub description: Option<String>,
    pub telephone_number: Option<String>,
    pub email: Option<String>,
    pub recorded_by: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::proposed_lots::Entity")]
    ProposedLots,
    #[sea_orm(has_many = "super::sale_transactions::Entity")]
    SaleTransactions,
    #[sea_orm(has_many = "super::property_transfers::Entity")]
    PropertyTransfers,
}

impl Related<super::proposed_lots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProposedLots.def()
    }
}

impl Related<super::sale_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleTransactions.def()
    }
}

impl Related<super::property_transfers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyTransfers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
