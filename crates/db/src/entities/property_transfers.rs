//! `SeaORM` entity for the property transfers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "property_transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub property_id: Uuid,
    pub from_client_id: Option<Uuid>,
    pub to_client_id: Uuid,
    pub transfer_price: Decimal,
    pub transfer_date: Date,
    pub supervising_agent_id: Option<Uuid>,
    pub recorded_by: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::properties::Entity",
        from = "Column::PropertyId",
        to = "super::properties::Column::Id"
    )]
    Property,
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ToClientId",
        to = "super::clients::Column::Id"
    )]
    ToClient,
    #[sea_orm(
        belongs_to = "super::agents::Entity",
        from = "Column::SupervisingAgentId",
        to = "super::agents::Column::Id"
    )]
    SupervisingAgent,
}

impl Related<super::properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
