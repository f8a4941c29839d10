//! `SeaORM` entity for the survey/search job register.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::JobStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "service_jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub description: String,
    pub title_name: Option<String>,
    pub title_number: Option<String>,
    pub fee: Decimal,
    pub status: JobStatus,
    pub brought_by: Option<String>,
    pub recorded_by: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Clients,
    #[sea_orm(has_one = "super::service_payments::Entity")]
    ServicePayments,
    #[sea_orm(has_one = "super::service_dispatches::Entity")]
    ServiceDispatches,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::service_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServicePayments.def()
    }
}

impl Related<super::service_dispatches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceDispatches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
