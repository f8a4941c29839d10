//! `SeaORM` entity recording who collected a completed job's documents.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "service_dispatches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub job_id: Uuid,
    pub reason: Option<String>,
    pub collected_by: String,
    pub collector_phone: Option<String>,
    pub dispatched_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::service_jobs::Entity",
        from = "Column::JobId",
        to = "super::service_jobs::Column::Id"
    )]
    ServiceJobs,
}

impl Related<super::service_jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceJobs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
