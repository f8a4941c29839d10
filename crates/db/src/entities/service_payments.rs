//! `SeaORM` entity for the per-job service payment ledger.
//!
//! Exactly one row per job. `amount_paid + balance = fee` holds after
//! every mutation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ServicePaymentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "service_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub job_id: Uuid,
    pub fee: Decimal,
    pub amount_paid: Decimal,
    pub balance: Decimal,
    pub status: ServicePaymentStatus,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::service_jobs::Entity",
        from = "Column::JobId",
        to = "super::service_jobs::Column::Id"
    )]
    ServiceJobs,
    #[sea_orm(has_many = "super::service_payment_history::Entity")]
    ServicePaymentHistory,
}

impl Related<super::service_jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceJobs.def()
    }
}

impl Related<super::service_payment_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServicePaymentHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
