//! `SeaORM` entity for service payment history.
//!
//! Append-only. Rows are never updated or deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "service_payment_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_payment_id: Uuid,
    pub amount: Decimal,
    pub payment_type: String,
    pub recorded_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::service_payments::Entity",
        from = "Column::ServicePaymentId",
        to = "super::service_payments::Column::Id"
    )]
    ServicePayments,
}

impl Related<super::service_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServicePayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
