//! `SeaORM` entity for the payment plan templates table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub deposit_percentage: Decimal,
    pub duration_months: i32,
    pub interest_rate: Decimal,
    pub created_by: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::installment_plans::Entity")]
    InstallmentPlans,
}

impl Related<super::installment_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InstallmentPlans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
