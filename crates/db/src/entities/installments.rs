//! `SeaORM` entity for individual scheduled installments.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::InstallmentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "installments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub installment_plan_id: Uuid,
    pub sequence: i32,
    pub due_date: Date,
    pub amount_due: Decimal,
    pub amount_paid: Decimal,
    pub status: InstallmentStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::installment_plans::Entity",
        from = "Column::InstallmentPlanId",
        to = "super::installment_plans::Column::Id"
    )]
    InstallmentPlans,
    #[sea_orm(has_many = "super::sale_payment_history::Entity")]
    SalePaymentHistory,
}

impl Related<super::installment_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InstallmentPlans.def()
    }
}

impl Related<super::sale_payment_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalePaymentHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
