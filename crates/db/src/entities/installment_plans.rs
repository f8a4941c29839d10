//! `SeaORM` entity for the installment plans table.
//!
//! One row per installment sale, linking the transaction to the payment
//! plan template it was booked under and the financed figures computed at
//! booking time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "installment_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub sale_transaction_id: Uuid,
    pub payment_plan_id: Uuid,
    pub financed_balance: Decimal,
    pub monthly_amount: Decimal,
    pub start_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sale_transactions::Entity",
        from = "Column::SaleTransactionId",
        to = "super::sale_transactions::Column::Id"
    )]
    SaleTransactions,
    #[sea_orm(
        belongs_to = "super::payment_plans::Entity",
        from = "Column::PaymentPlanId",
        to = "super::payment_plans::Column::Id"
    )]
    PaymentPlans,
    #[sea_orm(has_many = "super::installments::Entity")]
    Installments,
}

impl Related<super::sale_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleTransactions.def()
    }
}

impl Related<super::payment_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentPlans.def()
    }
}

impl Related<super::installments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Installments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
