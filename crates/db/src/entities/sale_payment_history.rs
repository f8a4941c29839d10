//! `SeaORM` entity for the sale payment history ledger.
//!
//! Append-only. Rows are never updated or deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sale_payment_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sale_transaction_id: Uuid,
    pub installment_id: Option<Uuid>,
    pub amount: Decimal,
    pub reason: String,
    pub recorded_at: DateTimeWithTimeZone,
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
        belongs_to = "super::installments::Entity",
        from = "Column::InstallmentId",
        to = "super::installments::Column::Id"
    )]
    Installments,
}

impl Related<super::sale_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleTransactions.def()
    }
}

impl Related<super::installments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Installments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
