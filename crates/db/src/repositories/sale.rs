//! Sales ledger repository.
//!
//! Recording a sale flips the property to `Sold`, writes the ledger
//! row, and (for installment sales) materializes the amortization
//! schedule, all inside one database transaction. Payments likewise
//! update the transaction totals, the touched installments, and the
//! append-only history together.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use terralot_core::inventory::{InventoryError, InventoryService};
use terralot_core::sales::{
    allocate_payment, apply_balance_payment, AmortizationSchedule, OutstandingInstallment,
    PaymentPlanTerms, SaleTerms, SalesError,
};
use terralot_shared::types::PageRequest;
use terralot_shared::AppError;

use crate::entities::sea_orm_active_enums::{InstallmentStatus, PaymentMode, PropertyStatus};
use crate::entities::{
    clients, installment_plans, installments, payment_plans, properties, sale_payment_history,
    sale_transactions,
};
use crate::repositories::activity_log;

/// Error types for sales operations.
#[derive(Debug, thiserror::Error)]
pub enum SaleError {
    /// Sale transaction not found.
    #[error("Sale not found: {0}")]
    SaleNotFound(Uuid),

    /// Property not found.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// Client not found or inactive.
    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    /// Payment plan not found.
    #[error("Payment plan not found: {0}")]
    PlanNotFound(Uuid),

    /// An installment sale is missing its plan row.
    #[error("Installment plan missing for sale {0}")]
    PlanRowMissing(Uuid),

    /// Stored plan duration cannot index a schedule.
    #[error("Payment plan duration out of range: {0}")]
    InvalidPlanDuration(i32),

    /// Property status rule violation.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Ledger rule violation.
    #[error(transparent)]
    Ledger(#[from] SalesError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SaleError> for AppError {
    fn from(err: SaleError) -> Self {
        match err {
            SaleError::SaleNotFound(_)
            | SaleError::PropertyNotFound(_)
            | SaleError::ClientNotFound(_)
            | SaleError::PlanNotFound(_) => Self::NotFound(err.to_string()),
            SaleError::Inventory(_) | SaleError::Ledger(_) => Self::BusinessRule(err.to_string()),
            SaleError::PlanRowMissing(_) | SaleError::InvalidPlanDuration(_) => {
                Self::Internal(err.to_string())
            }
            SaleError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for recording a cash sale.
#[derive(Debug, Clone)]
pub struct RecordCashSaleInput {
    /// Property being sold.
    pub property_id: Uuid,
    /// Buying client.
    pub client_id: Uuid,
    /// Introducing agent, if any.
    pub agent_id: Option<Uuid>,
    /// Discount off the asking price.
    pub discount: Decimal,
    /// Amount received at recording time.
    pub amount_paid: Decimal,
    /// Business date of the sale.
    pub transaction_date: NaiveDate,
    /// Staff member recording the sale.
    pub recorded_by: String,
}

/// Input for recording an installment sale.
#[derive(Debug, Clone)]
pub struct RecordInstallmentSaleInput {
    /// Property being sold.
    pub property_id: Uuid,
    /// Buying client.
    pub client_id: Uuid,
    /// Introducing agent, if any.
    pub agent_id: Option<Uuid>,
    /// Payment plan template governing the schedule.
    pub payment_plan_id: Uuid,
    /// Opening deposit received.
    pub amount_paid: Decimal,
    /// Date the schedule counts from.
    pub start_date: NaiveDate,
    /// Business date of the sale.
    pub transaction_date: NaiveDate,
    /// Staff member recording the sale.
    pub recorded_by: String,
}

/// Filter options for listing sales.
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    /// Filter by payment mode.
    pub mode: Option<PaymentMode>,
    /// Transaction date range start.
    pub date_from: Option<NaiveDate>,
    /// Transaction date range end.
    pub date_to: Option<NaiveDate>,
    /// Filter by buying client.
    pub client_id: Option<Uuid>,
}

/// A sale with its schedule, if it has one.
#[derive(Debug, Clone)]
pub struct SaleDetails {
    /// The ledger row.
    pub transaction: sale_transactions::Model,
    /// Installment plan header, for installment sales.
    pub installment_plan: Option<installment_plans::Model>,
    /// Scheduled installments, oldest first.
    pub installments: Vec<installments::Model>,
}

/// Sales ledger repository.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    db: DatabaseConnection,
}

impl SaleRepository {
    /// Creates a new sale repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a cash sale and marks the property sold.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not sellable, the figures
    /// fail the cash-sale rules, or a database operation fails.
    pub async fn record_cash_sale(
        &self,
        input: RecordCashSaleInput,
    ) -> Result<sale_transactions::Model, SaleError> {
        let txn = self.db.begin().await?;

        let property = Self::load_property(&txn, input.property_id).await?;
        Self::check_client(&txn, input.client_id).await?;

        let terms = SaleTerms::cash(property.price, input.discount, input.amount_paid)?;
        let sold = InventoryService::mark_sold(property.status.clone().into())?;

        Self::set_property_status(&txn, property, sold.into()).await?;

        let sale = Self::insert_transaction(
            &txn,
            &input.recorded_by,
            input.property_id,
            input.client_id,
            input.agent_id,
            PaymentMode::Cash,
            terms,
            input.transaction_date,
        )
        .await?;

        if input.amount_paid > Decimal::ZERO {
            Self::append_history(&txn, sale.id, None, input.amount_paid, "Cash payment").await?;
        }

        activity_log::append(
            &txn,
            &input.recorded_by,
            "sale.record_cash",
            Some(format!("property {} for {}", input.property_id, sale.total_payable)),
        )
        .await?;

        txn.commit().await?;
        debug!(sale_id = %sale.id, mode = "cash", "Sale recorded");
        Ok(sale)
    }

    /// Records an installment sale: ledger row, plan header, and the
    /// full schedule, with the property marked sold.
    ///
    /// # Errors
    ///
    /// Returns an error if the deposit is below the plan's requirement,
    /// the property is not sellable, or a database operation fails.
    pub async fn record_installment_sale(
        &self,
        input: RecordInstallmentSaleInput,
    ) -> Result<SaleDetails, SaleError> {
        let txn = self.db.begin().await?;

        let property = Self::load_property(&txn, input.property_id).await?;
        Self::check_client(&txn, input.client_id).await?;

        let plan = payment_plans::Entity::find_by_id(input.payment_plan_id)
            .one(&txn)
            .await?
            .ok_or(SaleError::PlanNotFound(input.payment_plan_id))?;
        let duration_months = u32::try_from(plan.duration_months)
            .map_err(|_| SaleError::InvalidPlanDuration(plan.duration_months))?;

        let terms = PaymentPlanTerms {
            deposit_percentage: plan.deposit_percentage,
            interest_rate: plan.interest_rate,
            duration_months,
        };
        let schedule =
            AmortizationSchedule::compute(property.price, terms, input.amount_paid, input.start_date)?;

        let sold = InventoryService::mark_sold(property.status.clone().into())?;
        Self::set_property_status(&txn, property, sold.into()).await?;

        let opening = SaleTerms {
            total_payable: schedule.total_payable,
            amount_paid: input.amount_paid,
            discount: Decimal::ZERO,
            balance: schedule.total_payable - input.amount_paid,
        };
        let sale = Self::insert_transaction(
            &txn,
            &input.recorded_by,
            input.property_id,
            input.client_id,
            input.agent_id,
            PaymentMode::Installments,
            opening,
            input.transaction_date,
        )
        .await?;

        let plan_row = installment_plans::ActiveModel {
            id: Set(Uuid::new_v4()),
            sale_transaction_id: Set(sale.id),
            payment_plan_id: Set(plan.id),
            financed_balance: Set(schedule.financed_balance()),
            monthly_amount: Set(schedule.monthly_amount),
            start_date: Set(input.start_date),
        };
        let plan_row = plan_row.insert(&txn).await?;

        let mut rows = Vec::with_capacity(schedule.installments.len());
        for scheduled in &schedule.installments {
            let sequence = i32::try_from(scheduled.sequence)
                .map_err(|_| SaleError::InvalidPlanDuration(plan.duration_months))?;
            let row = installments::ActiveModel {
                id: Set(Uuid::new_v4()),
                installment_plan_id: Set(plan_row.id),
                sequence: Set(sequence),
                due_date: Set(scheduled.due_date),
                amount_due: Set(scheduled.amount_due),
                amount_paid: Set(Decimal::ZERO),
                status: Set(InstallmentStatus::Outstanding),
            };
            rows.push(row.insert(&txn).await?);
        }

        if input.amount_paid > Decimal::ZERO {
            Self::append_history(&txn, sale.id, None, input.amount_paid, "Deposit").await?;
        }

        activity_log::append(
            &txn,
            &input.recorded_by,
            "sale.record_installment",
            Some(format!(
                "property {} over {} months",
                input.property_id, duration_months
            )),
        )
        .await?;

        txn.commit().await?;
        debug!(sale_id = %sale.id, mode = "installments", "Sale recorded");
        Ok(SaleDetails {
            transaction: sale,
            installment_plan: Some(plan_row),
            installments: rows,
        })
    }

    /// Applies a payment to a sale.
    ///
    /// Cash sales take free-form balance payments. Installment sales
    /// split the amount across unpaid installments oldest-first, with
    /// any excess past the schedule recorded against the transaction as
    /// a balance overpayment.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is non-positive or exceeds the
    /// outstanding balance.
    pub async fn apply_payment(
        &self,
        sale_id: Uuid,
        amount: Decimal,
        recorded_by: &str,
    ) -> Result<sale_transactions::Model, SaleError> {
        let txn = self.db.begin().await?;

        let sale = sale_transactions::Entity::find_by_id(sale_id)
            .one(&txn)
            .await?
            .ok_or(SaleError::SaleNotFound(sale_id))?;

        let updated = match sale.payment_mode {
            PaymentMode::Cash => {
                let (new_paid, new_balance) =
                    apply_balance_payment(sale.total_amount_paid, sale.balance, amount)?;
                Self::append_history(&txn, sale_id, None, amount, "Balance payment").await?;
                Self::update_totals(&txn, sale, new_paid, new_balance).await?
            }
            PaymentMode::Installments => {
                let plan_row = installment_plans::Entity::find()
                    .filter(installment_plans::Column::SaleTransactionId.eq(sale_id))
                    .one(&txn)
                    .await?
                    .ok_or(SaleError::PlanRowMissing(sale_id))?;

                let rows = installments::Entity::find()
                    .filter(installments::Column::InstallmentPlanId.eq(plan_row.id))
                    .all(&txn)
                    .await?;
                let outstanding: Vec<OutstandingInstallment> = rows
                    .iter()
                    .map(|row| OutstandingInstallment {
                        id: row.id,
                        due_date: row.due_date,
                        amount_due: row.amount_due,
                        amount_paid: row.amount_paid,
                    })
                    .collect();

                let allocation = allocate_payment(amount, sale.balance, &outstanding)?;

                for application in &allocation.applications {
                    let row = rows
                        .iter()
                        .find(|r| r.id == application.installment_id)
                        .ok_or(SaleError::PlanRowMissing(sale_id))?
                        .clone();
                    let new_paid = row.amount_paid + application.amount;
                    let mut model: installments::ActiveModel = row.into();
                    model.amount_paid = Set(new_paid);
                    model.status = Set(if application.settles {
                        InstallmentStatus::Paid
                    } else {
                        InstallmentStatus::PartiallyPaid
                    });
                    model.update(&txn).await?;

                    Self::append_history(
                        &txn,
                        sale_id,
                        Some(application.installment_id),
                        application.amount,
                        "Installment payment",
                    )
                    .await?;
                }

                if allocation.overpayment > Decimal::ZERO {
                    Self::append_history(
                        &txn,
                        sale_id,
                        None,
                        allocation.overpayment,
                        "Balance overpayment",
                    )
                    .await?;
                }

                let new_paid = sale.total_amount_paid + amount;
                let new_balance = sale.balance - amount;
                Self::update_totals(&txn, sale, new_paid, new_balance).await?
            }
        };

        activity_log::append(
            &txn,
            recorded_by,
            "sale.payment",
            Some(format!("sale {sale_id} amount {amount}")),
        )
        .await?;

        txn.commit().await?;
        debug!(sale_id = %sale_id, %amount, "Payment applied");
        Ok(updated)
    }

    /// Fetches a sale with its schedule.
    ///
    /// # Errors
    ///
    /// Returns `SaleNotFound` if no such sale exists.
    pub async fn get_sale(&self, id: Uuid) -> Result<SaleDetails, SaleError> {
        let transaction = sale_transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(SaleError::SaleNotFound(id))?;

        let installment_plan = installment_plans::Entity::find()
            .filter(installment_plans::Column::SaleTransactionId.eq(id))
            .one(&self.db)
            .await?;

        let rows = if let Some(plan) = &installment_plan {
            installments::Entity::find()
                .filter(installments::Column::InstallmentPlanId.eq(plan.id))
                .order_by_asc(installments::Column::Sequence)
                .all(&self.db)
                .await?
        } else {
            Vec::new()
        };

        Ok(SaleDetails {
            transaction,
            installment_plan,
            installments: rows,
        })
    }

    /// Lists sales with filters and pagination, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_sales(
        &self,
        filter: SaleFilter,
        page: PageRequest,
    ) -> Result<(Vec<sale_transactions::Model>, u64), SaleError> {
        let mut query = sale_transactions::Entity::find();
        if let Some(mode) = filter.mode {
            query = query.filter(sale_transactions::Column::PaymentMode.eq(mode));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(sale_transactions::Column::TransactionDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(sale_transactions::Column::TransactionDate.lte(to));
        }
        if let Some(client_id) = filter.client_id {
            query = query.filter(sale_transactions::Column::ClientId.eq(client_id));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(sale_transactions::Column::TransactionDate)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Returns a sale's payment history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `SaleNotFound` if no such sale exists.
    pub async fn payment_history(
        &self,
        sale_id: Uuid,
    ) -> Result<Vec<sale_payment_history::Model>, SaleError> {
        sale_transactions::Entity::find_by_id(sale_id)
            .one(&self.db)
            .await?
            .ok_or(SaleError::SaleNotFound(sale_id))?;

        let rows = sale_payment_history::Entity::find()
            .filter(sale_payment_history::Column::SaleTransactionId.eq(sale_id))
            .order_by_asc(sale_payment_history::Column::RecordedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Sum of outstanding balances across all sales.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn total_outstanding_balance(&self) -> Result<Decimal, SaleError> {
        let total: Option<Option<Decimal>> = sale_transactions::Entity::find()
            .select_only()
            .column_as(sale_transactions::Column::Balance.sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }

    async fn load_property(
        txn: &DatabaseTransaction,
        id: Uuid,
    ) -> Result<properties::Model, SaleError> {
        properties::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or(SaleError::PropertyNotFound(id))
    }

    async fn check_client(txn: &DatabaseTransaction, id: Uuid) -> Result<(), SaleError> {
        clients::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or(SaleError::ClientNotFound(id))?;
        Ok(())
    }

    async fn set_property_status(
        txn: &DatabaseTransaction,
        property: properties::Model,
        status: PropertyStatus,
    ) -> Result<(), SaleError> {
        let mut model: properties::ActiveModel = property.into();
        model.status = Set(status);
        model.updated_at = Set(Utc::now().into());
        model.update(txn).await?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn insert_transaction(
        txn: &DatabaseTransaction,
        recorded_by: &str,
        property_id: Uuid,
        client_id: Uuid,
        agent_id: Option<Uuid>,
        mode: PaymentMode,
        terms: SaleTerms,
        transaction_date: NaiveDate,
    ) -> Result<sale_transactions::Model, SaleError> {
        let now = Utc::now().into();
        let model = sale_transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            property_id: Set(property_id),
            client_id: Set(client_id),
            agent_id: Set(agent_id),
            payment_mode: Set(mode),
            total_payable: Set(terms.total_payable),
            total_amount_paid: Set(terms.amount_paid),
            discount: Set(terms.discount),
            balance: Set(terms.balance),
            transaction_date: Set(transaction_date),
            recorded_by: Set(recorded_by.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model.insert(txn).await?;
        Ok(created)
    }

    async fn update_totals(
        txn: &DatabaseTransaction,
        sale: sale_transactions::Model,
        new_paid: Decimal,
        new_balance: Decimal,
    ) -> Result<sale_transactions::Model, SaleError> {
        let mut model: sale_transactions::ActiveModel = sale.into();
        model.total_amount_paid = Set(new_paid);
        model.balance = Set(new_balance);
        model.updated_at = Set(Utc::now().into());
        let updated = model.update(txn).await?;
        Ok(updated)
    }

    async fn append_history(
        txn: &DatabaseTransaction,
        sale_id: Uuid,
        installment_id: Option<Uuid>,
        amount: Decimal,
        reason: &str,
    ) -> Result<(), SaleError> {
        let row = sale_payment_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            sale_transaction_id: Set(sale_id),
            installment_id: Set(installment_id),
            amount: Set(amount),
            reason: Set(reason.to_owned()),
            recorded_at: Set(Utc::now().into()),
        };
        row.insert(txn).await?;
        Ok(())
    }
}
