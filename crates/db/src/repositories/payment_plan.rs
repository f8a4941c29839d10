//! Payment plan template repository.
//!
//! Plans are templates, not ledgers: installment plans snapshot their
//! figures at booking time, so editing or deleting a template never
//! touches a live sale.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use terralot_shared::AppError;

use crate::entities::{installment_plans, payment_plans};
use crate::repositories::activity_log;

/// Error types for payment plan operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentPlanError {
    /// Plan not found.
    #[error("Payment plan not found: {0}")]
    NotFound(Uuid),

    /// A plan already carries this name.
    #[error("Payment plan name already in use: {0}")]
    DuplicateName(String),

    /// A figure fails validation.
    #[error("Invalid plan figure: {0}")]
    InvalidFigure(String),

    /// The plan is referenced by live installment sales.
    #[error("Payment plan {0} is in use by recorded sales")]
    InUse(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PaymentPlanError> for AppError {
    fn from(err: PaymentPlanError) -> Self {
        match err {
            PaymentPlanError::NotFound(_) => Self::NotFound(err.to_string()),
            PaymentPlanError::DuplicateName(_) => Self::Conflict(err.to_string()),
            PaymentPlanError::InvalidFigure(_) => Self::Validation(err.to_string()),
            PaymentPlanError::InUse(_) => Self::BusinessRule(err.to_string()),
            PaymentPlanError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a payment plan.
#[derive(Debug, Clone)]
pub struct CreatePaymentPlanInput {
    /// Unique template name.
    pub name: String,
    /// Deposit required, percent of the raw price.
    pub deposit_percentage: Decimal,
    /// Number of monthly installments.
    pub duration_months: i32,
    /// Simple annual interest rate, percent.
    pub interest_rate: Decimal,
    /// Staff member creating the plan.
    pub created_by: String,
}

/// Fields a plan update may change.
#[derive(Debug, Clone, Default)]
pub struct UpdatePaymentPlanInput {
    /// New name.
    pub name: Option<String>,
    /// New deposit percentage.
    pub deposit_percentage: Option<Decimal>,
    /// New duration.
    pub duration_months: Option<i32>,
    /// New interest rate.
    pub interest_rate: Option<Decimal>,
}

fn validate(
    deposit_percentage: Decimal,
    duration_months: i32,
    interest_rate: Decimal,
) -> Result<(), PaymentPlanError> {
    if deposit_percentage.is_sign_negative() || deposit_percentage > Decimal::ONE_HUNDRED {
        return Err(PaymentPlanError::InvalidFigure(
            "deposit percentage must be between 0 and 100".into(),
        ));
    }
    if duration_months < 0 {
        return Err(PaymentPlanError::InvalidFigure(
            "duration must not be negative".into(),
        ));
    }
    if interest_rate.is_sign_negative() {
        return Err(PaymentPlanError::InvalidFigure(
            "interest rate must not be negative".into(),
        ));
    }
    Ok(())
}

/// Payment plan repository.
#[derive(Debug, Clone)]
pub struct PaymentPlanRepository {
    db: DatabaseConnection,
}

impl PaymentPlanRepository {
    /// Creates a new payment plan repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a plan template.
    ///
    /// # Errors
    ///
    /// Returns an error on a duplicate name or an out-of-range figure.
    pub async fn create(
        &self,
        input: CreatePaymentPlanInput,
    ) -> Result<payment_plans::Model, PaymentPlanError> {
        validate(input.deposit_percentage, input.duration_months, input.interest_rate)?;

        let txn = self.db.begin().await?;

        let taken = payment_plans::Entity::find()
            .filter(payment_plans::Column::Name.eq(&input.name))
            .one(&txn)
            .await?;
        if taken.is_some() {
            return Err(PaymentPlanError::DuplicateName(input.name));
        }

        let model = payment_plans::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            deposit_percentage: Set(input.deposit_percentage),
            duration_months: Set(input.duration_months),
            interest_rate: Set(input.interest_rate),
            created_by: Set(input.created_by.clone()),
            created_at: Set(Utc::now().into()),
        };
        let created = model.insert(&txn).await?;

        activity_log::append(&txn, &input.created_by, "payment_plan.create", Some(input.name))
            .await?;

        txn.commit().await?;
        Ok(created)
    }

    /// Fetches a plan by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such plan exists.
    pub async fn get(&self, id: Uuid) -> Result<payment_plans::Model, PaymentPlanError> {
        payment_plans::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PaymentPlanError::NotFound(id))
    }

    /// Lists all plans by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<payment_plans::Model>, PaymentPlanError> {
        let rows = payment_plans::Entity::find()
            .order_by_asc(payment_plans::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Updates a plan template.
    ///
    /// # Errors
    ///
    /// Returns an error on a missing plan or an out-of-range figure.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdatePaymentPlanInput,
        actor: &str,
    ) -> Result<payment_plans::Model, PaymentPlanError> {
        let txn = self.db.begin().await?;

        let existing = payment_plans::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PaymentPlanError::NotFound(id))?;

        let deposit = input.deposit_percentage.unwrap_or(existing.deposit_percentage);
        let duration = input.duration_months.unwrap_or(existing.duration_months);
        let rate = input.interest_rate.unwrap_or(existing.interest_rate);
        validate(deposit, duration, rate)?;

        if let Some(name) = &input.name {
            let taken = payment_plans::Entity::find()
                .filter(payment_plans::Column::Name.eq(name))
                .filter(payment_plans::Column::Id.ne(id))
                .one(&txn)
                .await?;
            if taken.is_some() {
                return Err(PaymentPlanError::DuplicateName(name.clone()));
            }
        }

        let mut model: payment_plans::ActiveModel = existing.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        model.deposit_percentage = Set(deposit);
        model.duration_months = Set(duration);
        model.interest_rate = Set(rate);
        let updated = model.update(&txn).await?;

        activity_log::append(&txn, actor, "payment_plan.update", Some(format!("id {id}"))).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a plan template.
    ///
    /// Refused while installment sales still reference the plan.
    ///
    /// # Errors
    ///
    /// Returns `InUse` when live sales reference the plan.
    pub async fn delete(&self, id: Uuid, actor: &str) -> Result<(), PaymentPlanError> {
        let txn = self.db.begin().await?;

        payment_plans::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PaymentPlanError::NotFound(id))?;

        let references = installment_plans::Entity::find()
            .filter(installment_plans::Column::PaymentPlanId.eq(id))
            .count(&txn)
            .await?;
        if references > 0 {
            return Err(PaymentPlanError::InUse(id));
        }

        payment_plans::Entity::delete_by_id(id).exec(&txn).await?;

        activity_log::append(&txn, actor, "payment_plan.delete", Some(format!("id {id}"))).await?;

        txn.commit().await?;
        Ok(())
    }
}
