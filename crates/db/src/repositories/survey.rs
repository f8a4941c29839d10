//! Survey job repository.
//!
//! A job and its payment record are created together and mutate
//! together; the ledger identity `amount_paid + balance = fee` is
//! enforced by the core logic on every payment.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use terralot_core::survey::{JobStatus as CoreJobStatus, SurveyError, SurveyService};
use terralot_shared::types::PageRequest;
use terralot_shared::AppError;

use crate::entities::sea_orm_active_enums::{JobStatus, ServicePaymentStatus};
use crate::entities::{
    clients, service_dispatches, service_jobs, service_payment_history, service_payments,
};
use crate::repositories::activity_log;

/// Error types for survey job operations.
#[derive(Debug, thiserror::Error)]
pub enum SurveyRepoError {
    /// Job not found.
    #[error("Survey job not found: {0}")]
    JobNotFound(Uuid),

    /// Client not found.
    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    /// The job has no payment record; the schema guarantees one, so
    /// this indicates corruption.
    #[error("Payment record missing for job {0}")]
    PaymentRecordMissing(Uuid),

    /// Fee fails validation.
    #[error("Invalid fee: {0}")]
    InvalidFee(String),

    /// Lifecycle or ledger rule violation.
    #[error(transparent)]
    Workflow(#[from] SurveyError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SurveyRepoError> for AppError {
    fn from(err: SurveyRepoError) -> Self {
        match err {
            SurveyRepoError::JobNotFound(_) | SurveyRepoError::ClientNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            SurveyRepoError::PaymentRecordMissing(_) => Self::Internal(err.to_string()),
            SurveyRepoError::InvalidFee(_) => Self::Validation(err.to_string()),
            SurveyRepoError::Workflow(_) => Self::BusinessRule(err.to_string()),
            SurveyRepoError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for registering a survey or title-search job.
#[derive(Debug, Clone)]
pub struct CreateJobInput {
    /// Client commissioning the work.
    pub client_id: Uuid,
    /// What the job covers.
    pub description: String,
    /// Name on the title, if relevant.
    pub title_name: Option<String>,
    /// Title number, if relevant.
    pub title_number: Option<String>,
    /// Agreed fee.
    pub fee: Decimal,
    /// Who brought the job in.
    pub brought_by: Option<String>,
    /// Staff member registering the job.
    pub recorded_by: String,
}

/// Input for dispatching a completed job's documents.
#[derive(Debug, Clone)]
pub struct DispatchJobInput {
    /// Why or under what arrangement the documents left.
    pub reason: Option<String>,
    /// Person who collected them.
    pub collected_by: String,
    /// Collector's phone.
    pub collector_phone: Option<String>,
}

/// A job with its payment record and dispatch, if any.
#[derive(Debug, Clone)]
pub struct JobDetails {
    /// The job row.
    pub job: service_jobs::Model,
    /// Its fee ledger.
    pub payment: service_payments::Model,
    /// Dispatch record, once the documents have been handed over.
    pub dispatch: Option<service_dispatches::Model>,
}

/// Job counts per status, for dashboards.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct JobStatusCounts {
    /// Jobs in progress.
    pub ongoing: u64,
    /// Jobs awaiting collection.
    pub completed: u64,
    /// Jobs handed over.
    pub dispatched: u64,
    /// Abandoned jobs.
    pub cancelled: u64,
}

/// Survey job repository.
#[derive(Debug, Clone)]
pub struct SurveyRepository {
    db: DatabaseConnection,
}

impl SurveyRepository {
    /// Creates a new survey repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a job together with its payment record.
    ///
    /// # Errors
    ///
    /// Returns an error if the client is missing or the fee is negative.
    pub async fn create_job(&self, input: CreateJobInput) -> Result<JobDetails, SurveyRepoError> {
        if input.fee.is_sign_negative() {
            return Err(SurveyRepoError::InvalidFee("fee must not be negative".into()));
        }

        let txn = self.db.begin().await?;

        clients::Entity::find_by_id(input.client_id)
            .one(&txn)
            .await?
            .ok_or(SurveyRepoError::ClientNotFound(input.client_id))?;

        let now = Utc::now().into();
        let job = service_jobs::ActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(input.client_id),
            description: Set(input.description),
            title_name: Set(input.title_name),
            title_number: Set(input.title_number),
            fee: Set(input.fee),
            status: Set(JobStatus::Ongoing),
            brought_by: Set(input.brought_by),
            recorded_by: Set(input.recorded_by.clone()),
            created_at: Set(now),
        };
        let job = job.insert(&txn).await?;

        let payment = service_payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            job_id: Set(job.id),
            fee: Set(input.fee),
            amount_paid: Set(Decimal::ZERO),
            balance: Set(input.fee),
            status: Set(ServicePaymentStatus::Unpaid),
            updated_at: Set(now),
        };
        let payment = payment.insert(&txn).await?;

        activity_log::append(
            &txn,
            &input.recorded_by,
            "survey.create_job",
            Some(format!("job {} fee {}", job.id, input.fee)),
        )
        .await?;

        txn.commit().await?;
        debug!(job_id = %job.id, "Survey job registered");
        Ok(JobDetails {
            job,
            payment,
            dispatch: None,
        })
    }

    /// Records a payment against a job's fee.
    ///
    /// # Errors
    ///
    /// Returns an error if the job cannot accept payments, the payment
    /// is non-positive, or it would exceed the remaining balance.
    pub async fn record_payment(
        &self,
        job_id: Uuid,
        amount: Decimal,
        payment_type: &str,
        recorded_by: &str,
    ) -> Result<service_payments::Model, SurveyRepoError> {
        let txn = self.db.begin().await?;

        let job = Self::load_job(&txn, job_id).await?;
        let payment = service_payments::Entity::find()
            .filter(service_payments::Column::JobId.eq(job_id))
            .one(&txn)
            .await?
            .ok_or(SurveyRepoError::PaymentRecordMissing(job_id))?;

        let outcome = SurveyService::apply_payment(
            job.status.clone().into(),
            payment.fee,
            payment.amount_paid,
            payment.balance,
            amount,
        )?;

        let payment_id = payment.id;
        let mut model: service_payments::ActiveModel = payment.into();
        model.amount_paid = Set(outcome.new_amount_paid);
        model.balance = Set(outcome.new_balance);
        model.status = Set(outcome.new_status.into());
        model.updated_at = Set(Utc::now().into());
        let updated = model.update(&txn).await?;

        let history = service_payment_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            service_payment_id: Set(payment_id),
            amount: Set(amount),
            payment_type: Set(payment_type.to_owned()),
            recorded_at: Set(Utc::now().into()),
        };
        history.insert(&txn).await?;

        activity_log::append(
            &txn,
            recorded_by,
            "survey.payment",
            Some(format!("job {job_id} amount {amount}")),
        )
        .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Marks a job's field work finished.
    ///
    /// # Errors
    ///
    /// Returns an error unless the job is `Ongoing`.
    pub async fn complete_job(
        &self,
        job_id: Uuid,
        actor: &str,
    ) -> Result<service_jobs::Model, SurveyRepoError> {
        self.transition(job_id, actor, "survey.complete", SurveyService::complete)
            .await
    }

    /// Abandons a job.
    ///
    /// # Errors
    ///
    /// Returns an error unless the job is `Ongoing`.
    pub async fn cancel_job(
        &self,
        job_id: Uuid,
        actor: &str,
    ) -> Result<service_jobs::Model, SurveyRepoError> {
        self.transition(job_id, actor, "survey.cancel", SurveyService::cancel)
            .await
    }

    /// Hands a completed job's documents over and records who took them.
    ///
    /// # Errors
    ///
    /// Returns an error unless the job is `Completed`.
    pub async fn dispatch_job(
        &self,
        job_id: Uuid,
        input: DispatchJobInput,
        actor: &str,
    ) -> Result<JobDetails, SurveyRepoError> {
        let txn = self.db.begin().await?;

        let job = Self::load_job(&txn, job_id).await?;
        let next = SurveyService::dispatch(job.status.clone().into())?;

        let mut model: service_jobs::ActiveModel = job.into();
        model.status = Set(next.into());
        let job = model.update(&txn).await?;

        let dispatch = service_dispatches::ActiveModel {
            id: Set(Uuid::new_v4()),
            job_id: Set(job_id),
            reason: Set(input.reason),
            collected_by: Set(input.collected_by),
            collector_phone: Set(input.collector_phone),
            dispatched_at: Set(Utc::now().into()),
        };
        let dispatch = dispatch.insert(&txn).await?;

        let payment = service_payments::Entity::find()
            .filter(service_payments::Column::JobId.eq(job_id))
            .one(&txn)
            .await?
            .ok_or(SurveyRepoError::PaymentRecordMissing(job_id))?;

        activity_log::append(&txn, actor, "survey.dispatch", Some(format!("job {job_id}")))
            .await?;

        txn.commit().await?;
        Ok(JobDetails {
            job,
            payment,
            dispatch: Some(dispatch),
        })
    }

    /// Fetches a job with its payment record and dispatch.
    ///
    /// # Errors
    ///
    /// Returns `JobNotFound` if no such job exists.
    pub async fn get_job(&self, job_id: Uuid) -> Result<JobDetails, SurveyRepoError> {
        let job = service_jobs::Entity::find_by_id(job_id)
            .one(&self.db)
            .await?
            .ok_or(SurveyRepoError::JobNotFound(job_id))?;

        let payment = service_payments::Entity::find()
            .filter(service_payments::Column::JobId.eq(job_id))
            .one(&self.db)
            .await?
            .ok_or(SurveyRepoError::PaymentRecordMissing(job_id))?;

        let dispatch = service_dispatches::Entity::find()
            .filter(service_dispatches::Column::JobId.eq(job_id))
            .one(&self.db)
            .await?;

        Ok(JobDetails {
            job,
            payment,
            dispatch,
        })
    }

    /// Lists jobs with optional status filter and search, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_jobs(
        &self,
        status: Option<JobStatus>,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<(Vec<service_jobs::Model>, u64), SurveyRepoError> {
        let mut query = service_jobs::Entity::find();
        if let Some(status) = status {
            query = query.filter(service_jobs::Column::Status.eq(status));
        }
        if let Some(search) = &search {
            query = query.filter(
                Condition::any()
                    .add(service_jobs::Column::Description.contains(search))
                    .add(service_jobs::Column::TitleNumber.contains(search)),
            );
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(service_jobs::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Returns a job's payment history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `JobNotFound` if no such job exists.
    pub async fn payment_history(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<service_payment_history::Model>, SurveyRepoError> {
        let payment = service_payments::Entity::find()
            .filter(service_payments::Column::JobId.eq(job_id))
            .one(&self.db)
            .await?
            .ok_or(SurveyRepoError::JobNotFound(job_id))?;

        let rows = service_payment_history::Entity::find()
            .filter(service_payment_history::Column::ServicePaymentId.eq(payment.id))
            .order_by_asc(service_payment_history::Column::RecordedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Counts jobs per status, for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if a count query fails.
    pub async fn status_counts(&self) -> Result<JobStatusCounts, SurveyRepoError> {
        let count_for = |status: JobStatus| {
            service_jobs::Entity::find()
                .filter(service_jobs::Column::Status.eq(status))
                .count(&self.db)
        };

        Ok(JobStatusCounts {
            ongoing: count_for(JobStatus::Ongoing).await?,
            completed: count_for(JobStatus::Completed).await?,
            dispatched: count_for(JobStatus::Dispatched).await?,
            cancelled: count_for(JobStatus::Cancelled).await?,
        })
    }

    async fn transition(
        &self,
        job_id: Uuid,
        actor: &str,
        action: &str,
        step: impl Fn(CoreJobStatus) -> Result<CoreJobStatus, SurveyError>,
    ) -> Result<service_jobs::Model, SurveyRepoError> {
        let txn = self.db.begin().await?;

        let job = Self::load_job(&txn, job_id).await?;
        let next = step(job.status.clone().into())?;

        let mut model: service_jobs::ActiveModel = job.into();
        model.status = Set(next.into());
        let updated = model.update(&txn).await?;

        activity_log::append(&txn, actor, action, Some(format!("job {job_id}"))).await?;

        txn.commit().await?;
        Ok(updated)
    }

    async fn load_job(
        txn: &DatabaseTransaction,
        id: Uuid,
    ) -> Result<service_jobs::Model, SurveyRepoError> {
        service_jobs::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or(SurveyRepoError::JobNotFound(id))
    }
}
