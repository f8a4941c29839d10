//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Every read-check-write sequence runs inside a single
//! database transaction so a second process on the same database can
//! never observe a half-applied mutation.

pub mod activity_log;
pub mod agent;
pub mod client;
pub mod payment_plan;
pub mod property;
pub mod sale;
pub mod subdivision;
pub mod survey;
pub mod transfer;

#[cfg(test)]
mod sale_integration_tests;
#[cfg(test)]
mod subdivision_integration_tests;

pub use activity_log::{ActivityLogFilter, ActivityLogRepository};
pub use agent::{AgentError, AgentRepository};
pub use client::{AdmissionOutcome, AdmitClientInput, ClientError, ClientRepository, UpdateClientInput};
pub use payment_plan::{CreatePaymentPlanInput, PaymentPlanError, PaymentPlanRepository, UpdatePaymentPlanInput};
pub use property::{
    CreatePropertyInput, PropertyError, PropertyFilter, PropertyRepository, StatusCounts,
    UpdatePropertyInput,
};
pub use sale::{
    RecordCashSaleInput, RecordInstallmentSaleInput, SaleDetails, SaleError, SaleFilter,
    SaleRepository,
};
pub use subdivision::{ProposalWithParent, ProposeLotInput, SubdivisionRepoError, SubdivisionRepository};
pub use survey::{
    CreateJobInput, DispatchJobInput, JobDetails, JobStatusCounts, SurveyRepoError,
    SurveyRepository,
};
pub use transfer::{ExecuteTransferInput, TransferError, TransferRepository};
