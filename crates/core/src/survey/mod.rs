//! Survey job lifecycle and payment ledger.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::SurveyError;
pub use service::SurveyService;
pub use types::{JobPaymentOutcome, JobStatus, ServicePaymentStatus};
