//! Client admission and soft-delete rules.

pub mod service;
pub mod types;

pub use service::ClientService;
pub use types::{AdmissionPlan, ClientStatus};
