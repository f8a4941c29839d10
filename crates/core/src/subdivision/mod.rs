//! Block-to-lot subdivision workflow.
//!
//! Size conservation is the governing invariant: every acre carved out of a
//! block at proposal time is either transferred permanently to a confirmed
//! lot or returned to the block on rejection. The repository layer executes
//! each plan produced here inside a single database transaction.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;
#[cfg(test)]
mod service_props;

pub use error::SubdivisionError;
pub use service::SubdivisionService;
pub use types::{LotProposalStatus, ProposalPlan, RejectionPlan};
