//! Active enums mirroring the Postgres enum types.
//!
//! Each has a lossless conversion to and from its `terralot-core`
//! counterpart so the repositories can hand rows straight to the pure
//! transition logic.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use terralot_core::clients::ClientStatus as CoreClientStatus;
use terralot_core::inventory::{
    PropertyKind as CorePropertyKind, PropertyStatus as CorePropertyStatus,
};
use terralot_core::sales::{
    InstallmentStatus as CoreInstallmentStatus, PaymentMode as CorePaymentMode,
};
use terralot_core::subdivision::LotProposalStatus as CoreLotProposalStatus;
use terralot_core::survey::{
    JobStatus as CoreJobStatus, ServicePaymentStatus as CoreServicePaymentStatus,
};

/// Postgres `property_kind`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "property_kind")]
pub enum PropertyKind {
    /// Parcel open to subdivision.
    #[sea_orm(string_value = "block")]
    Block,
    /// Parcel carved from a block.
    #[sea_orm(string_value = "lot")]
    Lot,
}

/// Postgres `property_status`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "property_status")]
pub enum PropertyStatus {
    /// Open to booking, sale, or subdivision.
    #[sea_orm(string_value = "available")]
    Available,
    /// Reserved by a client.
    #[sea_orm(string_value = "booked")]
    Booked,
    /// Sold - terminal.
    #[sea_orm(string_value = "sold")]
    Sold,
    /// Fully carved into proposed lots.
    #[sea_orm(string_value = "unavailable")]
    Unavailable,
}

/// Postgres `lot_proposal_status`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "lot_proposal_status")]
pub enum LotProposalStatus {
    /// Awaiting a decision.
    #[sea_orm(string_value = "proposed")]
    Proposed,
    /// Converted to a property row.
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Size returned to the parent block.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Postgres `client_status`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "client_status")]
pub enum ClientStatus {
    /// Live record.
    #[sea_orm(string_value = "active")]
    Active,
    /// Soft-deleted.
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

/// Postgres `payment_mode`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_mode")]
pub enum PaymentMode {
    /// Paid in full or via free-form balance payments.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Deposit plus a monthly schedule.
    #[sea_orm(string_value = "installments")]
    Installments,
}

/// Postgres `installment_status`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "installment_status")]
pub enum InstallmentStatus {
    /// Nothing applied yet.
    #[sea_orm(string_value = "outstanding")]
    Outstanding,
    /// Partially applied.
    #[sea_orm(string_value = "partially_paid")]
    PartiallyPaid,
    /// Fully settled.
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Postgres `job_status`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "job_status")]
pub enum JobStatus {
    /// Work in progress.
    #[sea_orm(string_value = "ongoing")]
    Ongoing,
    /// Deliverables ready.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Handed over - terminal.
    #[sea_orm(string_value = "dispatched")]
    Dispatched,
    /// Abandoned - terminal.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Postgres `service_payment_status`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "service_payment_status"
)]
pub enum ServicePaymentStatus {
    /// Nothing received.
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
    /// Some amount received.
    #[sea_orm(string_value = "partially_paid")]
    PartiallyPaid,
    /// Fee fully received.
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Postgres `agent_status`.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "agent_status")]
pub enum AgentStatus {
    /// Currently introducing clients.
    #[sea_orm(string_value = "active")]
    Active,
    /// No longer engaged.
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

// ---------------------------------------------------------------------------
// Conversions to/from core enums
// ---------------------------------------------------------------------------

impl From<CorePropertyKind> for PropertyKind {
    fn from(value: CorePropertyKind) -> Self {
        match value {
            CorePropertyKind::Block => Self::Block,
            CorePropertyKind::Lot => Self::Lot,
        }
    }
}

impl From<PropertyKind> for CorePropertyKind {
    fn from(value: PropertyKind) -> Self {
        match value {
            PropertyKind::Block => Self::Block,
            PropertyKind::Lot => Self::Lot,
        }
    }
}

impl From<CorePropertyStatus> for PropertyStatus {
    fn from(value: CorePropertyStatus) -> Self {
        match value {
            CorePropertyStatus::Available => Self::Available,
            CorePropertyStatus::Booked => Self::Booked,
            CorePropertyStatus::Sold => Self::Sold,
            CorePropertyStatus::Unavailable => Self::Unavailable,
        }
    }
}

impl From<PropertyStatus> for CorePropertyStatus {
    fn from(value: PropertyStatus) -> Self {
        match value {
            PropertyStatus::Available => Self::Available,
            PropertyStatus::Booked => Self::Booked,
            PropertyStatus::Sold => Self::Sold,
            PropertyStatus::Unavailable => Self::Unavailable,
        }
    }
}

impl From<CoreLotProposalStatus> for LotProposalStatus {
    fn from(value: CoreLotProposalStatus) -> Self {
        match value {
            CoreLotProposalStatus::Proposed => Self::Proposed,
            CoreLotProposalStatus::Confirmed => Self::Confirmed,
            CoreLotProposalStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<LotProposalStatus> for CoreLotProposalStatus {
    fn from(value: LotProposalStatus) -> Self {
        match value {
            LotProposalStatus::Proposed => Self::Proposed,
            LotProposalStatus::Confirmed => Self::Confirmed,
            LotProposalStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<CoreClientStatus> for ClientStatus {
    fn from(value: CoreClientStatus) -> Self {
        match value {
            CoreClientStatus::Active => Self::Active,
            CoreClientStatus::Inactive => Self::Inactive,
        }
    }
}

impl From<ClientStatus> for CoreClientStatus {
    fn from(value: ClientStatus) -> Self {
        match value {
            ClientStatus::Active => Self::Active,
            ClientStatus::Inactive => Self::Inactive,
        }
    }
}

impl From<CorePaymentMode> for PaymentMode {
    fn from(value: CorePaymentMode) -> Self {
        match value {
            CorePaymentMode::Cash => Self::Cash,
            CorePaymentMode::Installments => Self::Installments,
        }
    }
}

impl From<PaymentMode> for CorePaymentMode {
    fn from(value: PaymentMode) -> Self {
        match value {
            PaymentMode::Cash => Self::Cash,
            PaymentMode::Installments => Self::Installments,
        }
    }
}

impl From<CoreInstallmentStatus> for InstallmentStatus {
    fn from(value: CoreInstallmentStatus) -> Self {
        match value {
            CoreInstallmentStatus::Outstanding => Self::Outstanding,
            CoreInstallmentStatus::PartiallyPaid => Self::PartiallyPaid,
            CoreInstallmentStatus::Paid => Self::Paid,
        }
    }
}

impl From<InstallmentStatus> for CoreInstallmentStatus {
    fn from(value: InstallmentStatus) -> Self {
        match value {
            InstallmentStatus::Outstanding => Self::Outstanding,
            InstallmentStatus::PartiallyPaid => Self::PartiallyPaid,
            InstallmentStatus::Paid => Self::Paid,
        }
    }
}

impl From<CoreJobStatus> for JobStatus {
    fn from(value: CoreJobStatus) -> Self {
        match value {
            CoreJobStatus::Ongoing => Self::Ongoing,
            CoreJobStatus::Completed => Self::Completed,
            CoreJobStatus::Dispatched => Self::Dispatched,
            CoreJobStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<JobStatus> for CoreJobStatus {
    fn from(value: JobStatus) -> Self {
        match value {
            JobStatus::Ongoing => Self::Ongoing,
            JobStatus::Completed => Self::Completed,
            JobStatus::Dispatched => Self::Dispatched,
            JobStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<CoreServicePaymentStatus> for ServicePaymentStatus {
    fn from(value: CoreServicePaymentStatus) -> Self {
        match value {
            CoreServicePaymentStatus::Unpaid => Self::Unpaid,
            CoreServicePaymentStatus::PartiallyPaid => Self::PartiallyPaid,
            CoreServicePaymentStatus::Paid => Self::Paid,
        }
    }
}

impl From<ServicePaymentStatus> for CoreServicePaymentStatus {
    fn from(value: ServicePaymentStatus) -> Self {
        match value {
            ServicePaymentStatus::Unpaid => Self::Unpaid,
            ServicePaymentStatus::PartiallyPaid => Self::PartiallyPaid,
            ServicePaymentStatus::Paid => Self::Paid,
        }
    }
}
