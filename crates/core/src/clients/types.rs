//! Client domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client record status. Clients are never hard-deleted; deletion flips
/// the status to `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    /// Live record; telephone number is unique among active clients.
    Active,
    /// Soft-deleted; a later admission with the same number reactivates it.
    Inactive,
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// What admitting a client with a given telephone number should do.
///
/// Admission is a logical upsert: a matching inactive record is revived
/// (and renamed), a matching active record is reused, and only a number
/// never seen before creates a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionPlan {
    /// No record with this number; insert a new one.
    Create,
    /// An inactive record holds this number; flip it active and take the
    /// new name and email.
    Reactivate {
        /// The dormant record to revive.
        client_id: Uuid,
    },
    /// An active record already holds this number; reuse it.
    UseExisting {
        /// The live record.
        client_id: Uuid,
    },
}
