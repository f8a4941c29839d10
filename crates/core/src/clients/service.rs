//! Client admission rules.

use uuid::Uuid;

use super::types::{AdmissionPlan, ClientStatus};

/// Stateless service deciding how a client admission proceeds.
pub struct ClientService;

impl ClientService {
    /// Decide what to do with an admission for a telephone number, given
    /// the record (if any) currently holding that number.
    #[must_use]
    pub fn plan_admission(existing: Option<(Uuid, ClientStatus)>) -> AdmissionPlan {
        match existing {
            None => AdmissionPlan::Create,
            Some((client_id, ClientStatus::Inactive)) => AdmissionPlan::Reactivate { client_id },
            Some((client_id, ClientStatus::Active)) => AdmissionPlan::UseExisting { client_id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_number_creates() {
        assert_eq!(ClientService::plan_admission(None), AdmissionPlan::Create);
    }

    #[test]
    fn test_inactive_record_reactivates_instead_of_duplicating() {
        let id = Uuid::new_v4();
        assert_eq!(
            ClientService::plan_admission(Some((id, ClientStatus::Inactive))),
            AdmissionPlan::Reactivate { client_id: id }
        );
    }

    #[test]
    fn test_active_record_is_reused() {
        let id = Uuid::new_v4();
        assert_eq!(
            ClientService::plan_admission(Some((id, ClientStatus::Active))),
            AdmissionPlan::UseExisting { client_id: id }
        );
    }
}
