//! Subdivision repository.
//!
//! Executes the plans produced by `terralot_core::subdivision` inside
//! single database transactions: the size movement between a block and
//! its proposed lots is atomic, so no crash or concurrent writer can
//! leave acreage unaccounted for.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use terralot_core::subdivision::{SubdivisionError, SubdivisionService};
use terralot_shared::types::{LandSize, PageRequest};
use terralot_shared::AppError;

use crate::entities::sea_orm_active_enums::{LotProposalStatus, PropertyKind, PropertyStatus};
use crate::entities::{properties, proposed_lots};
use crate::repositories::activity_log;

/// Error types for subdivision operations.
#[derive(Debug, thiserror::Error)]
pub enum SubdivisionRepoError {
    /// Proposal not found.
    #[error("Lot proposal not found: {0}")]
    ProposalNotFound(Uuid),

    /// Parent block not found.
    #[error("Parent block not found: {0}")]
    ParentNotFound(Uuid),

    /// A property already carries the proposal's deed number, so
    /// finalizing would create a duplicate.
    #[error("Title deed number already registered: {0}")]
    DuplicateTitleDeed(String),

    /// Workflow rule violation.
    #[error(transparent)]
    Workflow(#[from] SubdivisionError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SubdivisionRepoError> for AppError {
    fn from(err: SubdivisionRepoError) -> Self {
        match err {
            SubdivisionRepoError::ProposalNotFound(_) | SubdivisionRepoError::ParentNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            SubdivisionRepoError::DuplicateTitleDeed(_) => Self::Conflict(err.to_string()),
            SubdivisionRepoError::Workflow(_) => Self::BusinessRule(err.to_string()),
            SubdivisionRepoError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for proposing a new lot carved from a block.
#[derive(Debug, Clone)]
pub struct ProposeLotInput {
    /// The block to carve from.
    pub parent_block_id: Uuid,
    /// Size of the new lot, in acres.
    pub size: Decimal,
    /// Location of the lot.
    pub location: String,
    /// Surveyor who marked the lot, if any.
    pub surveyor_name: Option<String>,
    /// Deed number the lot will carry once confirmed.
    pub title_deed_number: String,
    /// Asking price for the lot.
    pub price: Decimal,
    /// Staff member proposing the lot.
    pub created_by: String,
}

/// A proposal joined with its parent block's deed number.
#[derive(Debug, Clone)]
pub struct ProposalWithParent {
    /// The proposal row.
    pub proposal: proposed_lots::Model,
    /// Deed number of the parent block, if the block still exists.
    pub parent_deed: Option<String>,
}

/// Subdivision repository for proposal lifecycle operations.
#[derive(Debug, Clone)]
pub struct SubdivisionRepository {
    db: DatabaseConnection,
}

impl SubdivisionRepository {
    /// Creates a new subdivision repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Proposes a new lot, deducting its size from the parent block
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent is missing, is not an available
    /// block, or cannot spare the requested size.
    pub async fn propose_lot(
        &self,
        input: ProposeLotInput,
    ) -> Result<proposed_lots::Model, SubdivisionRepoError> {
        let txn = self.db.begin().await?;

        let parent = properties::Entity::find_by_id(input.parent_block_id)
            .one(&txn)
            .await?
            .ok_or(SubdivisionRepoError::ParentNotFound(input.parent_block_id))?;

        let plan = SubdivisionService::plan_proposal(
            parent.kind.clone().into(),
            parent.status.clone().into(),
            LandSize::new(parent.size),
            LandSize::new(input.size),
        )?;

        let mut parent_model: properties::ActiveModel = parent.into();
        parent_model.size = Set(plan.parent_new_size.acres());
        parent_model.status = Set(plan.parent_new_status.into());
        parent_model.updated_at = Set(Utc::now().into());
        parent_model.update(&txn).await?;

        let lot = proposed_lots::ActiveModel {
            id: Set(Uuid::new_v4()),
            parent_block_id: Set(input.parent_block_id),
            size: Set(input.size),
            location: Set(input.location),
            surveyor_name: Set(input.surveyor_name),
            title_deed_number: Set(input.title_deed_number.clone()),
            price: Set(input.price),
            status: Set(LotProposalStatus::Proposed),
            created_by: Set(input.created_by.clone()),
            created_at: Set(Utc::now().into()),
            decided_at: Set(None),
        };
        let created = lot.insert(&txn).await?;

        activity_log::append(
            &txn,
            &input.created_by,
            "subdivision.propose",
            Some(format!(
                "lot {} of {} acres from block {}",
                input.title_deed_number, input.size, input.parent_block_id
            )),
        )
        .await?;

        txn.commit().await?;
        debug!(
            proposal_id = %created.id,
            parent_block_id = %created.parent_block_id,
            "Lot proposed"
        );
        Ok(created)
    }

    /// Confirms a pending proposal and creates its property row, in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the proposal is not pending or its deed
    /// number has since been registered elsewhere.
    pub async fn finalize_lot(
        &self,
        proposal_id: Uuid,
        actor: &str,
    ) -> Result<properties::Model, SubdivisionRepoError> {
        let txn = self.db.begin().await?;

        let lot = Self::load_proposal(&txn, proposal_id).await?;
        SubdivisionService::plan_confirmation(lot.status.clone().into())?;

        let taken = properties::Entity::find()
            .filter(properties::Column::TitleDeedNumber.eq(&lot.title_deed_number))
            .one(&txn)
            .await?;
        if taken.is_some() {
            return Err(SubdivisionRepoError::DuplicateTitleDeed(
                lot.title_deed_number,
            ));
        }

        let now = Utc::now().into();
        let property = properties::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(PropertyKind::Lot),
            title_deed_number: Set(lot.title_deed_number.clone()),
            location: Set(lot.location.clone()),
            size: Set(lot.size),
            price: Set(lot.price),
            status: Set(PropertyStatus::Available),
            owner: Set(None),
            description: Set(lot.surveyor_name.clone().map(|s| format!("Surveyed by {s}"))),
            telephone_number: Set(None),
            email: Set(None),
            recorded_by: Set(actor.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = property.insert(&txn).await?;

        let mut lot_model: proposed_lots::ActiveModel = lot.into();
        lot_model.status = Set(LotProposalStatus::Confirmed);
        lot_model.decided_at = Set(Some(now));
        lot_model.update(&txn).await?;

        activity_log::append(
            &txn,
            actor,
            "subdivision.finalize",
            Some(format!("proposal {proposal_id}")),
        )
        .await?;

        txn.commit().await?;
        debug!(proposal_id = %proposal_id, property_id = %created.id, "Lot finalized");
        Ok(created)
    }

    /// Rejects a pending proposal, returning its size to the parent
    /// block in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the proposal is not pending or the parent
    /// block no longer exists.
    pub async fn reject_lot(
        &self,
        proposal_id: Uuid,
        actor: &str,
    ) -> Result<proposed_lots::Model, SubdivisionRepoError> {
        let txn = self.db.begin().await?;

        let lot = Self::load_proposal(&txn, proposal_id).await?;
        let parent = properties::Entity::find_by_id(lot.parent_block_id)
            .one(&txn)
            .await?
            .ok_or(SubdivisionRepoError::ParentNotFound(lot.parent_block_id))?;

        let plan = SubdivisionService::plan_rejection(
            lot.status.clone().into(),
            LandSize::new(parent.size),
            parent.status.clone().into(),
            LandSize::new(lot.size),
        )?;

        let mut parent_model: properties::ActiveModel = parent.into();
        parent_model.size = Set(plan.parent_new_size.acres());
        parent_model.status = Set(plan.parent_new_status.into());
        parent_model.updated_at = Set(Utc::now().into());
        parent_model.update(&txn).await?;

        let mut lot_model: proposed_lots::ActiveModel = lot.into();
        lot_model.status = Set(LotProposalStatus::Rejected);
        lot_model.decided_at = Set(Some(Utc::now().into()));
        let rejected = lot_model.update(&txn).await?;

        activity_log::append(
            &txn,
            actor,
            "subdivision.reject",
            Some(format!("proposal {proposal_id}")),
        )
        .await?;

        txn.commit().await?;
        debug!(proposal_id = %proposal_id, "Lot proposal rejected");
        Ok(rejected)
    }

    /// Lists proposals with their parent deed numbers, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_proposals(
        &self,
        status: Option<LotProposalStatus>,
        page: PageRequest,
    ) -> Result<(Vec<ProposalWithParent>, u64), SubdivisionRepoError> {
        let mut query = proposed_lots::Entity::find();
        if let Some(status) = status {
            query = query.filter(proposed_lots::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .find_also_related(properties::Entity)
            .order_by_desc(proposed_lots::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let proposals = rows
            .into_iter()
            .map(|(proposal, parent)| ProposalWithParent {
                proposal,
                parent_deed: parent.map(|p| p.title_deed_number),
            })
            .collect();

        Ok((proposals, total))
    }

    /// Lists pending proposals for one block.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_pending(
        &self,
        parent_block_id: Uuid,
    ) -> Result<Vec<proposed_lots::Model>, SubdivisionRepoError> {
        let rows = proposed_lots::Entity::find()
            .filter(proposed_lots::Column::ParentBlockId.eq(parent_block_id))
            .filter(proposed_lots::Column::Status.eq(LotProposalStatus::Proposed))
            .order_by_asc(proposed_lots::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn load_proposal(
        txn: &DatabaseTransaction,
        id: Uuid,
    ) -> Result<proposed_lots::Model, SubdivisionRepoError> {
        proposed_lots::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or(SubdivisionRepoError::ProposalNotFound(id))
    }
}
