use tracing::info;

use crate::common::auth::Actor;
use crate::common::{CustodyId, LifecycleError};
use crate::domains::custody::events::CustodyEvent;
use crate::domains::custody::models::{Custody, CustodyStatus};
use crate::domains::escrow::models::EscrowStatus;
use crate::domains::pets::actions::record_status_change;
use crate::domains::pets::models::PetStatus;
use crate::kernel::{BaseShelterStore as _, PetStatusChange, ServerDeps};

use super::record_custody_event;

/// Close a custody agreement, returning the pet.
///
/// Only the holder or an admin may end custody. A care-deposit escrow, if
/// attached, must be RELEASED first; until then the call fails with
/// `Conflict` and can be retried. The custody row moves ACTIVE -> COMPLETED
/// and the pet IN_CUSTODY -> AVAILABLE in one transaction.
pub async fn end_custody(
    custody_id: CustodyId,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Custody, LifecycleError> {
    let custody = deps
        .store
        .find_custody(custody_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("custody", custody_id))?;

    if custody.status != CustodyStatus::Active {
        return Err(LifecycleError::edge_not_permitted(
            "custody",
            custody.status,
            CustodyStatus::Completed,
        ));
    }

    let permitted = actor.is_elevated() || actor.actor_id() == Some(custody.holder_id);
    if !permitted {
        return Err(LifecycleError::forbidden(
            "only the custody holder or an admin may end custody",
        ));
    }

    if let Some(escrow_id) = custody.escrow_id {
        let escrow = deps
            .store
            .find_escrow(escrow_id)
            .await?
            .ok_or_else(|| LifecycleError::not_found("escrow", escrow_id))?;
        if escrow.status != EscrowStatus::Released {
            return Err(LifecycleError::conflict(format!(
                "escrow {escrow_id} must be RELEASED before custody ends: status is {}",
                escrow.status
            )));
        }
    }

    let pet = deps
        .store
        .find_pet(custody.pet_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("pet", custody.pet_id))?;

    // An admin may already have moved the pet; only a still-IN_CUSTODY pet
    // is returned to AVAILABLE.
    let pet_change = (pet.status == PetStatus::InCustody).then_some(PetStatusChange {
        pet_id: pet.id,
        expected: PetStatus::InCustody,
        next: PetStatus::Available,
    });

    let (updated, moved_pet) = deps
        .store
        .update_custody_with_pet(custody_id, CustodyStatus::Active, CustodyStatus::Completed, pet_change)
        .await?
        .ok_or_else(|| LifecycleError::stale_state("custody", custody_id, CustodyStatus::Active))?;

    info!(
        custody_id = %custody_id,
        pet_id = %updated.pet_id,
        actor = %actor,
        "custody ended"
    );

    if let Some(moved) = &moved_pet {
        record_status_change(moved, PetStatus::InCustody, &Actor::System, Some("custody ended"), deps).await;
    }
    record_custody_event(
        CustodyEvent::Ended {
            custody_id,
            pet_id: updated.pet_id,
            actor_id: actor.actor_id(),
        },
        deps,
    )
    .await;

    Ok(updated)
}
