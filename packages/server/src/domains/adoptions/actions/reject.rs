use tracing::info;

use crate::common::auth::Actor;
use crate::common::{AdoptionId, LifecycleError};
use crate::domains::adoptions::events::AdoptionEvent;
use crate::domains::adoptions::models::{Adoption, AdoptionStatus};
use crate::domains::pets::actions::record_status_change;
use crate::domains::pets::models::PetStatus;
use crate::kernel::{BaseShelterStore as _, PetStatusChange, ServerDeps};

use super::record_adoption_event;

/// Reject a requested or approved adoption.
///
/// Rejecting an approved adoption releases its reservation: the pet moves
/// PENDING -> AVAILABLE in the same transaction. A merely requested
/// adoption never reserved the pet, so the pet is left alone.
pub async fn reject_adoption(
    adoption_id: AdoptionId,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Adoption, LifecycleError> {
    let adoption = deps
        .store
        .find_adoption(adoption_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("adoption", adoption_id))?;

    if !matches!(
        adoption.status,
        AdoptionStatus::Requested | AdoptionStatus::Approved
    ) {
        return Err(LifecycleError::edge_not_permitted(
            "adoption",
            adoption.status,
            AdoptionStatus::Rejected,
        ));
    }

    if !actor.is_elevated() {
        return Err(LifecycleError::forbidden(
            "role ADMIN is required to reject an adoption",
        ));
    }

    let observed = adoption.status;
    let pet_change = if observed == AdoptionStatus::Approved {
        let pet = deps
            .store
            .find_pet(adoption.pet_id)
            .await?
            .ok_or_else(|| LifecycleError::not_found("pet", adoption.pet_id))?;
        // The reservation may already have been undone by an admin; only a
        // still-PENDING pet is released.
        (pet.status == PetStatus::Pending).then_some(PetStatusChange {
            pet_id: pet.id,
            expected: PetStatus::Pending,
            next: PetStatus::Available,
        })
    } else {
        None
    };

    let (updated, moved_pet) = deps
        .store
        .update_adoption_with_pet(adoption_id, observed, AdoptionStatus::Rejected, pet_change)
        .await?
        .ok_or_else(|| LifecycleError::stale_state("adoption", adoption_id, observed))?;

    info!(
        adoption_id = %adoption_id,
        pet_id = %updated.pet_id,
        actor = %actor,
        "adoption rejected"
    );

    if let Some(moved) = &moved_pet {
        record_status_change(moved, PetStatus::Pending, &Actor::System, Some("adoption rejected"), deps).await;
    }
    record_adoption_event(
        AdoptionEvent::Rejected {
            adoption_id,
            pet_id: updated.pet_id,
            actor_id: actor.actor_id(),
        },
        deps,
    )
    .await;

    Ok(updated)
}
