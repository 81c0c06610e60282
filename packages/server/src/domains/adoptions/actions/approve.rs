use tracing::info;

use crate::common::auth::Actor;
use crate::common::{AdoptionId, LifecycleError};
use crate::domains::adoptions::events::AdoptionEvent;
use crate::domains::adoptions::models::{Adoption, AdoptionStatus};
use crate::domains::pets::actions::{check_transition, record_status_change};
use crate::domains::pets::models::PetStatus;
use crate::kernel::{BaseShelterStore as _, PetStatusChange, ServerDeps};

use super::record_adoption_event;

/// Approve a requested adoption, reserving the pet.
///
/// The adoption moves REQUESTED -> APPROVED and the pet AVAILABLE ->
/// PENDING in one storage transaction. A pet that is no longer AVAILABLE
/// (claimed by custody, or by a concurrently approved request) yields
/// `Conflict` and leaves the adoption untouched.
pub async fn approve_adoption(
    adoption_id: AdoptionId,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Adoption, LifecycleError> {
    let adoption = deps
        .store
        .find_adoption(adoption_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("adoption", adoption_id))?;

    if adoption.status != AdoptionStatus::Requested {
        return Err(LifecycleError::edge_not_permitted(
            "adoption",
            adoption.status,
            AdoptionStatus::Approved,
        ));
    }

    if !actor.is_elevated() {
        return Err(LifecycleError::forbidden(
            "role ADMIN is required to approve an adoption",
        ));
    }

    let pet = deps
        .store
        .find_pet(adoption.pet_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("pet", adoption.pet_id))?;

    if pet.status != PetStatus::Available {
        return Err(LifecycleError::conflict(format!(
            "pet {} is no longer available: status is {}",
            pet.id, pet.status
        )));
    }

    // The workflow drives the pet edge as the system actor; the edge table
    // still applies.
    check_transition(&pet, PetStatus::Pending, &Actor::System)?;

    let (updated, moved_pet) = deps
        .store
        .update_adoption_with_pet(
            adoption_id,
            AdoptionStatus::Requested,
            AdoptionStatus::Approved,
            Some(PetStatusChange {
                pet_id: pet.id,
                expected: PetStatus::Available,
                next: PetStatus::Pending,
            }),
        )
        .await?
        .ok_or_else(|| LifecycleError::stale_state("adoption", adoption_id, AdoptionStatus::Requested))?;

    info!(
        adoption_id = %adoption_id,
        pet_id = %updated.pet_id,
        actor = %actor,
        "adoption approved"
    );

    if let Some(moved) = &moved_pet {
        record_status_change(moved, PetStatus::Available, &Actor::System, Some("adoption approved"), deps).await;
    }
    record_adoption_event(
        AdoptionEvent::Approved {
            adoption_id,
            pet_id: updated.pet_id,
            actor_id: actor.actor_id(),
        },
        deps,
    )
    .await;

    Ok(updated)
}
