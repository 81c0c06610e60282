use tracing::info;

use crate::common::auth::Actor;
use crate::common::{AdoptionId, LifecycleError};
use crate::domains::adoptions::events::AdoptionEvent;
use crate::domains::adoptions::models::{Adoption, AdoptionStatus};
use crate::domains::escrow::models::EscrowStatus;
use crate::domains::pets::actions::{check_transition, record_status_change};
use crate::domains::pets::models::PetStatus;
use crate::kernel::{BaseShelterStore as _, PetStatusChange, ServerDeps};

use super::record_adoption_event;

/// Finalize an approved adoption.
///
/// When the adoption carries an escrow, the escrow must already be
/// RELEASED; otherwise the call fails with `Conflict` and can be retried
/// once the funds clear. The adoption moves APPROVED -> COMPLETED and the
/// pet PENDING -> ADOPTED in one storage transaction.
pub async fn complete_adoption(
    adoption_id: AdoptionId,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Adoption, LifecycleError> {
    let adoption = deps
        .store
        .find_adoption(adoption_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("adoption", adoption_id))?;

    if adoption.status != AdoptionStatus::Approved {
        return Err(LifecycleError::edge_not_permitted(
            "adoption",
            adoption.status,
            AdoptionStatus::Completed,
        ));
    }

    if !actor.is_elevated() {
        return Err(LifecycleError::forbidden(
            "role ADMIN is required to complete an adoption",
        ));
    }

    if let Some(escrow_id) = adoption.escrow_id {
        let escrow = deps
            .store
            .find_escrow(escrow_id)
            .await?
            .ok_or_else(|| LifecycleError::not_found("escrow", escrow_id))?;
        if escrow.status != EscrowStatus::Released {
            return Err(LifecycleError::conflict(format!(
                "escrow {escrow_id} must be RELEASED before completion: status is {}",
                escrow.status
            )));
        }
    }

    let pet = deps
        .store
        .find_pet(adoption.pet_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("pet", adoption.pet_id))?;

    if pet.status != PetStatus::Pending {
        return Err(LifecycleError::conflict(format!(
            "pet {} is not reserved for this adoption: status is {}",
            pet.id, pet.status
        )));
    }

    check_transition(&pet, PetStatus::Adopted, &Actor::System)?;

    let (updated, moved_pet) = deps
        .store
        .update_adoption_with_pet(
            adoption_id,
            AdoptionStatus::Approved,
            AdoptionStatus::Completed,
            Some(PetStatusChange {
                pet_id: pet.id,
                expected: PetStatus::Pending,
                next: PetStatus::Adopted,
            }),
        )
        .await?
        .ok_or_else(|| LifecycleError::stale_state("adoption", adoption_id, AdoptionStatus::Approved))?;

    info!(
        adoption_id = %adoption_id,
        pet_id = %updated.pet_id,
        adopter = %updated.adopter_id,
        actor = %actor,
        "adoption completed"
    );

    if let Some(moved) = &moved_pet {
        record_status_change(moved, PetStatus::Pending, &Actor::System, Some("adoption completed"), deps).await;
    }
    record_adoption_event(
        AdoptionEvent::Completed {
            adoption_id,
            pet_id: updated.pet_id,
            actor_id: actor.actor_id(),
        },
        deps,
    )
    .await;

    Ok(updated)
}
