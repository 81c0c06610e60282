use rust_decimal::Decimal;
use tracing::info;

use crate::common::auth::Actor;
use crate::common::{LifecycleError, PetId};
use crate::domains::adoptions::events::AdoptionEvent;
use crate::domains::adoptions::models::Adoption;
use crate::domains::escrow::models::Escrow;
use crate::domains::pets::models::PetStatus;
use crate::kernel::{BaseShelterStore as _, ServerDeps};

use super::record_adoption_event;

/// File an adoption request for a pet.
///
/// Any signed-in visitor may request. The pet must still be open: AVAILABLE,
/// or PENDING (a queued second request awaiting the first one's outcome).
/// When `escrow_amount` is given, an escrow is created alongside in
/// `CREATED` state with the adopter as payer.
pub async fn request_adoption(
    pet_id: PetId,
    escrow_amount: Option<Decimal>,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Adoption, LifecycleError> {
    let adopter_id = actor.actor_id().ok_or_else(|| {
        LifecycleError::forbidden("a signed-in user is required to request an adoption")
    })?;

    let pet = deps
        .store
        .find_pet(pet_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("pet", pet_id))?;

    if !matches!(pet.status, PetStatus::Available | PetStatus::Pending) {
        return Err(LifecycleError::conflict(format!(
            "pet {pet_id} is not open for adoption: status is {}",
            pet.status
        )));
    }

    let escrow_id = match escrow_amount {
        Some(amount) => {
            let escrow = deps
                .store
                .insert_escrow(&Escrow::new(amount, Some(adopter_id)))
                .await?;
            Some(escrow.id)
        }
        None => None,
    };

    let adoption = deps
        .store
        .insert_adoption(&Adoption::new(
            pet_id,
            adopter_id,
            pet.current_owner_id,
            escrow_id,
        ))
        .await?;

    info!(
        adoption_id = %adoption.id,
        pet_id = %pet_id,
        adopter = %adopter_id,
        "adoption requested"
    );

    record_adoption_event(
        AdoptionEvent::Requested {
            adoption_id: adoption.id,
            pet_id,
            adopter_id,
        },
        deps,
    )
    .await;

    Ok(adoption)
}
