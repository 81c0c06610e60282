use rust_decimal::Decimal;
use tracing::info;

use crate::common::auth::{Actor, Role};
use crate::common::{LifecycleError, PetId};
use crate::domains::custody::events::CustodyEvent;
use crate::domains::custody::models::Custody;
use crate::domains::escrow::models::Escrow;
use crate::domains::pets::actions::{check_transition, record_status_change};
use crate::domains::pets::models::PetStatus;
use crate::kernel::{BaseShelterStore as _, PetStatusChange, ServerDeps};

use super::record_custody_event;

/// Open a custody agreement, claiming the pet.
///
/// Only a shelter or an admin may take custody; the actor becomes the
/// holder. The pet moves AVAILABLE -> IN_CUSTODY in the same transaction
/// that inserts the custody row. An optional escrow (a care deposit) is
/// created in CREATED state with the holder as payer.
pub async fn start_custody(
    pet_id: PetId,
    escrow_amount: Option<Decimal>,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Custody, LifecycleError> {
    let holder_id = actor.actor_id().ok_or_else(|| {
        LifecycleError::forbidden("a signed-in user is required to start custody")
    })?;

    let pet = deps
        .store
        .find_pet(pet_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("pet", pet_id))?;

    // Legality before authorization: an impossible edge reports as such
    // even to an under-privileged caller.
    check_transition(&pet, PetStatus::InCustody, &Actor::System)?;

    if !matches!(actor.role(), Some(Role::Shelter) | Some(Role::Admin)) {
        return Err(LifecycleError::forbidden(
            "role SHELTER or ADMIN is required to start custody",
        ));
    }

    let escrow_id = match escrow_amount {
        Some(amount) => {
            let escrow = deps
                .store
                .insert_escrow(&Escrow::new(amount, Some(holder_id)))
                .await?;
            Some(escrow.id)
        }
        None => None,
    };

    let (custody, moved_pet) = deps
        .store
        .insert_custody_with_pet(
            &Custody::new(pet_id, holder_id, escrow_id),
            PetStatusChange {
                pet_id,
                expected: PetStatus::Available,
                next: PetStatus::InCustody,
            },
        )
        .await?
        .ok_or_else(|| LifecycleError::stale_state("pet", pet_id, PetStatus::Available))?;

    info!(
        custody_id = %custody.id,
        pet_id = %pet_id,
        holder = %holder_id,
        "custody started"
    );

    record_status_change(&moved_pet, PetStatus::Available, &Actor::System, Some("custody started"), deps).await;
    record_custody_event(
        CustodyEvent::Started {
            custody_id: custody.id,
            pet_id,
            holder_id,
        },
        deps,
    )
    .await;

    Ok(custody)
}
