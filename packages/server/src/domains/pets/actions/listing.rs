//! Pet listing and descriptive edits.
//!
//! Listing creates the row in AVAILABLE; edits touch descriptive fields
//! only and are owner-scoped with the elevated override.

use tracing::{error, info};

use crate::common::auth::{authorize_owner, Actor};
use crate::common::{LifecycleError, PetId};
use crate::domains::pets::events::PetEvent;
use crate::domains::pets::models::{Pet, PetDetails};
use crate::kernel::{BaseAuditSink as _, BaseShelterStore as _, ServerDeps};

/// List a new pet. The actor becomes the current owner.
pub async fn create_pet(
    name: String,
    species: String,
    description: Option<String>,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Pet, LifecycleError> {
    let actor_id = actor
        .actor_id()
        .ok_or_else(|| LifecycleError::forbidden("a signed-in user is required to list a pet"))?;

    let pet = deps
        .store
        .insert_pet(&Pet::new(name, species, description, Some(actor_id)))
        .await?;

    info!(pet_id = %pet.id, owner = %actor_id, "pet listed");

    let event = PetEvent::Listed {
        pet_id: pet.id,
        owner_id: pet.current_owner_id,
    };
    if let Err(e) = deps.audit.append(event.to_record()).await {
        error!(error = %e, pet_id = %pet.id, "failed to append audit record for listing");
    }

    Ok(pet)
}

/// Edit descriptive fields. Never touches status.
pub async fn update_pet_details(
    pet_id: PetId,
    details: PetDetails,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Pet, LifecycleError> {
    let pet = deps
        .store
        .find_pet(pet_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("pet", pet_id))?;

    authorize_owner(&pet, actor)?;

    let updated = deps
        .store
        .update_pet_details(pet_id, &details)
        .await?
        .ok_or_else(|| LifecycleError::not_found("pet", pet_id))?;

    let event = PetEvent::DetailsUpdated {
        pet_id,
        actor_id: actor.actor_id(),
    };
    if let Err(e) = deps.audit.append(event.to_record()).await {
        error!(error = %e, pet_id = %pet_id, "failed to append audit record for details edit");
    }

    Ok(updated)
}
