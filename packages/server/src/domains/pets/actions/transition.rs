//! Pet status transition action.
//!
//! The sequence is fixed: existence, then policy, then authorization, then
//! the conditioned write, then a best-effort audit append. Callers never
//! see `Forbidden` for an entity that does not exist.

use tracing::{error, info};

use crate::common::auth::{authorize_transition, Actor};
use crate::common::LifecycleError;
use crate::domains::pets::events::PetEvent;
use crate::domains::pets::machines;
use crate::domains::pets::models::{Pet, PetStatus};
use crate::kernel::{BaseAuditSink as _, BaseShelterStore as _, ServerDeps};

/// Policy and authorization for a requested edge, given an already-loaded
/// pet. Shared with the workflow coordinators, which run the same checks
/// before their paired transactional writes.
pub(crate) fn check_transition(
    pet: &Pet,
    requested: PetStatus,
    actor: &Actor,
) -> Result<(), LifecycleError> {
    if pet.status == requested {
        return Err(LifecycleError::already_in_state("pet", requested));
    }

    let check = machines::evaluate(pet.status, requested);
    if !check.legal {
        return Err(LifecycleError::edge_not_permitted("pet", pet.status, requested));
    }

    authorize_transition(pet, requested, check, actor)
}

/// Append the status-change audit record. Best-effort: the transition has
/// already committed, so a sink failure is logged and swallowed.
pub(crate) async fn record_status_change(
    pet: &Pet,
    from: PetStatus,
    actor: &Actor,
    reason: Option<&str>,
    deps: &ServerDeps,
) {
    let event = PetEvent::StatusChanged {
        pet_id: pet.id,
        from,
        to: pet.status,
        actor_id: actor.actor_id(),
        reason: reason.map(str::to_string),
    };

    if let Err(e) = deps.audit.append(event.to_record()).await {
        error!(
            error = %e,
            pet_id = %pet.id,
            "failed to append audit record for committed transition"
        );
    }
}

/// Move a pet to `requested` on behalf of `actor`.
pub async fn transition_pet(
    pet_id: crate::common::PetId,
    requested: PetStatus,
    actor: &Actor,
    reason: Option<String>,
    deps: &ServerDeps,
) -> Result<Pet, LifecycleError> {
    let pet = deps
        .store
        .find_pet(pet_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("pet", pet_id))?;

    check_transition(&pet, requested, actor)?;

    let observed = pet.status;
    let updated = deps
        .store
        .update_pet_status(pet_id, observed, requested)
        .await?
        .ok_or_else(|| LifecycleError::stale_state("pet", pet_id, observed))?;

    info!(
        pet_id = %pet_id,
        from = %observed,
        to = %requested,
        actor = %actor,
        "pet status transitioned"
    );

    record_status_change(&updated, observed, actor, reason.as_deref(), deps).await;

    Ok(updated)
}

/// Workflow entry point: runs as the system actor. Role checks do not
/// apply, the edge table still does.
pub async fn transition_pet_internal(
    pet_id: crate::common::PetId,
    requested: PetStatus,
    reason: Option<String>,
    deps: &ServerDeps,
) -> Result<Pet, LifecycleError> {
    transition_pet(pet_id, requested, &Actor::System, reason, deps).await
}
