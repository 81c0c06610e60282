//! Escrow funding actions.
//!
//! Escrows hold value whose release gates workflow completion. Funding is
//! strictly sequential (CREATED -> FUNDED -> RELEASED) and every step is a
//! conditioned write, so two concurrent funding calls cannot both succeed.

use tracing::{error, info};

use crate::common::auth::Actor;
use crate::common::{EscrowId, LifecycleError};
use crate::domains::escrow::events::EscrowEvent;
use crate::domains::escrow::models::{Escrow, EscrowStatus};
use crate::kernel::{BaseAuditSink as _, BaseShelterStore as _, ServerDeps};

pub async fn get_escrow(
    escrow_id: EscrowId,
    deps: &ServerDeps,
) -> Result<Escrow, LifecycleError> {
    deps.store
        .find_escrow(escrow_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("escrow", escrow_id))
}

/// Mark an escrow as funded. Only the payer (or an admin) may fund.
pub async fn fund_escrow(
    escrow_id: EscrowId,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Escrow, LifecycleError> {
    let escrow = get_escrow(escrow_id, deps).await?;

    if escrow.status != EscrowStatus::Created {
        return Err(LifecycleError::edge_not_permitted(
            "escrow",
            escrow.status,
            EscrowStatus::Funded,
        ));
    }

    let permitted = actor.is_elevated()
        || (escrow.payer_id.is_some() && actor.actor_id() == escrow.payer_id);
    if !permitted {
        return Err(LifecycleError::forbidden(
            "only the escrow payer or an admin may fund an escrow",
        ));
    }

    let updated = deps
        .store
        .update_escrow_status(escrow_id, EscrowStatus::Created, EscrowStatus::Funded)
        .await?
        .ok_or_else(|| LifecycleError::stale_state("escrow", escrow_id, EscrowStatus::Created))?;

    info!(escrow_id = %escrow_id, actor = %actor, "escrow funded");
    record_escrow_event(
        EscrowEvent::Funded {
            escrow_id,
            actor_id: actor.actor_id(),
        },
        deps,
    )
    .await;

    Ok(updated)
}

/// Release a funded escrow. Admin only: release is the shelter-side
/// confirmation that the funds cleared.
pub async fn release_escrow(
    escrow_id: EscrowId,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Escrow, LifecycleError> {
    let escrow = get_escrow(escrow_id, deps).await?;

    if escrow.status != EscrowStatus::Funded {
        return Err(LifecycleError::edge_not_permitted(
            "escrow",
            escrow.status,
            EscrowStatus::Released,
        ));
    }

    if !actor.is_elevated() {
        return Err(LifecycleError::forbidden(
            "role ADMIN is required to release an escrow",
        ));
    }

    let updated = deps
        .store
        .update_escrow_status(escrow_id, EscrowStatus::Funded, EscrowStatus::Released)
        .await?
        .ok_or_else(|| LifecycleError::stale_state("escrow", escrow_id, EscrowStatus::Funded))?;

    info!(escrow_id = %escrow_id, actor = %actor, "escrow released");
    record_escrow_event(
        EscrowEvent::Released {
            escrow_id,
            actor_id: actor.actor_id(),
        },
        deps,
    )
    .await;

    Ok(updated)
}

async fn record_escrow_event(event: EscrowEvent, deps: &ServerDeps) {
    if let Err(e) = deps.audit.append(event.to_record()).await {
        error!(error = %e, event = event.event_type(), "failed to append escrow audit record");
    }
}
