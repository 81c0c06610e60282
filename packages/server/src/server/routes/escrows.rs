use axum::extract::{Extension, Path};
use axum::Json;

use crate::common::{EscrowId, LifecycleError};
use crate::domains::escrow::actions;
use crate::domains::escrow::models::Escrow;
use crate::server::app::AxumAppState;
use crate::server::middleware::ActorContext;

pub async fn get_escrow_handler(
    Extension(state): Extension<AxumAppState>,
    Path(escrow_id): Path<EscrowId>,
) -> Result<Json<Escrow>, LifecycleError> {
    Ok(Json(actions::get_escrow(escrow_id, &state.deps).await?))
}

pub async fn fund_escrow_handler(
    Extension(state): Extension<AxumAppState>,
    ActorContext(actor): ActorContext,
    Path(escrow_id): Path<EscrowId>,
) -> Result<Json<Escrow>, LifecycleError> {
    Ok(Json(
        actions::fund_escrow(escrow_id, &actor, &state.deps).await?,
    ))
}

pub async fn release_escrow_handler(
    Extension(state): Extension<AxumAppState>,
    ActorContext(actor): ActorContext,
    Path(escrow_id): Path<EscrowId>,
) -> Result<Json<Escrow>, LifecycleError> {
    Ok(Json(
        actions::release_escrow(escrow_id, &actor, &state.deps).await?,
    ))
}
