use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::common::{CustodyId, LifecycleError, PetId};
use crate::domains::custody::actions;
use crate::domains::custody::models::Custody;
use crate::server::app::AxumAppState;
use crate::server::middleware::ActorContext;

#[derive(Deserialize)]
pub struct StartCustodyRequest {
    pub pet_id: PetId,
    /// Optional care deposit; its release gates ending the custody.
    #[serde(default)]
    pub escrow_amount: Option<Decimal>,
}

pub async fn start_custody_handler(
    Extension(state): Extension<AxumAppState>,
    ActorContext(actor): ActorContext,
    Json(body): Json<StartCustodyRequest>,
) -> Result<(StatusCode, Json<Custody>), LifecycleError> {
    let custody =
        actions::start_custody(body.pet_id, body.escrow_amount, &actor, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(custody)))
}

pub async fn get_custody_handler(
    Extension(state): Extension<AxumAppState>,
    Path(custody_id): Path<CustodyId>,
) -> Result<Json<Custody>, LifecycleError> {
    Ok(Json(actions::get_custody(custody_id, &state.deps).await?))
}

pub async fn end_custody_handler(
    Extension(state): Extension<AxumAppState>,
    ActorContext(actor): ActorContext,
    Path(custody_id): Path<CustodyId>,
) -> Result<Json<Custody>, LifecycleError> {
    Ok(Json(
        actions::end_custody(custody_id, &actor, &state.deps).await?,
    ))
}
