use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::common::{AdoptionId, LifecycleError, PetId};
use crate::domains::adoptions::actions;
use crate::domains::adoptions::models::Adoption;
use crate::server::app::AxumAppState;
use crate::server::middleware::ActorContext;

#[derive(Deserialize)]
pub struct RequestAdoptionRequest {
    pub pet_id: PetId,
    /// When set, an escrow for this amount is opened with the adopter as
    /// payer, and its release gates completion.
    #[serde(default)]
    pub escrow_amount: Option<Decimal>,
}

pub async fn request_adoption_handler(
    Extension(state): Extension<AxumAppState>,
    ActorContext(actor): ActorContext,
    Json(body): Json<RequestAdoptionRequest>,
) -> Result<(StatusCode, Json<Adoption>), LifecycleError> {
    let adoption =
        actions::request_adoption(body.pet_id, body.escrow_amount, &actor, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(adoption)))
}

pub async fn get_adoption_handler(
    Extension(state): Extension<AxumAppState>,
    Path(adoption_id): Path<AdoptionId>,
) -> Result<Json<Adoption>, LifecycleError> {
    Ok(Json(actions::get_adoption(adoption_id, &state.deps).await?))
}

pub async fn approve_adoption_handler(
    Extension(state): Extension<AxumAppState>,
    ActorContext(actor): ActorContext,
    Path(adoption_id): Path<AdoptionId>,
) -> Result<Json<Adoption>, LifecycleError> {
    Ok(Json(
        actions::approve_adoption(adoption_id, &actor, &state.deps).await?,
    ))
}

pub async fn complete_adoption_handler(
    Extension(state): Extension<AxumAppState>,
    ActorContext(actor): ActorContext,
    Path(adoption_id): Path<AdoptionId>,
) -> Result<Json<Adoption>, LifecycleError> {
    Ok(Json(
        actions::complete_adoption(adoption_id, &actor, &state.deps).await?,
    ))
}

pub async fn reject_adoption_handler(
    Extension(state): Extension<AxumAppState>,
    ActorContext(actor): ActorContext,
    Path(adoption_id): Path<AdoptionId>,
) -> Result<Json<Adoption>, LifecycleError> {
    Ok(Json(
        actions::reject_adoption(adoption_id, &actor, &state.deps).await?,
    ))
}
