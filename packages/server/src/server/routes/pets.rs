use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::common::{LifecycleError, PetId};
use crate::domains::pets::actions;
use crate::domains::pets::actions::TransitionInfo;
use crate::domains::pets::models::{Pet, PetDetails, PetStatus};
use crate::kernel::{BaseAuditSink as _, EventRow};
use crate::server::app::AxumAppState;
use crate::server::middleware::ActorContext;

#[derive(Deserialize)]
pub struct CreatePetRequest {
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub async fn create_pet_handler(
    Extension(state): Extension<AxumAppState>,
    ActorContext(actor): ActorContext,
    Json(body): Json<CreatePetRequest>,
) -> Result<(StatusCode, Json<Pet>), LifecycleError> {
    let pet = actions::create_pet(body.name, body.species, body.description, &actor, &state.deps)
        .await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

pub async fn get_pet_handler(
    Extension(state): Extension<AxumAppState>,
    Path(pet_id): Path<PetId>,
) -> Result<Json<Pet>, LifecycleError> {
    Ok(Json(actions::get_pet(pet_id, &state.deps).await?))
}

pub async fn update_pet_details_handler(
    Extension(state): Extension<AxumAppState>,
    ActorContext(actor): ActorContext,
    Path(pet_id): Path<PetId>,
    Json(details): Json<PetDetails>,
) -> Result<Json<Pet>, LifecycleError> {
    Ok(Json(
        actions::update_pet_details(pet_id, details, &actor, &state.deps).await?,
    ))
}

pub async fn describe_pet_handler(
    Extension(state): Extension<AxumAppState>,
    Path(pet_id): Path<PetId>,
) -> Result<Json<TransitionInfo>, LifecycleError> {
    Ok(Json(actions::describe_pet(pet_id, &state.deps).await?))
}

/// Audit trail for one pet. Admin only; the trail includes system-initiated
/// changes that individual users have no business reading.
pub async fn pet_events_handler(
    Extension(state): Extension<AxumAppState>,
    ActorContext(actor): ActorContext,
    Path(pet_id): Path<PetId>,
) -> Result<Json<Vec<EventRow>>, LifecycleError> {
    let pet = actions::get_pet(pet_id, &state.deps).await?;

    if !actor.is_elevated() {
        return Err(LifecycleError::forbidden(
            "role ADMIN is required to read the audit trail",
        ));
    }

    let rows = state.deps.audit.list("pet", pet.id.into_uuid()).await?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct TransitionRequest {
    pub target: PetStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

pub async fn transition_pet_handler(
    Extension(state): Extension<AxumAppState>,
    ActorContext(actor): ActorContext,
    Path(pet_id): Path<PetId>,
    Json(body): Json<TransitionRequest>,
) -> Result<Json<Pet>, LifecycleError> {
    Ok(Json(
        actions::transition_pet(pet_id, body.target, &actor, body.reason, &state.deps).await?,
    ))
}
