use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::common::auth::Role;
use crate::common::{LifecycleError, UserId};
use crate::domains::users::actions;
use crate::domains::users::models::User;
use crate::server::app::AxumAppState;
use crate::server::middleware::MaybeActor;

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub display_name: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::User
}

/// Self-registration is open; the actor headers are optional here, but an
/// elevated caller is still required to grant a privileged role.
pub async fn register_user_handler(
    Extension(state): Extension<AxumAppState>,
    MaybeActor(actor): MaybeActor,
    Json(body): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), LifecycleError> {
    let user =
        actions::register_user(body.display_name, body.role, actor.as_ref(), &state.deps).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user_handler(
    Extension(state): Extension<AxumAppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<User>, LifecycleError> {
    Ok(Json(actions::get_user(user_id, &state.deps).await?))
}
