//! User registration and lookup.

use tracing::info;

use crate::common::auth::{Actor, Role};
use crate::common::{LifecycleError, UserId};
use crate::domains::users::models::User;
use crate::kernel::{BaseShelterStore as _, ServerDeps};

pub async fn get_user(user_id: UserId, deps: &ServerDeps) -> Result<User, LifecycleError> {
    deps.store
        .find_user(user_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("user", user_id))
}

/// Register a user. Anyone may register as a plain USER (no actor needed);
/// granting the SHELTER or ADMIN role requires an admin caller.
pub async fn register_user(
    display_name: String,
    role: Role,
    actor: Option<&Actor>,
    deps: &ServerDeps,
) -> Result<User, LifecycleError> {
    if role != Role::User && !actor.is_some_and(Actor::is_elevated) {
        return Err(LifecycleError::forbidden(format!(
            "role ADMIN is required to grant the {role} role"
        )));
    }

    let user = deps.store.insert_user(&User::new(display_name, role)).await?;

    info!(user_id = %user.id, role = %user.role, "user registered");

    Ok(user)
}
