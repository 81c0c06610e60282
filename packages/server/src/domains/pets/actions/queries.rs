//! Read-side lifecycle queries.

use serde::Serialize;

use crate::common::auth::Role;
use crate::common::{LifecycleError, PetId};
use crate::domains::pets::machines;
use crate::domains::pets::models::{Pet, PetStatus};
use crate::kernel::{BaseShelterStore as _, ServerDeps};

pub async fn get_pet(pet_id: PetId, deps: &ServerDeps) -> Result<Pet, LifecycleError> {
    deps.store
        .find_pet(pet_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("pet", pet_id))
}

/// Targets reachable from `current` for an actor with `role`. Admin-only
/// targets are included only for an admin. Order is stable (table order),
/// duplicates removed by the table helper.
pub fn allowed_targets_for(current: PetStatus, role: Option<Role>) -> Vec<PetStatus> {
    let elevated = role.is_some_and(|r| r.is_elevated());
    machines::targets_from(current)
        .into_iter()
        .filter(|&(_, admin_only)| !admin_only || elevated)
        .map(|(target, _)| target)
        .collect()
}

pub async fn allowed_targets(
    pet_id: PetId,
    role: Option<Role>,
    deps: &ServerDeps,
) -> Result<Vec<PetStatus>, LifecycleError> {
    let pet = get_pet(pet_id, deps).await?;
    Ok(allowed_targets_for(pet.status, role))
}

/// Transition summary for one pet.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionInfo {
    pub current_status: PetStatus,
    /// Targets any actor may request.
    pub allowed_targets: Vec<PetStatus>,
    /// Targets that additionally require admin authority.
    pub admin_only_targets: Vec<PetStatus>,
    pub description: String,
}

pub async fn describe_pet(pet_id: PetId, deps: &ServerDeps) -> Result<TransitionInfo, LifecycleError> {
    let pet = get_pet(pet_id, deps).await?;

    let mut allowed = Vec::new();
    let mut admin_only = Vec::new();
    for (target, needs_admin) in machines::targets_from(pet.status) {
        if needs_admin {
            admin_only.push(target);
        } else {
            allowed.push(target);
        }
    }

    let description = if allowed.is_empty() && admin_only.is_empty() {
        format!("{} is {}; no transitions are available", pet.name, pet.status)
    } else {
        let mut parts: Vec<String> = allowed.iter().map(|s| s.to_string()).collect();
        parts.extend(admin_only.iter().map(|s| format!("{s} (admin only)")));
        format!(
            "{} is {}; may move to: {}",
            pet.name,
            pet.status,
            parts.join(", ")
        )
    };

    Ok(TransitionInfo {
        current_status: pet.status,
        allowed_targets: allowed,
        admin_only_targets: admin_only,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinary_roles_never_see_admin_targets() {
        for role in [None, Some(Role::User), Some(Role::Shelter)] {
            assert!(allowed_targets_for(PetStatus::Adopted, role).is_empty());
        }
        assert_eq!(
            allowed_targets_for(PetStatus::Adopted, Some(Role::Admin)),
            vec![PetStatus::Available]
        );
    }

    #[test]
    fn test_targets_have_no_duplicates() {
        for status in PetStatus::ALL {
            let targets = allowed_targets_for(status, Some(Role::Admin));
            let mut deduped = targets.clone();
            deduped.dedup();
            assert_eq!(targets, deduped);
        }
    }
}
