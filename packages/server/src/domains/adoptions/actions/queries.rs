use crate::common::{AdoptionId, LifecycleError};
use crate::domains::adoptions::models::Adoption;
use crate::kernel::{BaseShelterStore as _, ServerDeps};

pub async fn get_adoption(
    adoption_id: AdoptionId,
    deps: &ServerDeps,
) -> Result<Adoption, LifecycleError> {
    deps.store
        .find_adoption(adoption_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("adoption", adoption_id))
}
