use crate::common::{CustodyId, LifecycleError};
use crate::domains::custody::models::Custody;
use crate::kernel::{BaseShelterStore as _, ServerDeps};

pub async fn get_custody(
    custody_id: CustodyId,
    deps: &ServerDeps,
) -> Result<Custody, LifecycleError> {
    deps.store
        .find_custody(custody_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("custody", custody_id))
}
