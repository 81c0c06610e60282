//! Conflict-path tests: the conditioned write is the arbiter when two
//! operations race over the same observed state.

mod common;

use common::*;

use server_core::common::LifecycleError;
use server_core::domains::pets::actions::transition_pet;
use server_core::domains::pets::models::PetStatus;
use server_core::kernel::BaseShelterStore;

#[tokio::test]
async fn test_conditioned_write_admits_exactly_one_winner() {
    let t = TestDependencies::new();
    let pet = seed_pet(&t, PetStatus::Available).await;

    // Two writers both observed AVAILABLE. The store-level guard lets the
    // first through and refuses the second, regardless of what it wants.
    let first = t
        .deps
        .store
        .update_pet_status(pet.id, PetStatus::Available, PetStatus::Pending)
        .await
        .unwrap();
    assert_eq!(first.unwrap().status, PetStatus::Pending);

    let second = t
        .deps
        .store
        .update_pet_status(pet.id, PetStatus::Available, PetStatus::InCustody)
        .await
        .unwrap();
    assert!(second.is_none());
}

#[tokio::test]
async fn test_stale_read_surfaces_as_conflict_not_silent_overwrite() {
    let (t, stale) = stale_read_deps();
    let pet = seed_pet(&t, PetStatus::Available).await;

    // Freeze the snapshot this caller read, then let the world move on.
    stale.set_stale_pet(pet.clone());
    t.store
        .update_pet_status(pet.id, PetStatus::Available, PetStatus::InCustody)
        .await
        .unwrap()
        .unwrap();

    // Legality and authorization pass against the stale AVAILABLE snapshot;
    // the conditioned write catches the race.
    let err = transition_pet(pet.id, PetStatus::Pending, &user(), None, &t.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Conflict { .. }));

    // The concurrent state stands.
    let stored = t.store.find_pet(pet.id).await.unwrap().unwrap();
    assert_eq!(stored.status, PetStatus::InCustody);

    // A lost race never leaves an audit record.
    assert!(t.audit.records().is_empty());
}
