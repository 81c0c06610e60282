//! Shared harness for integration tests: in-memory dependencies, seed
//! helpers, and a store wrapper that serves deliberately stale reads.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use server_core::common::auth::{Actor, Role};
use server_core::common::{AdoptionId, CustodyId, EscrowId, PetId, UserId};
use server_core::domains::adoptions::models::{Adoption, AdoptionStatus};
use server_core::domains::custody::models::{Custody, CustodyStatus};
use server_core::domains::escrow::models::{Escrow, EscrowStatus};
use server_core::domains::pets::models::{Pet, PetDetails, PetStatus};
use server_core::domains::users::models::User;
pub use server_core::kernel::{
    BaseShelterStore, MemoryShelterStore, PetStatusChange, ServerDeps, TestDependencies,
};

pub fn admin() -> Actor {
    Actor::visitor(UserId::new(), Role::Admin)
}

pub fn shelter() -> Actor {
    Actor::visitor(UserId::new(), Role::Shelter)
}

pub fn user() -> Actor {
    Actor::visitor(UserId::new(), Role::User)
}

/// Insert a pet already sitting in `status`.
pub async fn seed_pet(deps: &TestDependencies, status: PetStatus) -> Pet {
    seed_owned_pet(deps, status, None).await
}

pub async fn seed_owned_pet(
    deps: &TestDependencies,
    status: PetStatus,
    owner: Option<UserId>,
) -> Pet {
    let mut pet = Pet::new("Biscuit", "dog", Some("beagle mix".to_string()), owner);
    pet.status = status;
    deps.deps
        .store
        .insert_pet(&pet)
        .await
        .expect("in-memory insert cannot fail")
}

/// Insert an adoption in `status` for `pet`, with an optional escrow id.
pub async fn seed_adoption(
    deps: &TestDependencies,
    pet: &Pet,
    status: AdoptionStatus,
    escrow_id: Option<EscrowId>,
) -> Adoption {
    let adopter = UserId::new();
    let mut adoption = Adoption::new(pet.id, adopter, pet.current_owner_id, escrow_id);
    adoption.status = status;
    deps.deps
        .store
        .insert_adoption(&adoption)
        .await
        .expect("in-memory insert cannot fail")
}

pub async fn seed_escrow(deps: &TestDependencies, status: EscrowStatus, payer: Option<UserId>) -> Escrow {
    let mut escrow = Escrow::new(rust_decimal::Decimal::new(15000, 2), payer);
    escrow.status = status;
    deps.deps
        .store
        .insert_escrow(&escrow)
        .await
        .expect("in-memory insert cannot fail")
}

/// Store wrapper whose `find_pet` serves a canned stale snapshot while all
/// writes go to the real store. Reproduces the window between a read and
/// its conditioned write without depending on scheduler timing.
pub struct StaleReadStore {
    inner: Arc<MemoryShelterStore>,
    stale_pet: Mutex<Option<Pet>>,
}

impl StaleReadStore {
    pub fn new(inner: Arc<MemoryShelterStore>) -> Self {
        Self {
            inner,
            stale_pet: Mutex::new(None),
        }
    }

    /// Serve this snapshot from every subsequent `find_pet` for its id.
    pub fn set_stale_pet(&self, pet: Pet) {
        *self.stale_pet.lock().unwrap() = Some(pet);
    }
}

#[async_trait]
impl BaseShelterStore for StaleReadStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        self.inner.find_user(id).await
    }

    async fn insert_user(&self, user: &User) -> Result<User> {
        self.inner.insert_user(user).await
    }

    async fn find_pet(&self, id: PetId) -> Result<Option<Pet>> {
        if let Some(stale) = self.stale_pet.lock().unwrap().clone() {
            if stale.id == id {
                return Ok(Some(stale));
            }
        }
        self.inner.find_pet(id).await
    }

    async fn insert_pet(&self, pet: &Pet) -> Result<Pet> {
        self.inner.insert_pet(pet).await
    }

    async fn update_pet_details(&self, id: PetId, details: &PetDetails) -> Result<Option<Pet>> {
        self.inner.update_pet_details(id, details).await
    }

    async fn update_pet_status(
        &self,
        id: PetId,
        expected: PetStatus,
        next: PetStatus,
    ) -> Result<Option<Pet>> {
        self.inner.update_pet_status(id, expected, next).await
    }

    async fn find_adoption(&self, id: AdoptionId) -> Result<Option<Adoption>> {
        self.inner.find_adoption(id).await
    }

    async fn insert_adoption(&self, adoption: &Adoption) -> Result<Adoption> {
        self.inner.insert_adoption(adoption).await
    }

    async fn update_adoption_with_pet(
        &self,
        id: AdoptionId,
        expected: AdoptionStatus,
        next: AdoptionStatus,
        pet_change: Option<PetStatusChange>,
    ) -> Result<Option<(Adoption, Option<Pet>)>> {
        self.inner
            .update_adoption_with_pet(id, expected, next, pet_change)
            .await
    }

    async fn find_custody(&self, id: CustodyId) -> Result<Option<Custody>> {
        self.inner.find_custody(id).await
    }

    async fn insert_custody_with_pet(
        &self,
        custody: &Custody,
        pet_change: PetStatusChange,
    ) -> Result<Option<(Custody, Pet)>> {
        self.inner.insert_custody_with_pet(custody, pet_change).await
    }

    async fn update_custody_with_pet(
        &self,
        id: CustodyId,
        expected: CustodyStatus,
        next: CustodyStatus,
        pet_change: Option<PetStatusChange>,
    ) -> Result<Option<(Custody, Option<Pet>)>> {
        self.inner
            .update_custody_with_pet(id, expected, next, pet_change)
            .await
    }

    async fn find_escrow(&self, id: EscrowId) -> Result<Option<Escrow>> {
        self.inner.find_escrow(id).await
    }

    async fn insert_escrow(&self, escrow: &Escrow) -> Result<Escrow> {
        self.inner.insert_escrow(escrow).await
    }

    async fn update_escrow_status(
        &self,
        id: EscrowId,
        expected: EscrowStatus,
        next: EscrowStatus,
    ) -> Result<Option<Escrow>> {
        self.inner.update_escrow_status(id, expected, next).await
    }
}

/// Dependencies whose reads can be made stale, for conflict-path tests.
pub fn stale_read_deps() -> (TestDependencies, Arc<StaleReadStore>) {
    let base = TestDependencies::new();
    let stale = Arc::new(StaleReadStore::new(base.store.clone()));
    let deps = ServerDeps::new(stale.clone(), base.audit.clone());
    (
        TestDependencies {
            deps,
            store: base.store,
            audit: base.audit,
        },
        stale,
    )
}
