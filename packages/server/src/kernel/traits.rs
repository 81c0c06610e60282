// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Policy and
// authorization live in domain code; the store only promises conditional
// (optimistic) update semantics and transactional pairing of a workflow row
// with its pet row.
//
// Naming convention: Base* for trait names (e.g., BaseShelterStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{AdoptionId, CustodyId, EscrowId, PetId, UserId};
use crate::domains::adoptions::models::{Adoption, AdoptionStatus};
use crate::domains::custody::models::{Custody, CustodyStatus};
use crate::domains::escrow::models::{Escrow, EscrowStatus};
use crate::domains::pets::models::{Pet, PetDetails, PetStatus};
use crate::domains::users::models::User;

/// A conditioned pet status write: applied only while the stored status
/// still equals `expected`.
#[derive(Debug, Clone, Copy)]
pub struct PetStatusChange {
    pub pet_id: PetId,
    pub expected: PetStatus,
    pub next: PetStatus,
}

/// Transactional entity store.
///
/// Every `update_*` method with an `expected` state is a compare-and-swap:
/// it returns `Ok(None)` when the stored state no longer matches, and the
/// row (plus any paired row) is left untouched. Callers translate `None`
/// into a `Conflict`. The guard is enforced here, at the storage layer,
/// never as an unguarded read-then-write above it.
#[async_trait]
pub trait BaseShelterStore: Send + Sync {
    // Users
    async fn find_user(&self, id: UserId) -> Result<Option<User>>;
    async fn insert_user(&self, user: &User) -> Result<User>;

    // Pets
    async fn find_pet(&self, id: PetId) -> Result<Option<Pet>>;
    async fn insert_pet(&self, pet: &Pet) -> Result<Pet>;
    async fn update_pet_details(&self, id: PetId, details: &PetDetails) -> Result<Option<Pet>>;
    /// Conditioned status write. `None` means the status moved concurrently.
    async fn update_pet_status(
        &self,
        id: PetId,
        expected: PetStatus,
        next: PetStatus,
    ) -> Result<Option<Pet>>;

    // Adoptions
    async fn find_adoption(&self, id: AdoptionId) -> Result<Option<Adoption>>;
    async fn insert_adoption(&self, adoption: &Adoption) -> Result<Adoption>;
    /// Advance an adoption and, optionally, its pet in one transaction.
    /// `None` if either conditioned write fails; nothing is persisted then.
    async fn update_adoption_with_pet(
        &self,
        id: AdoptionId,
        expected: AdoptionStatus,
        next: AdoptionStatus,
        pet_change: Option<PetStatusChange>,
    ) -> Result<Option<(Adoption, Option<Pet>)>>;

    // Custody
    async fn find_custody(&self, id: CustodyId) -> Result<Option<Custody>>;
    /// Insert a custody row and claim the pet in one transaction.
    async fn insert_custody_with_pet(
        &self,
        custody: &Custody,
        pet_change: PetStatusChange,
    ) -> Result<Option<(Custody, Pet)>>;
    /// Advance a custody record and, optionally, its pet in one transaction.
    async fn update_custody_with_pet(
        &self,
        id: CustodyId,
        expected: CustodyStatus,
        next: CustodyStatus,
        pet_change: Option<PetStatusChange>,
    ) -> Result<Option<(Custody, Option<Pet>)>>;

    // Escrows
    async fn find_escrow(&self, id: EscrowId) -> Result<Option<Escrow>>;
    async fn insert_escrow(&self, escrow: &Escrow) -> Result<Escrow>;
    /// Conditioned escrow status write.
    async fn update_escrow_status(
        &self,
        id: EscrowId,
        expected: EscrowStatus,
        next: EscrowStatus,
    ) -> Result<Option<Escrow>>;
}
