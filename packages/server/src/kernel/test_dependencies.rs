// In-memory implementations for testing
//
// A single mutex guards the whole store, so each conditional update is
// atomic: the check and the write happen under one lock acquisition, which
// gives the same compare-and-swap semantics as the SQL `UPDATE ... WHERE`
// guard. Paired workflow/pet updates mutate both maps under that one lock,
// mirroring the Postgres transaction.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::common::{AdoptionId, CustodyId, EscrowId, PetId, UserId};
use crate::domains::adoptions::models::{Adoption, AdoptionStatus};
use crate::domains::custody::models::{Custody, CustodyStatus};
use crate::domains::escrow::models::{Escrow, EscrowStatus};
use crate::domains::pets::models::{Pet, PetDetails, PetStatus};
use crate::domains::users::models::User;

use super::audit::{AuditRecord, BaseAuditSink, EventRow};
use super::deps::ServerDeps;
use super::traits::{BaseShelterStore, PetStatusChange};

// =============================================================================
// In-memory store
// =============================================================================

#[derive(Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    pets: HashMap<PetId, Pet>,
    adoptions: HashMap<AdoptionId, Adoption>,
    custody: HashMap<CustodyId, Custody>,
    escrows: HashMap<EscrowId, Escrow>,
}

#[derive(Default)]
pub struct MemoryShelterStore {
    state: Mutex<MemoryState>,
}

impl MemoryShelterStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply_pet_change(state: &mut MemoryState, change: PetStatusChange) -> Option<Pet> {
        let pet = state.pets.get_mut(&change.pet_id)?;
        if pet.status != change.expected {
            return None;
        }
        pet.status = change.next;
        pet.updated_at = Utc::now();
        Some(pet.clone())
    }
}

#[async_trait]
impl BaseShelterStore for MemoryShelterStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.state.lock().unwrap().users.get(&id).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<User> {
        self.state.lock().unwrap().users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_pet(&self, id: PetId) -> Result<Option<Pet>> {
        Ok(self.state.lock().unwrap().pets.get(&id).cloned())
    }

    async fn insert_pet(&self, pet: &Pet) -> Result<Pet> {
        self.state.lock().unwrap().pets.insert(pet.id, pet.clone());
        Ok(pet.clone())
    }

    async fn update_pet_details(&self, id: PetId, details: &PetDetails) -> Result<Option<Pet>> {
        let mut state = self.state.lock().unwrap();
        let Some(pet) = state.pets.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &details.name {
            pet.name = name.clone();
        }
        if let Some(species) = &details.species {
            pet.species = species.clone();
        }
        if let Some(description) = &details.description {
            pet.description = Some(description.clone());
        }
        pet.updated_at = Utc::now();
        Ok(Some(pet.clone()))
    }

    async fn update_pet_status(
        &self,
        id: PetId,
        expected: PetStatus,
        next: PetStatus,
    ) -> Result<Option<Pet>> {
        let mut state = self.state.lock().unwrap();
        Ok(Self::apply_pet_change(
            &mut state,
            PetStatusChange {
                pet_id: id,
                expected,
                next,
            },
        ))
    }

    async fn find_adoption(&self, id: AdoptionId) -> Result<Option<Adoption>> {
        Ok(self.state.lock().unwrap().adoptions.get(&id).cloned())
    }

    async fn insert_adoption(&self, adoption: &Adoption) -> Result<Adoption> {
        self.state
            .lock()
            .unwrap()
            .adoptions
            .insert(adoption.id, adoption.clone());
        Ok(adoption.clone())
    }

    async fn update_adoption_with_pet(
        &self,
        id: AdoptionId,
        expected: AdoptionStatus,
        next: AdoptionStatus,
        pet_change: Option<PetStatusChange>,
    ) -> Result<Option<(Adoption, Option<Pet>)>> {
        let mut state = self.state.lock().unwrap();

        // Check both conditions before mutating anything, so a failed pet
        // condition leaves the adoption untouched (no partial commit).
        match state.adoptions.get(&id) {
            Some(adoption) if adoption.status == expected => {}
            _ => return Ok(None),
        }

        let pet = match pet_change {
            Some(change) => match Self::apply_pet_change(&mut state, change) {
                Some(pet) => Some(pet),
                None => return Ok(None),
            },
            None => None,
        };

        let adoption = state
            .adoptions
            .get_mut(&id)
            .ok_or_else(|| anyhow!("adoption row vanished mid-update"))?;
        adoption.status = next;
        adoption.updated_at = Utc::now();
        Ok(Some((adoption.clone(), pet)))
    }

    async fn find_custody(&self, id: CustodyId) -> Result<Option<Custody>> {
        Ok(self.state.lock().unwrap().custody.get(&id).cloned())
    }

    async fn insert_custody_with_pet(
        &self,
        custody: &Custody,
        pet_change: PetStatusChange,
    ) -> Result<Option<(Custody, Pet)>> {
        let mut state = self.state.lock().unwrap();

        let Some(pet) = Self::apply_pet_change(&mut state, pet_change) else {
            return Ok(None);
        };

        state.custody.insert(custody.id, custody.clone());
        Ok(Some((custody.clone(), pet)))
    }

    async fn update_custody_with_pet(
        &self,
        id: CustodyId,
        expected: CustodyStatus,
        next: CustodyStatus,
        pet_change: Option<PetStatusChange>,
    ) -> Result<Option<(Custody, Option<Pet>)>> {
        let mut state = self.state.lock().unwrap();

        match state.custody.get(&id) {
            Some(custody) if custody.status == expected => {}
            _ => return Ok(None),
        }

        let pet = match pet_change {
            Some(change) => match Self::apply_pet_change(&mut state, change) {
                Some(pet) => Some(pet),
                None => return Ok(None),
            },
            None => None,
        };

        let custody = state
            .custody
            .get_mut(&id)
            .ok_or_else(|| anyhow!("custody row vanished mid-update"))?;
        custody.status = next;
        if next == CustodyStatus::Completed {
            custody.ended_at = Some(Utc::now());
        }
        Ok(Some((custody.clone(), pet)))
    }

    async fn find_escrow(&self, id: EscrowId) -> Result<Option<Escrow>> {
        Ok(self.state.lock().unwrap().escrows.get(&id).cloned())
    }

    async fn insert_escrow(&self, escrow: &Escrow) -> Result<Escrow> {
        self.state
            .lock()
            .unwrap()
            .escrows
            .insert(escrow.id, escrow.clone());
        Ok(escrow.clone())
    }

    async fn update_escrow_status(
        &self,
        id: EscrowId,
        expected: EscrowStatus,
        next: EscrowStatus,
    ) -> Result<Option<Escrow>> {
        let mut state = self.state.lock().unwrap();
        let Some(escrow) = state.escrows.get_mut(&id) else {
            return Ok(None);
        };
        if escrow.status != expected {
            return Ok(None);
        }
        escrow.status = next;
        escrow.updated_at = Utc::now();
        Ok(Some(escrow.clone()))
    }
}

// =============================================================================
// Recording audit sink
// =============================================================================

/// Audit sink that records appends in memory. Can be switched to fail so
/// tests can exercise the degraded-success path (state committed, audit
/// lost, call still returns Ok).
#[derive(Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<EventRow>>,
    next_id: AtomicI64,
    failing: AtomicBool,
}

impl RecordingAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent append fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All recorded rows, in append order.
    pub fn records(&self) -> Vec<EventRow> {
        self.events.lock().unwrap().clone()
    }

    /// Event types recorded for one entity, in append order.
    pub fn event_types_for(&self, entity_id: Uuid) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.entity_id == entity_id)
            .map(|e| e.event_type.clone())
            .collect()
    }
}

#[async_trait]
impl BaseAuditSink for RecordingAuditSink {
    async fn append(&self, record: AuditRecord) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!("audit sink unavailable"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.events.lock().unwrap().push(EventRow {
            id,
            entity_type: record.entity_type.to_string(),
            entity_id: record.entity_id,
            event_type: record.event_type.to_string(),
            actor_id: record.actor_id,
            payload: record.payload,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list(&self, entity_type: &str, entity_id: Uuid) -> Result<Vec<EventRow>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.entity_type == entity_type && e.entity_id == entity_id)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Bundle
// =============================================================================

/// In-memory dependency bundle for tests: `deps` to hand to actions, plus
/// direct handles for seeding and assertions.
pub struct TestDependencies {
    pub deps: ServerDeps,
    pub store: Arc<MemoryShelterStore>,
    pub audit: Arc<RecordingAuditSink>,
}

impl TestDependencies {
    pub fn new() -> Self {
        let store = Arc::new(MemoryShelterStore::new());
        let audit = Arc::new(RecordingAuditSink::new());
        let deps = ServerDeps::new(store.clone(), audit.clone());
        Self { deps, store, audit }
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
