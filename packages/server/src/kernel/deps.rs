//! Server dependencies for domain actions (using traits for testability)
//!
//! The central dependency container handed to every action. Both external
//! collaborators sit behind `Base*` traits so tests can swap in the
//! in-memory implementations from `test_dependencies`.

use sqlx::PgPool;
use std::sync::Arc;

use super::audit::{BaseAuditSink, PgAuditSink};
use super::store::PgShelterStore;
use super::traits::BaseShelterStore;

/// Dependencies accessible to domain actions.
#[derive(Clone)]
pub struct ServerDeps {
    /// Transactional entity store with conditional-update semantics.
    pub store: Arc<dyn BaseShelterStore>,
    /// Append-only audit sink.
    pub audit: Arc<dyn BaseAuditSink>,
}

impl ServerDeps {
    pub fn new(store: Arc<dyn BaseShelterStore>, audit: Arc<dyn BaseAuditSink>) -> Self {
        Self { store, audit }
    }

    /// Production wiring: both collaborators backed by the same Postgres pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            store: Arc::new(PgShelterStore::new(pool.clone())),
            audit: Arc::new(PgAuditSink::new(pool)),
        }
    }
}
