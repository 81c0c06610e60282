use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::{AdoptionId, EscrowId, PetId, UserId};

/// Lifecycle of an adoption request:
/// requested -> approved -> completed, or rejected at either step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "adoption_status", rename_all = "snake_case")]
pub enum AdoptionStatus {
    Requested,
    Approved,
    Completed,
    Rejected,
}

impl fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AdoptionStatus::Requested => "REQUESTED",
            AdoptionStatus::Approved => "APPROVED",
            AdoptionStatus::Completed => "COMPLETED",
            AdoptionStatus::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

/// Adoption model - persistence layer.
///
/// Advancing an adoption drives the pet's state machine in lockstep; both
/// rows are committed in one storage transaction so neither can move alone.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Adoption {
    pub id: AdoptionId,
    pub pet_id: PetId,
    pub adopter_id: UserId,
    /// Owner of the pet at request time, kept for the audit trail.
    pub owner_id: Option<UserId>,
    pub escrow_id: Option<EscrowId>,
    pub status: AdoptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Adoption {
    pub fn new(
        pet_id: PetId,
        adopter_id: UserId,
        owner_id: Option<UserId>,
        escrow_id: Option<EscrowId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AdoptionId::new(),
            pet_id,
            adopter_id,
            owner_id,
            escrow_id,
            status: AdoptionStatus::Requested,
            created_at: now,
            updated_at: now,
        }
    }
}
