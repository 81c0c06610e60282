use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::{CustodyId, EscrowId, PetId, UserId};

/// Lifecycle of a custody agreement: active -> completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "custody_status", rename_all = "snake_case")]
pub enum CustodyStatus {
    Active,
    Completed,
}

impl fmt::Display for CustodyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CustodyStatus::Active => "ACTIVE",
            CustodyStatus::Completed => "COMPLETED",
        };
        f.write_str(s)
    }
}

/// Custody model - persistence layer.
///
/// Starting custody moves the pet to IN_CUSTODY; ending it moves the pet
/// back to AVAILABLE. Both sides commit in one storage transaction.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Custody {
    pub id: CustodyId,
    pub pet_id: PetId,
    pub holder_id: UserId,
    pub escrow_id: Option<EscrowId>,
    pub status: CustodyStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Custody {
    pub fn new(pet_id: PetId, holder_id: UserId, escrow_id: Option<EscrowId>) -> Self {
        Self {
            id: CustodyId::new(),
            pet_id,
            holder_id,
            escrow_id,
            status: CustodyStatus::Active,
            started_at: Utc::now(),
            ended_at: None,
        }
    }
}
