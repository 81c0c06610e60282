use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::{EscrowId, UserId};

/// Funding state of an escrow. Strictly sequential:
/// created -> funded -> released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "escrow_status", rename_all = "snake_case")]
pub enum EscrowStatus {
    Created,
    Funded,
    Released,
}

impl fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EscrowStatus::Created => "CREATED",
            EscrowStatus::Funded => "FUNDED",
            EscrowStatus::Released => "RELEASED",
        };
        f.write_str(s)
    }
}

/// Escrow model - persistence layer.
///
/// A value-holding record whose release gates workflow completion. The
/// escrow never reads or writes pet state.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Escrow {
    pub id: EscrowId,
    pub amount: Decimal,
    pub status: EscrowStatus,
    pub payer_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Escrow {
    pub fn new(amount: Decimal, payer_id: Option<UserId>) -> Self {
        let now = Utc::now();
        Self {
            id: EscrowId::new(),
            amount,
            status: EscrowStatus::Created,
            payer_id,
            created_at: now,
            updated_at: now,
        }
    }
}
