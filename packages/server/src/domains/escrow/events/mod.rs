//! Escrow audit events.

use serde::Serialize;

use crate::common::{EscrowId, UserId};
use crate::kernel::AuditRecord;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EscrowEvent {
    Funded {
        escrow_id: EscrowId,
        actor_id: Option<UserId>,
    },
    Released {
        escrow_id: EscrowId,
        actor_id: Option<UserId>,
    },
}

impl EscrowEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            EscrowEvent::Funded { .. } => "escrow.funded",
            EscrowEvent::Released { .. } => "escrow.released",
        }
    }

    pub fn to_record(&self) -> AuditRecord {
        let (escrow_id, actor_id) = match self {
            EscrowEvent::Funded {
                escrow_id,
                actor_id,
            }
            | EscrowEvent::Released {
                escrow_id,
                actor_id,
            } => (*escrow_id, *actor_id),
        };

        AuditRecord::new(
            "escrow",
            escrow_id.into_uuid(),
            self.event_type(),
            actor_id.map(|id| id.into_uuid()),
            self,
        )
    }
}
