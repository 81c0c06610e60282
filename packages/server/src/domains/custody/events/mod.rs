//! Custody audit events.

use serde::Serialize;

use crate::common::{CustodyId, PetId, UserId};
use crate::kernel::AuditRecord;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CustodyEvent {
    Started {
        custody_id: CustodyId,
        pet_id: PetId,
        holder_id: UserId,
    },
    Ended {
        custody_id: CustodyId,
        pet_id: PetId,
        actor_id: Option<UserId>,
    },
}

impl CustodyEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            CustodyEvent::Started { .. } => "custody.started",
            CustodyEvent::Ended { .. } => "custody.ended",
        }
    }

    pub fn to_record(&self) -> AuditRecord {
        let (custody_id, actor_id) = match self {
            CustodyEvent::Started {
                custody_id,
                holder_id,
                ..
            } => (*custody_id, Some(*holder_id)),
            CustodyEvent::Ended {
                custody_id,
                actor_id,
                ..
            } => (*custody_id, *actor_id),
        };

        AuditRecord::new(
            "custody",
            custody_id.into_uuid(),
            self.event_type(),
            actor_id.map(|id| id.into_uuid()),
            self,
        )
    }
}
