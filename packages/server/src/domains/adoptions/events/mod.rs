//! Adoption audit events.

use serde::Serialize;

use crate::common::{AdoptionId, PetId, UserId};
use crate::kernel::AuditRecord;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdoptionEvent {
    Requested {
        adoption_id: AdoptionId,
        pet_id: PetId,
        adopter_id: UserId,
    },
    Approved {
        adoption_id: AdoptionId,
        pet_id: PetId,
        actor_id: Option<UserId>,
    },
    Completed {
        adoption_id: AdoptionId,
        pet_id: PetId,
        actor_id: Option<UserId>,
    },
    Rejected {
        adoption_id: AdoptionId,
        pet_id: PetId,
        actor_id: Option<UserId>,
    },
}

impl AdoptionEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            AdoptionEvent::Requested { .. } => "adoption.requested",
            AdoptionEvent::Approved { .. } => "adoption.approved",
            AdoptionEvent::Completed { .. } => "adoption.completed",
            AdoptionEvent::Rejected { .. } => "adoption.rejected",
        }
    }

    pub fn to_record(&self) -> AuditRecord {
        let (adoption_id, actor_id) = match self {
            AdoptionEvent::Requested {
                adoption_id,
                adopter_id,
                ..
            } => (*adoption_id, Some(*adopter_id)),
            AdoptionEvent::Approved {
                adoption_id,
                actor_id,
                ..
            }
            | AdoptionEvent::Completed {
                adoption_id,
                actor_id,
                ..
            }
            | AdoptionEvent::Rejected {
                adoption_id,
                actor_id,
                ..
            } => (*adoption_id, *actor_id),
        };

        AuditRecord::new(
            "adoption",
            adoption_id.into_uuid(),
            self.event_type(),
            actor_id.map(|id| id.into_uuid()),
            self,
        )
    }
}
