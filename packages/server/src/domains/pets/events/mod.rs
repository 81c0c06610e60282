//! Pet audit events.
//!
//! Serialized into the append-only event log. `actor_id` is `None` for
//! system-initiated transitions, which is how workflow-driven changes show
//! up distinctly in the trail.

use serde::Serialize;

use crate::common::{PetId, UserId};
use crate::domains::pets::models::PetStatus;
use crate::kernel::AuditRecord;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PetEvent {
    Listed {
        pet_id: PetId,
        owner_id: Option<UserId>,
    },
    StatusChanged {
        pet_id: PetId,
        from: PetStatus,
        to: PetStatus,
        actor_id: Option<UserId>,
        reason: Option<String>,
    },
    DetailsUpdated {
        pet_id: PetId,
        actor_id: Option<UserId>,
    },
}

impl PetEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            PetEvent::Listed { .. } => "pet.listed",
            PetEvent::StatusChanged { .. } => "pet.status_changed",
            PetEvent::DetailsUpdated { .. } => "pet.details_updated",
        }
    }

    pub fn to_record(&self) -> AuditRecord {
        let (pet_id, actor_id) = match self {
            PetEvent::Listed { pet_id, owner_id } => (*pet_id, *owner_id),
            PetEvent::StatusChanged {
                pet_id, actor_id, ..
            } => (*pet_id, *actor_id),
            PetEvent::DetailsUpdated { pet_id, actor_id } => (*pet_id, *actor_id),
        };

        AuditRecord::new(
            "pet",
            pet_id.into_uuid(),
            self.event_type(),
            actor_id.map(|id| id.into_uuid()),
            self,
        )
    }
}
