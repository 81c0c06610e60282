use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::{PetId, UserId};

/// Lifecycle state of an adoptable pet. These four states are the whole
/// universe: the transition table in `machines` enumerates every legal edge
/// between them, and nothing else ever writes the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "pet_status", rename_all = "snake_case")]
pub enum PetStatus {
    /// Listed and open to adoption requests or custody.
    Available,
    /// Claimed by an approved adoption that has not completed yet.
    Pending,
    /// Held temporarily by a shelter (foster, medical, transport).
    InCustody,
    /// Adoption completed. Terminal for ordinary actors.
    Adopted,
}

impl PetStatus {
    pub const ALL: [PetStatus; 4] = [
        PetStatus::Available,
        PetStatus::Pending,
        PetStatus::InCustody,
        PetStatus::Adopted,
    ];
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PetStatus::Available => "AVAILABLE",
            PetStatus::Pending => "PENDING",
            PetStatus::InCustody => "IN_CUSTODY",
            PetStatus::Adopted => "ADOPTED",
        };
        f.write_str(s)
    }
}

impl FromStr for PetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AVAILABLE" => Ok(PetStatus::Available),
            "PENDING" => Ok(PetStatus::Pending),
            "IN_CUSTODY" => Ok(PetStatus::InCustody),
            "ADOPTED" => Ok(PetStatus::Adopted),
            other => Err(format!("unknown pet status: {other}")),
        }
    }
}

/// Pet model - persistence layer.
///
/// `status` is mutated exclusively through the lifecycle actions; workflow
/// code never writes it directly.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub species: String,
    pub description: Option<String>,
    pub status: PetStatus,
    /// The user who listed the pet. A reference for owner-scoped edits, not
    /// ownership of the state machine itself.
    pub current_owner_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// New listing. Pets always enter the system AVAILABLE.
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        description: Option<String>,
        current_owner_id: Option<UserId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PetId::new(),
            name: name.into(),
            species: species.into(),
            description,
            status: PetStatus::Available,
            current_owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Descriptive fields an owner may edit. `None` leaves a field unchanged.
/// Status is deliberately absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PetDetails {
    pub name: Option<String>,
    pub species: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pets_are_available() {
        let pet = Pet::new("Mochi", "cat", Some("tabby, very loud".to_string()), None);
        assert_eq!(pet.status, PetStatus::Available);
    }

    #[test]
    fn test_status_display_and_parse_roundtrip() {
        for status in PetStatus::ALL {
            let parsed: PetStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_serde_uses_wire_names() {
        let json = serde_json::to_string(&PetStatus::InCustody).unwrap();
        assert_eq!(json, "\"IN_CUSTODY\"");
        let back: PetStatus = serde_json::from_str("\"ADOPTED\"").unwrap();
        assert_eq!(back, PetStatus::Adopted);
    }
}
