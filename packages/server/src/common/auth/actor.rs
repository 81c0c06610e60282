use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::UserId;

/// Role assigned to a verified user. A closed set: the policy and gate
/// match on these variants, there are no free-form role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum Role {
    User,
    Shelter,
    Admin,
}

impl Role {
    /// Whether this role carries administrative authority.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::User => "USER",
            Role::Shelter => "SHELTER",
            Role::Admin => "ADMIN",
        };
        f.write_str(s)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "shelter" => Ok(Role::Shelter),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The identity an operation runs as.
///
/// `System` is a deliberate, distinct variant rather than "no role": it marks
/// workflow-initiated transitions as a different trust boundary. System calls
/// bypass role checks but never the transition table itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// A verified end user or shelter staff member.
    Visitor { id: UserId, role: Role },
    /// The service itself, acting on behalf of a workflow.
    System,
}

impl Actor {
    pub fn visitor(id: UserId, role: Role) -> Self {
        Actor::Visitor { id, role }
    }

    /// The user behind this actor, if any. System actions have none, which
    /// is how audit records distinguish them.
    pub fn actor_id(&self) -> Option<UserId> {
        match self {
            Actor::Visitor { id, .. } => Some(*id),
            Actor::System => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Actor::Visitor { role, .. } => Some(*role),
            Actor::System => None,
        }
    }

    /// Admins and the system actor are elevated.
    pub fn is_elevated(&self) -> bool {
        match self {
            Actor::Visitor { role, .. } => role.is_elevated(),
            Actor::System => true,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Visitor { id, role } => write!(f, "{role} {id}"),
            Actor::System => f.write_str("SYSTEM"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("shelter".parse::<Role>().unwrap(), Role::Shelter);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_system_is_elevated_but_has_no_user() {
        assert!(Actor::System.is_elevated());
        assert_eq!(Actor::System.actor_id(), None);
    }

    #[test]
    fn test_only_admin_visitors_are_elevated() {
        let id = UserId::new();
        assert!(Actor::visitor(id, Role::Admin).is_elevated());
        assert!(!Actor::visitor(id, Role::Shelter).is_elevated());
        assert!(!Actor::visitor(id, Role::User).is_elevated());
    }
}
