use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::auth::Role;
use crate::common::UserId;

/// User model - persistence layer.
///
/// Immutable for the purposes of this core: credential verification happens
/// upstream, and the verified `{id, role}` pair arrives with each request.
/// The row exists so workflow records have a stable reference.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            display_name: display_name.into(),
            role,
            created_at: Utc::now(),
        }
    }
}
