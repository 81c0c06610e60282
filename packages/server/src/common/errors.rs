//! Error taxonomy shared by all lifecycle and workflow operations.
//!
//! Every operation evaluates in a fixed order: existence, then transition
//! legality, then authorization, then the conditioned write. The order
//! matters: probing a nonexistent entity must yield `NotFound`, never
//! `Forbidden`, so authorization failures cannot be used to discover which
//! IDs exist.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt::Display;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LifecycleError {
    /// The entity does not exist. Terminal for the call.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// The requested edge is not in the transition table. Covers both the
    /// no-op case ("already in this state") and a genuinely absent edge.
    #[error("invalid transition: {reason}")]
    InvalidTransition { reason: String },

    /// The edge is legal but this actor may not take it.
    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    /// A concurrent mutation invalidated the observed starting state.
    /// Recoverable by retrying with a fresh read.
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// Storage failure. Surfaced as an internal error.
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LifecycleError {
    pub fn not_found(entity: &'static str, id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// No-op edge: the entity is already in the requested state.
    pub fn already_in_state(entity: &str, state: impl Display) -> Self {
        Self::InvalidTransition {
            reason: format!("{entity} is already in state {state}"),
        }
    }

    /// The edge does not exist in the transition table.
    pub fn edge_not_permitted(entity: &str, from: impl Display, to: impl Display) -> Self {
        Self::InvalidTransition {
            reason: format!("{entity} transition from {from} to {to} is not permitted"),
        }
    }

    /// The actor lacks the role an admin-gated edge requires.
    pub fn requires_role(role: impl Display, target: impl Display) -> Self {
        Self::Forbidden {
            reason: format!("role {role} is required to move a pet to {target}"),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    /// The conditioned write failed: the stored state no longer matches the
    /// state observed at the start of the operation.
    pub fn stale_state(entity: &str, id: impl Display, expected: impl Display) -> Self {
        Self::Conflict {
            reason: format!("{entity} {id} was modified concurrently: status is no longer {expected}"),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    /// Short machine-readable kind, used in HTTP payloads and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::Forbidden { .. } => "forbidden",
            Self::Conflict { .. } => "conflict",
            Self::Storage(_) => "internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LifecycleError {
    fn into_response(self) -> Response {
        // Storage details stay in the logs, not on the wire.
        let message = match &self {
            Self::Storage(e) => {
                tracing::error!(error = %e, "storage error while handling request");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (
            self.status_code(),
            Json(json!({
                "error": self.kind(),
                "message": message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_and_missing_edge_are_distinguishable() {
        let noop = LifecycleError::already_in_state("pet", "PENDING");
        let missing = LifecycleError::edge_not_permitted("pet", "IN_CUSTODY", "ADOPTED");
        assert_eq!(noop.kind(), "invalid_transition");
        assert_eq!(missing.kind(), "invalid_transition");
        assert!(noop.to_string().contains("already in state"));
        assert!(missing.to_string().contains("not permitted"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            LifecycleError::not_found("pet", Uuid::nil()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LifecycleError::forbidden("nope").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            LifecycleError::conflict("raced").status_code(),
            StatusCode::CONFLICT
        );
    }
}
