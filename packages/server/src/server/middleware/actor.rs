//! Actor extraction from request headers.
//!
//! The platform gateway terminates credentials and forwards the verified
//! identity as `x-actor-id` and `x-actor-role` headers; this service trusts
//! them as-is. The `System` actor never arrives over HTTP - it exists only
//! inside workflow code.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::common::auth::{Actor, Role};
use crate::common::{LifecycleError, UserId};

const ACTOR_ID_HEADER: &str = "x-actor-id";
const ACTOR_ROLE_HEADER: &str = "x-actor-role";

fn actor_from_parts(parts: &Parts) -> Result<Option<Actor>, LifecycleError> {
    let id_header = parts.headers.get(ACTOR_ID_HEADER);
    let role_header = parts.headers.get(ACTOR_ROLE_HEADER);

    let (id_header, role_header) = match (id_header, role_header) {
        (None, None) => return Ok(None),
        (Some(id), Some(role)) => (id, role),
        _ => {
            return Err(LifecycleError::forbidden(
                "both x-actor-id and x-actor-role headers are required",
            ))
        }
    };

    let id = id_header
        .to_str()
        .ok()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| LifecycleError::forbidden("x-actor-id is not a valid UUID"))?;

    let role: Role = role_header
        .to_str()
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| LifecycleError::forbidden("x-actor-role is not a recognized role"))?;

    Ok(Some(Actor::visitor(UserId::from_uuid(id), role)))
}

/// A verified actor. Rejects the request with 403 when the identity
/// headers are absent or malformed.
#[derive(Debug, Clone)]
pub struct ActorContext(pub Actor);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ActorContext {
    type Rejection = LifecycleError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match actor_from_parts(parts)? {
            Some(actor) => Ok(ActorContext(actor)),
            None => Err(LifecycleError::forbidden(
                "a signed-in actor is required for this operation",
            )),
        }
    }
}

/// An optional actor for read endpoints. Absent headers yield `None`;
/// malformed headers are still rejected.
#[derive(Debug, Clone)]
pub struct MaybeActor(pub Option<Actor>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for MaybeActor {
    type Rejection = LifecycleError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeActor(actor_from_parts(parts)?))
    }
}
