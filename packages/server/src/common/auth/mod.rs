/// Authorization module.
///
/// Actors come in exactly two shapes: a visitor whose `{id, role}` was
/// verified by the upstream credential layer, and the internal `System`
/// actor used when a workflow drives the pet state machine itself. The gate
/// functions are pure: they look only at the entity, the requested edge and
/// the actor, never at storage.
mod actor;
mod gate;

pub use actor::{Actor, Role};
pub use gate::{authorize_owner, authorize_transition};
