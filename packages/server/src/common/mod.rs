pub mod auth;
pub mod entity_ids;
pub mod errors;
pub mod id;

pub use entity_ids::*;
pub use errors::LifecycleError;
