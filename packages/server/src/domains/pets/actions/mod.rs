//! Pet lifecycle actions. The only code that writes pet status.

mod listing;
mod queries;
mod transition;

pub use listing::{create_pet, update_pet_details};
pub use queries::{allowed_targets, describe_pet, get_pet, TransitionInfo};
pub use transition::{transition_pet, transition_pet_internal};

pub(crate) use transition::{check_transition, record_status_change};
