mod pet;

pub use pet::{Pet, PetDetails, PetStatus};
