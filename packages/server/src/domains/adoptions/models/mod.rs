mod adoption;

pub use adoption::{Adoption, AdoptionStatus};
