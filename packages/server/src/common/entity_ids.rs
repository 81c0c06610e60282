//! Typed ID definitions for all domain entities.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Pet entities.
pub struct Pet;

/// Marker type for User entities.
pub struct User;

/// Marker type for Adoption entities.
pub struct Adoption;

/// Marker type for Custody entities.
pub struct Custody;

/// Marker type for Escrow entities.
pub struct Escrow;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Pet entities.
pub type PetId = Id<Pet>;

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Adoption entities.
pub type AdoptionId = Id<Adoption>;

/// Typed ID for Custody entities.
pub type CustodyId = Id<Custody>;

/// Typed ID for Escrow entities.
pub type EscrowId = Id<Escrow>;
