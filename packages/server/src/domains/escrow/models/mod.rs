mod escrow;

pub use escrow::{Escrow, EscrowStatus};
