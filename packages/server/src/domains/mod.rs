pub mod adoptions;
pub mod custody;
pub mod escrow;
pub mod pets;
pub mod users;
