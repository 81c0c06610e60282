// HTTP routes
pub mod adoptions;
pub mod custody;
pub mod escrows;
pub mod health;
pub mod pets;
pub mod users;

pub use adoptions::*;
pub use custody::*;
pub use escrows::*;
pub use health::*;
pub use pets::*;
pub use users::*;
