mod custody;

pub use custody::{Custody, CustodyStatus};
