pub mod audit;
pub mod deps;
pub mod store;
pub mod test_dependencies;
pub mod traits;

pub use audit::{AuditRecord, BaseAuditSink, EventRow, PgAuditSink};
pub use deps::ServerDeps;
pub use store::PgShelterStore;
pub use test_dependencies::{MemoryShelterStore, RecordingAuditSink, TestDependencies};
pub use traits::{BaseShelterStore, PetStatusChange};
