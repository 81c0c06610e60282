// PawHaven - Adoption Platform API Core
//
// Backend for tracking adoptable pets through their lifecycle
// (available -> pending -> adopted, with temporary custody), plus the
// adoption and custody workflows that drive those transitions.
//
// Layout follows the platform convention: pure decision logic lives in
// domains/*/machines, storage-touching code in domains/*/actions, and
// infrastructure behind Base* traits in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
