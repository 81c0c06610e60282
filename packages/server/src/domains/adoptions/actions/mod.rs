//! Adoption workflow actions.
//!
//! Advancing an adoption drives the pet state machine in lockstep. The pet
//! edge is checked against the transition policy as a system-initiated
//! change, and the adoption row and pet row are committed by the store in
//! one transaction: if the pet side fails, the adoption status does not
//! move either.

mod approve;
mod complete;
mod queries;
mod reject;
mod request;

pub use approve::approve_adoption;
pub use complete::complete_adoption;
pub use queries::get_adoption;
pub use reject::reject_adoption;
pub use request::request_adoption;

use tracing::error;

use crate::domains::adoptions::events::AdoptionEvent;
use crate::kernel::{BaseAuditSink as _, ServerDeps};

/// Best-effort append of a workflow audit record.
pub(crate) async fn record_adoption_event(event: AdoptionEvent, deps: &ServerDeps) {
    if let Err(e) = deps.audit.append(event.to_record()).await {
        error!(error = %e, event = event.event_type(), "failed to append adoption audit record");
    }
}
