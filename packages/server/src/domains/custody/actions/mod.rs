//! Custody workflow actions.
//!
//! Temporary custody (fostering, medical holds) claims an AVAILABLE pet and
//! returns it when the agreement ends. Like adoptions, the custody row and
//! the pet row commit in one storage transaction.

mod end;
mod queries;
mod start;

pub use end::end_custody;
pub use queries::get_custody;
pub use start::start_custody;

use tracing::error;

use crate::domains::custody::events::CustodyEvent;
use crate::kernel::{BaseAuditSink as _, ServerDeps};

pub(crate) async fn record_custody_event(event: CustodyEvent, deps: &ServerDeps) {
    if let Err(e) = deps.audit.append(event.to_record()).await {
        error!(error = %e, event = event.event_type(), "failed to append custody audit record");
    }
}
