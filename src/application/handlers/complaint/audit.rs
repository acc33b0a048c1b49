//! Audit append shared by every mutating handler.

use crate::domain::complaint::StatusEvent;
use crate::ports::StatusEventStore;

/// Append `event` after the complaint write already succeeded.
///
/// The complaint row is the source of truth, so a failed append does not
/// fail the operation. It is logged under the `audit_reconciliation` target
/// for out-of-band repair.
pub(crate) async fn append_or_reconcile(events: &dyn StatusEventStore, event: &StatusEvent) {
    if let Err(err) = events.append(event).await {
        tracing::error!(
            target: "audit_reconciliation",
            complaint_id = %event.complaint_id(),
            status = %event.status(),
            actor = ?event.actor_id().map(|a| a.as_str()),
            reason = event.reason(),
            error = %err,
            "complaint updated but status event was not recorded"
        );
    }
}
