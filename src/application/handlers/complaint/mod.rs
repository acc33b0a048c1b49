//! Complaint command and query handlers.

mod audit;
mod claim_complaint;
mod duplicate_guard;
mod file_complaint;
mod get_complaint;
mod get_status_history;
mod list_complaints;
mod transition_status;

pub use claim_complaint::{ClaimComplaintCommand, ClaimComplaintHandler};
pub use duplicate_guard::DuplicateSubmissionGuard;
pub use file_complaint::{FileComplaintCommand, FileComplaintHandler};
pub use get_complaint::{GetComplaintHandler, GetComplaintQuery};
pub use get_status_history::{GetStatusHistoryHandler, GetStatusHistoryQuery, HistoryEntry};
pub use list_complaints::{
    ListComplaintsHandler, ListComplaintsQuery, ListScope, PageLimits, QUEUE_STATUSES,
};
pub use transition_status::{
    TransitionStatusCommand, TransitionStatusHandler, TransitionStatusResult,
};
