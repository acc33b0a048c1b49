//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod complaint;
pub mod technician;

pub use complaint::{
    ClaimComplaintCommand, ClaimComplaintHandler, DuplicateSubmissionGuard, FileComplaintCommand,
    FileComplaintHandler, GetComplaintHandler, GetComplaintQuery, GetStatusHistoryHandler,
    GetStatusHistoryQuery, HistoryEntry, ListComplaintsHandler, ListComplaintsQuery, ListScope,
    PageLimits, TransitionStatusCommand, TransitionStatusHandler, TransitionStatusResult,
};
pub use technician::{GetTechnicianDashboardHandler, GetTechnicianDashboardQuery};
