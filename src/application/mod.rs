//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Complaint commands
    ClaimComplaintCommand, ClaimComplaintHandler, FileComplaintCommand, FileComplaintHandler,
    TransitionStatusCommand, TransitionStatusHandler, TransitionStatusResult,
    // Complaint queries
    GetComplaintHandler, GetComplaintQuery, GetStatusHistoryHandler, GetStatusHistoryQuery,
    HistoryEntry, ListComplaintsHandler, ListComplaintsQuery, ListScope, PageLimits,
    // Technician queries
    GetTechnicianDashboardHandler, GetTechnicianDashboardQuery,
    // Guards
    DuplicateSubmissionGuard,
};
