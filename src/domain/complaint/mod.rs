//! Complaint module - lifecycle, claim and audit vocabulary.
//!
//! # Lifecycle
//!
//! A complaint is filed by a customer into the unassigned pool, claimed by
//! exactly one technician, then worked through `assigned`/`pending` until it
//! ends `completed` or `rejected`. Every accepted change produces one
//! `StatusEvent`.

mod aggregate;
mod dashboard;
mod duplicate;
mod errors;
mod policy;
mod status;
mod status_event;

pub use aggregate::{
    Complaint, ComplaintDraft, ComplaintUpdate, ServiceLocation, MAX_CATEGORY_LENGTH,
    MAX_TITLE_LENGTH,
};
pub use dashboard::DashboardCounts;
pub use duplicate::{DuplicateRule, DEFAULT_PREFIX_CHARS, DEFAULT_WINDOW_SECS};
pub use errors::{ComplaintError, ErrorKind};
pub use policy::{PolicyRow, TransitionPolicy};
pub use status::{ComplaintStatus, UnknownStatus};
pub use status_event::{default_reason, StatusEvent, CLAIM_REASON, FILED_REASON};
