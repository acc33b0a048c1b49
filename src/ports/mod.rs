//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `ComplaintRepository` - Complaint records, the conditional claim write, list and count queries
//! - `StatusEventStore` - Append-only audit trail
//! - `UserDirectory` - Public profile lookup for history annotation
//!
//! ## Environment Ports
//!
//! - `Clock` - Injected time source
//! - `SessionValidator` - Bearer token validation

mod clock;
mod complaint_repository;
mod session_validator;
mod status_event_store;
mod user_directory;

pub use clock::Clock;
pub use complaint_repository::{
    ClaimOutcome, ComplaintPage, ComplaintRepository, ExpectedState, ListOptions, UpdateOutcome,
};
pub use session_validator::SessionValidator;
pub use status_event_store::StatusEventStore;
pub use user_directory::{PublicProfile, UserDirectory};
