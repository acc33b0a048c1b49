//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, auth types and error types
//! that form the vocabulary of the complaint desk domain.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ComplaintId, StatusEventId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
