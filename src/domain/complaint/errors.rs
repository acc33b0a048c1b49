//! Complaint operation errors.

use thiserror::Error;

use crate::domain::foundation::{ComplaintId, DomainError, ErrorCode, ValidationError};

use super::ComplaintStatus;

/// Coarse error category, mapped to a transport status at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    InvalidStatus,
    Conflict,
    Validation,
    StoreUnavailable,
}

/// Errors returned by complaint command and query handlers.
#[derive(Debug, Clone, Error)]
pub enum ComplaintError {
    #[error("Complaint not found: {0}")]
    NotFound(ComplaintId),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Complaint is already being worked on")]
    AlreadyInProgress,

    #[error("Complaint has already been claimed by another technician")]
    AlreadyClaimed,

    #[error("This update was just submitted. Please wait before resubmitting.")]
    DuplicateSubmission,

    #[error("Complaint changed while this update was being applied. Reload and try again.")]
    ConcurrentUpdate,

    #[error("Complaint is completed and its resolution is recorded")]
    Finalized,

    #[error("Cannot move complaint from {from} to {to}")]
    TransitionNotAllowed {
        from: ComplaintStatus,
        to: ComplaintStatus,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ComplaintError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ComplaintError::NotFound(_) => ErrorKind::NotFound,
            ComplaintError::Forbidden(_) => ErrorKind::Forbidden,
            ComplaintError::InvalidStatus(_) => ErrorKind::InvalidStatus,
            ComplaintError::AlreadyInProgress
            | ComplaintError::AlreadyClaimed
            | ComplaintError::DuplicateSubmission
            | ComplaintError::ConcurrentUpdate
            | ComplaintError::Finalized
            | ComplaintError::TransitionNotAllowed { .. } => ErrorKind::Conflict,
            ComplaintError::Validation(_) => ErrorKind::Validation,
            ComplaintError::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
        }
    }

    /// Stable machine-readable code for response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ComplaintError::NotFound(_) => "COMPLAINT_NOT_FOUND",
            ComplaintError::Forbidden(_) => "FORBIDDEN",
            ComplaintError::InvalidStatus(_) => "INVALID_STATUS",
            ComplaintError::AlreadyInProgress => "ALREADY_IN_PROGRESS",
            ComplaintError::AlreadyClaimed => "ALREADY_CLAIMED",
            ComplaintError::DuplicateSubmission => "DUPLICATE_SUBMISSION",
            ComplaintError::ConcurrentUpdate => "CONCURRENT_UPDATE",
            ComplaintError::Finalized => "COMPLAINT_FINALIZED",
            ComplaintError::TransitionNotAllowed { .. } => "TRANSITION_NOT_ALLOWED",
            ComplaintError::Validation(_) => "VALIDATION_FAILED",
            ComplaintError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

impl From<ValidationError> for ComplaintError {
    fn from(err: ValidationError) -> Self {
        ComplaintError::Validation(err.to_string())
    }
}

impl From<DomainError> for ComplaintError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => ComplaintError::Validation(err.message),
            ErrorCode::Forbidden | ErrorCode::Unauthorized => ComplaintError::Forbidden(err.message),
            ErrorCode::InvalidStateTransition => ComplaintError::InvalidStatus(err.message),
            ErrorCode::ComplaintNotFound => match err
                .details
                .get("complaint_id")
                .and_then(|id| id.parse().ok())
            {
                Some(id) => ComplaintError::NotFound(id),
                None => ComplaintError::StoreUnavailable(err.message),
            },
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                ComplaintError::StoreUnavailable(err.message)
            }
        }
    }
}
