//! ComplaintStatus enum for tracking the lifecycle of a complaint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a complaint.
///
/// ```text
/// filed ──► assigned ◄──► pending
///   │          │  │          │
///   │          │  └──► rejected ◄──┘
///   │          ▼
///   └──────► completed ──(record resolution)──► completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    /// Newly filed, sitting in the unassigned pool.
    #[default]
    Filed,
    /// Claimed by a technician, work in progress.
    Assigned,
    /// Work paused, still assigned.
    Pending,
    /// Work finished. Frozen once resolution notes are recorded.
    Completed,
    /// Closed without a resolution.
    Rejected,
}

impl ComplaintStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [ComplaintStatus; 5] = [
        ComplaintStatus::Filed,
        ComplaintStatus::Assigned,
        ComplaintStatus::Pending,
        ComplaintStatus::Completed,
        ComplaintStatus::Rejected,
    ];

    /// Stable lowercase name used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Filed => "filed",
            ComplaintStatus::Assigned => "assigned",
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::Completed => "completed",
            ComplaintStatus::Rejected => "rejected",
        }
    }

    /// Returns true while the complaint sits in the claimable pool.
    pub fn is_unassigned(&self) -> bool {
        matches!(self, ComplaintStatus::Filed)
    }
}

impl StateMachine for ComplaintStatus {
    // Completed keeps a self-edge so a resolution can be recorded after the fact.
    fn valid_transitions(&self) -> Vec<Self> {
        use ComplaintStatus::*;
        match self {
            Filed => vec![Assigned, Pending, Completed, Rejected],
            Assigned | Pending => vec![Assigned, Pending, Completed, Rejected],
            Completed => vec![Completed],
            Rejected => vec![],
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string is outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown complaint status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for ComplaintStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComplaintStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
