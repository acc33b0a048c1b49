//! Technician dashboard counts.

use serde::{Deserialize, Serialize};

/// Derived, non-persisted view of a technician's workload.
///
/// `ready` is the global claimable pool; the rest are scoped to one technician.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub ready: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub pending: u64,
    pub total_assigned: u64,
}

impl DashboardCounts {
    pub fn new(ready: u64, in_progress: u64, completed: u64, pending: u64) -> Self {
        Self {
            ready,
            in_progress,
            completed,
            pending,
            total_assigned: in_progress + completed + pending,
        }
    }
}
