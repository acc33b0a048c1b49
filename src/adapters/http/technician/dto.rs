//! HTTP DTOs for technician endpoints.

use serde::Serialize;

use crate::domain::complaint::DashboardCounts;

/// Workload summary for the calling technician.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    /// Claimable complaints across the whole pool.
    pub ready: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub pending: u64,
    pub total_assigned: u64,
}

impl From<DashboardCounts> for DashboardResponse {
    fn from(counts: DashboardCounts) -> Self {
        Self {
            ready: counts.ready,
            in_progress: counts.in_progress,
            completed: counts.completed,
            pending: counts.pending,
            total_assigned: counts.total_assigned,
        }
    }
}
