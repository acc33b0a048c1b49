//! Complaint workflow tuning

use serde::Deserialize;

use crate::application::PageLimits;
use crate::domain::complaint::{DuplicateRule, DEFAULT_PREFIX_CHARS, DEFAULT_WINDOW_SECS};

use super::error::ValidationError;

/// Duplicate guard and pagination settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Cooldown between equivalent status submissions
    #[serde(default = "default_duplicate_window")]
    pub duplicate_window_secs: u64,

    /// Resolution-note characters compared against a prior reason
    #[serde(default = "default_prefix_chars")]
    pub resolution_prefix_chars: usize,

    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl WorkflowConfig {
    pub fn duplicate_rule(&self) -> DuplicateRule {
        DuplicateRule::new(self.duplicate_window_secs, self.resolution_prefix_chars)
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.duplicate_window_secs == 0 || self.duplicate_window_secs > 3600 {
            return Err(ValidationError::InvalidDuplicateWindow);
        }
        if self.resolution_prefix_chars == 0 {
            return Err(ValidationError::InvalidResolutionPrefix);
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ValidationError::InvalidPageSize);
        }
        Ok(())
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            duplicate_window_secs: default_duplicate_window(),
            resolution_prefix_chars: default_prefix_chars(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_duplicate_window() -> u64 {
    DEFAULT_WINDOW_SECS
}

fn default_prefix_chars() -> usize {
    DEFAULT_PREFIX_CHARS
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}
