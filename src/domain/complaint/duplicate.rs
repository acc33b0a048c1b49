//! Duplicate-submission rule.
//!
//! Decides whether a status update repeats the most recent matching audit
//! entry. The lookup of that entry lives in the application layer; this
//! module holds only the window and the comparison.

use crate::domain::foundation::Timestamp;

use super::StatusEvent;

/// Default cooldown between equivalent submissions.
pub const DEFAULT_WINDOW_SECS: u64 = 120;

/// Default number of resolution-note characters compared against a prior reason.
pub const DEFAULT_PREFIX_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateRule {
    window_secs: u64,
    prefix_chars: usize,
}

impl Default for DuplicateRule {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECS, DEFAULT_PREFIX_CHARS)
    }
}

impl DuplicateRule {
    pub fn new(window_secs: u64, prefix_chars: usize) -> Self {
        Self {
            window_secs,
            prefix_chars,
        }
    }

    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }

    /// Earliest event time still inside the window ending at `now`.
    pub fn window_start(&self, now: Timestamp) -> Timestamp {
        now.minus_secs(self.window_secs)
    }

    /// True if `prior` was recorded inside the window ending at `now`.
    pub fn within_window(&self, prior: &StatusEvent, now: Timestamp) -> bool {
        !prior.created_at().is_before(&self.window_start(now))
    }

    /// Compare an incoming request against the latest event for the same
    /// (complaint, status, actor).
    ///
    /// `reason` is the effective reason, with the default already applied.
    pub fn is_repeat(
        &self,
        prior: &StatusEvent,
        reason: &str,
        resolution_notes: Option<&str>,
        now: Timestamp,
    ) -> bool {
        if !self.within_window(prior, now) {
            return false;
        }
        if prior.reason() == reason {
            return true;
        }
        match resolution_notes.filter(|notes| !notes.is_empty()) {
            Some(notes) => prior.reason().contains(self.notes_prefix(notes)),
            None => false,
        }
    }

    // Char-based so multi-byte notes never split a code point.
    fn notes_prefix<'a>(&self, notes: &'a str) -> &'a str {
        match notes.char_indices().nth(self.prefix_chars) {
            Some((byte_idx, _)) => &notes[..byte_idx],
            None => notes,
        }
    }
}
