//! Time source port.
//!
//! Mutation code never reads the system clock directly; it asks the
//! injected `Clock`, so tests can move time across the duplicate window.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
