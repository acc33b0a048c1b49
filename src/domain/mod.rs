//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, roles, errors)
//! - `complaint` - Complaint aggregate, lifecycle policy, audit events and dashboard counts

pub mod complaint;
pub mod foundation;
