//! Complaint Desk - service complaint lifecycle and technician assignment.
//!
//! Customers file complaints into a shared pool; technicians claim them
//! one at a time and drive them to `completed` or `rejected`. Every change
//! is recorded in an append-only status history.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
