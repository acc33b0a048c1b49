//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Bearer token validation (JWT, mock)
//! - `clock` - System and manual time sources
//! - `http` - axum routes, DTOs and auth middleware
//! - `memory` - In-memory stores for tests and local runs
//! - `postgres` - sqlx-backed stores

pub mod auth;
pub mod clock;
pub mod http;
pub mod memory;
pub mod postgres;
