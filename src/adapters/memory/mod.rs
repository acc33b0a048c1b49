//! In-memory adapters for tests and local development.

mod complaint_repository;
mod status_event_store;
mod user_directory;

pub use complaint_repository::InMemoryComplaintRepository;
pub use status_event_store::InMemoryStatusEventStore;
pub use user_directory::InMemoryUserDirectory;
