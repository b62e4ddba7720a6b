// Application layer - use cases and the repository seam
pub mod buffer;
pub mod chart_state;
pub mod error;
pub mod logger_repository;
pub mod poller;
pub mod selection;
pub mod session;
