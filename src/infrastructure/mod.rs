// Infrastructure layer - external adapters
pub mod config;
pub mod http_repository;
