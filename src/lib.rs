// Dashboard core for a REST-polled data logger: category selection,
// incremental reading merge, and SVG chart/sparkline rendering.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
