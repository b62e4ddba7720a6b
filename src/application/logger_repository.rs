// Repository trait for talking to the data logger's REST API
use crate::application::error::DashboardError;
use crate::domain::category::Category;
use crate::domain::logger::{LoggerConfig, LoggerStatus, SessionSummary};
use crate::domain::reading::Reading;
use async_trait::async_trait;

/// The injected fetch collaborator. The dashboard core only ever sees this
/// trait; the HTTP implementation lives in the infrastructure layer and
/// tests supply an in-memory fake.
#[async_trait]
pub trait LoggerRepository: Send + Sync {
    /// List the categories available in the current logging session.
    async fn categories(&self) -> Result<Vec<Category>, DashboardError>;

    /// Fetch readings. `since` of `None` asks for the recent cache in full;
    /// `Some(ts)` asks only for readings with a timestamp after `ts`.
    async fn readings_since(&self, since: Option<i64>) -> Result<Vec<Reading>, DashboardError>;

    /// Get the current logger status (connected/logging flags and errors).
    async fn status(&self) -> Result<LoggerStatus, DashboardError>;

    /// Ask the device to start a logging session. Returns the new status.
    async fn start(&self) -> Result<LoggerStatus, DashboardError>;

    /// Ask the device to stop the current logging session.
    async fn stop(&self) -> Result<LoggerStatus, DashboardError>;

    /// Read the device configuration.
    async fn config(&self) -> Result<LoggerConfig, DashboardError>;

    /// Write an updated device configuration.
    async fn save_config(&self, config: &LoggerConfig) -> Result<(), DashboardError>;

    /// List past logging sessions.
    async fn sessions(&self) -> Result<Vec<SessionSummary>, DashboardError>;
}
