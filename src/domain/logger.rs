// Data logger status, configuration and session models

/// An error reported by the logger in a status response. Kept around so the
/// host UI can display and individually suppress them.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientError {
    pub id: i64,
    pub description: String,
}

/// Snapshot of the logger state returned by the `status`, `start` and `stop`
/// endpoints.
#[derive(Debug, Clone, Default)]
pub struct LoggerStatus {
    pub connected: bool,
    pub logging: bool,
    pub errors: Vec<ClientError>,
}

/// Device configuration, decoded from the key/value rows the `config`
/// endpoint returns.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerConfig {
    pub logger_ip: String,
    pub logger_port: u16,
    pub client_port: u16,
    pub sample_rate: u32,
    pub client_refresh_rate: u32,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            logger_ip: "192.168.1.20".to_string(),
            logger_port: 8989,
            client_port: 8988,
            sample_rate: 100,
            client_refresh_rate: 2,
        }
    }
}

/// A past or current logging session, as listed by the `sessions` endpoint.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub id: i64,
    /// Whether the session data can be downloaded from the device.
    pub available: bool,
    pub time_started: Option<i64>,
    pub time_stopped: Option<i64>,
    pub number_of_readings: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_idle() {
        let status = LoggerStatus::default();
        assert!(!status.connected);
        assert!(!status.logging);
        assert!(status.errors.is_empty());
    }
}
