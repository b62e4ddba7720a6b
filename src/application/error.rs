// Error taxonomy for the dashboard core
use thiserror::Error;

/// Recoverable failures in the dashboard subsystem. None of these are fatal:
/// a fetch or decode failure leaves state untouched and the next poll
/// proceeds, so the worst case is a stale chart.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("request to '{endpoint}' failed: {source}")]
    Fetch {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not decode response from '{endpoint}': {reason}")]
    Decode { endpoint: String, reason: String },
}

impl DashboardError {
    pub fn decode(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}
