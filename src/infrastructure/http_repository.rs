// HTTP repository implementation against the data logger's REST API
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::application::error::DashboardError;
use crate::application::logger_repository::LoggerRepository;
use crate::domain::category::{Category, CategoryId};
use crate::domain::logger::{ClientError, LoggerConfig, LoggerStatus, SessionSummary};
use crate::domain::reading::Reading;

/// Timestamps on the wire look like "13-01-2014 12:59:05.120".
const WIRE_DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S%.f";

#[derive(Debug, Clone)]
pub struct HttpLoggerRepository {
    base_url: String,
    client: reqwest::Client,
}

/// List endpoints wrap their rows in a `{ "data": [...] }` envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ReadingRow {
    #[serde(rename = "categoryId")]
    category_id: i64,
    #[serde(rename = "timeLogged")]
    time_logged: String,
    /// Older firmware serializes values as strings, newer as numbers.
    value: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    id: i64,
    #[serde(rename = "variableName")]
    variable_name: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    connected: bool,
    #[serde(default)]
    logging: bool,
    #[serde(default)]
    errors: Vec<ErrorRow>,
}

#[derive(Debug, Deserialize)]
struct ErrorRow {
    id: i64,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ConfigRow {
    key: String,
    value: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SessionRow {
    id: i64,
    #[serde(default)]
    available: bool,
    #[serde(rename = "timeStarted")]
    time_started: Option<String>,
    #[serde(rename = "timeStopped")]
    time_stopped: Option<String>,
    #[serde(rename = "numberOfReadings", default)]
    number_of_readings: u64,
}

#[derive(Debug, Serialize)]
struct ConfigPayload<'a> {
    #[serde(rename = "loggerIp")]
    logger_ip: &'a str,
    #[serde(rename = "loggerPort")]
    logger_port: u16,
    #[serde(rename = "clientPort")]
    client_port: u16,
    #[serde(rename = "sampleRate")]
    sample_rate: u32,
    #[serde(rename = "clientRefreshRate")]
    client_refresh_rate: u32,
}

impl HttpLoggerRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, DashboardError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| DashboardError::Fetch {
                endpoint: endpoint.to_string(),
                source,
            })?;

        response
            .json::<T>()
            .await
            .map_err(|e| DashboardError::decode(endpoint, e.to_string()))
    }
}

#[async_trait]
impl LoggerRepository for HttpLoggerRepository {
    async fn categories(&self) -> Result<Vec<Category>, DashboardError> {
        let envelope: Envelope<CategoryRow> = self.get_json("categories").await?;
        Ok(envelope
            .data
            .into_iter()
            .map(|row| Category::new(CategoryId(row.id), row.variable_name))
            .collect())
    }

    async fn readings_since(&self, since: Option<i64>) -> Result<Vec<Reading>, DashboardError> {
        let endpoint = match since {
            Some(ts) => format!("cache/{ts}"),
            None => "cache".to_string(),
        };
        let envelope: Envelope<ReadingRow> = self.get_json(&endpoint).await?;

        // Malformed rows are skipped so one bad sample cannot poison a poll.
        let mut readings = Vec::with_capacity(envelope.data.len());
        for row in envelope.data {
            match map_reading(&row) {
                Some(reading) => readings.push(reading),
                None => {
                    tracing::warn!(
                        category_id = row.category_id,
                        time_logged = %row.time_logged,
                        "skipping reading with unparseable timestamp or value"
                    );
                }
            }
        }
        Ok(readings)
    }

    async fn status(&self) -> Result<LoggerStatus, DashboardError> {
        let response: StatusResponse = self.get_json("status").await?;
        Ok(map_status(response))
    }

    async fn start(&self) -> Result<LoggerStatus, DashboardError> {
        let response: StatusResponse = self.get_json("start").await?;
        Ok(map_status(response))
    }

    async fn stop(&self) -> Result<LoggerStatus, DashboardError> {
        let response: StatusResponse = self.get_json("stop").await?;
        Ok(map_status(response))
    }

    async fn config(&self) -> Result<LoggerConfig, DashboardError> {
        let envelope: Envelope<ConfigRow> = self.get_json("config").await?;
        Ok(map_config(&envelope.data))
    }

    async fn save_config(&self, config: &LoggerConfig) -> Result<(), DashboardError> {
        let payload = ConfigPayload {
            logger_ip: &config.logger_ip,
            logger_port: config.logger_port,
            client_port: config.client_port,
            sample_rate: config.sample_rate,
            client_refresh_rate: config.client_refresh_rate,
        };
        let url = format!("{}/config", self.base_url);
        self.client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| DashboardError::Fetch {
                endpoint: "config".to_string(),
                source,
            })?;
        Ok(())
    }

    async fn sessions(&self) -> Result<Vec<SessionSummary>, DashboardError> {
        let envelope: Envelope<SessionRow> = self.get_json("sessions").await?;
        Ok(envelope
            .data
            .into_iter()
            .map(|row| SessionSummary {
                id: row.id,
                available: row.available,
                time_started: row.time_started.as_deref().and_then(parse_wire_timestamp),
                time_stopped: row.time_stopped.as_deref().and_then(parse_wire_timestamp),
                number_of_readings: row.number_of_readings,
            })
            .collect())
    }
}

fn map_reading(row: &ReadingRow) -> Option<Reading> {
    let timestamp = parse_wire_timestamp(&row.time_logged)?;
    let value = value_as_f64(&row.value)?;
    Some(Reading::new(CategoryId(row.category_id), timestamp, value))
}

fn map_status(response: StatusResponse) -> LoggerStatus {
    LoggerStatus {
        connected: response.connected,
        logging: response.logging,
        errors: response
            .errors
            .into_iter()
            .map(|e| ClientError {
                id: e.id,
                description: e.description,
            })
            .collect(),
    }
}

fn map_config(rows: &[ConfigRow]) -> LoggerConfig {
    let mut config = LoggerConfig::default();
    for row in rows {
        match row.key.as_str() {
            "loggerIp" => {
                if let Some(ip) = row.value.as_str() {
                    config.logger_ip = ip.to_string();
                }
            }
            "loggerPort" => {
                if let Some(port) = value_as_u32(&row.value) {
                    config.logger_port = port as u16;
                }
            }
            "clientPort" => {
                if let Some(port) = value_as_u32(&row.value) {
                    config.client_port = port as u16;
                }
            }
            "sampleRate" => {
                if let Some(rate) = value_as_u32(&row.value) {
                    config.sample_rate = rate;
                }
            }
            "clientRefreshRate" => {
                if let Some(rate) = value_as_u32(&row.value) {
                    config.client_refresh_rate = rate;
                }
            }
            other => tracing::debug!(key = other, "ignoring unknown config key"),
        }
    }
    config
}

/// Parse a wire timestamp into epoch milliseconds. Timestamps are naive and
/// interpreted as UTC; the fractional part is optional.
fn parse_wire_timestamp(raw: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(raw, WIRE_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc().timestamp_millis())
}

fn value_as_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn value_as_u32(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().map(|v| v as u32),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_timestamp() {
        let millis = parse_wire_timestamp("13-01-2014 12:59:05.120").unwrap();
        assert_eq!(millis, 1_389_617_945_120);

        // The fraction is optional.
        let whole = parse_wire_timestamp("13-01-2014 12:59:05").unwrap();
        assert_eq!(whole, 1_389_617_945_000);

        assert!(parse_wire_timestamp("not a date").is_none());
    }

    #[test]
    fn test_map_reading_accepts_string_and_numeric_values() {
        let row: ReadingRow = serde_json::from_value(serde_json::json!({
            "id": 1,
            "categoryId": 2,
            "timeLogged": "13-01-2014 12:59:05.120",
            "value": "0.56"
        }))
        .unwrap();
        let reading = map_reading(&row).unwrap();
        assert_eq!(reading.category_id, CategoryId(2));
        assert_eq!(reading.value, 0.56);

        let row: ReadingRow = serde_json::from_value(serde_json::json!({
            "categoryId": 2,
            "timeLogged": "13-01-2014 12:59:06.0",
            "value": 0.59
        }))
        .unwrap();
        assert_eq!(map_reading(&row).unwrap().value, 0.59);
    }

    #[test]
    fn test_map_reading_rejects_garbage() {
        let row: ReadingRow = serde_json::from_value(serde_json::json!({
            "categoryId": 2,
            "timeLogged": "yesterday-ish",
            "value": 0.5
        }))
        .unwrap();
        assert!(map_reading(&row).is_none());

        let row: ReadingRow = serde_json::from_value(serde_json::json!({
            "categoryId": 2,
            "timeLogged": "13-01-2014 12:59:05.120",
            "value": null
        }))
        .unwrap();
        assert!(map_reading(&row).is_none());
    }

    #[test]
    fn test_map_config_reads_key_value_rows() {
        let rows: Vec<ConfigRow> = serde_json::from_value(serde_json::json!([
            { "id": 1, "key": "loggerPort", "value": "8989" },
            { "id": 2, "key": "loggerIp", "value": "10.0.0.5" },
            { "id": 3, "key": "clientPort", "value": 8988 },
            { "id": 4, "key": "sampleRate", "value": "50" },
            { "id": 5, "key": "clientRefreshRate", "value": "2" },
            { "id": 6, "key": "someFutureKey", "value": "x" }
        ]))
        .unwrap();

        let config = map_config(&rows);
        assert_eq!(config.logger_ip, "10.0.0.5");
        assert_eq!(config.logger_port, 8989);
        assert_eq!(config.client_port, 8988);
        assert_eq!(config.sample_rate, 50);
        assert_eq!(config.client_refresh_rate, 2);
    }

    #[test]
    fn test_envelope_tolerates_missing_data_field() {
        let envelope: Envelope<CategoryRow> = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let repo = HttpLoggerRepository::new("http://localhost:8989/");
        assert_eq!(repo.base_url, "http://localhost:8989");
    }
}
