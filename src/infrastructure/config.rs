use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    /// Base URL of the data logger's REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollSettings {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// A status re-sync happens every this-many polls.
    #[serde(default = "default_status_stride")]
    pub status_stride: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    #[serde(default = "default_chart_width")]
    pub width: f64,
    #[serde(default = "default_chart_height")]
    pub height: f64,
    /// Render target id the chart is drawn into.
    #[serde(default = "default_target")]
    pub target: String,
    /// Where the serialized SVG is written after each redraw.
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

fn default_base_url() -> String {
    "http://localhost:8989".to_string()
}

fn default_interval_ms() -> u64 {
    2000
}

fn default_status_stride() -> u32 {
    10
}

fn default_chart_width() -> f64 {
    960.0
}

fn default_chart_height() -> f64 {
    540.0
}

fn default_target() -> String {
    "chart".to_string()
}

fn default_output_path() -> String {
    "chart.svg".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            status_stride: default_status_stride(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            target: default_target(),
            output_path: default_output_path(),
        }
    }
}

/// Load from `config/dashboard.{toml,...}` if present, then let
/// `DASHBOARD__*` environment variables override individual keys.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_device_contract() {
        let config = DashboardConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8989");
        assert_eq!(config.poll.interval_ms, 2000);
        assert_eq!(config.poll.status_stride, 10);
        assert_eq!(config.chart.target, "chart");
        assert_eq!(config.chart.output_path, "chart.svg");
    }

    #[test]
    fn test_partial_source_keeps_other_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "poll": { "interval_ms": 500 } }"#).unwrap();
        assert_eq!(config.poll.interval_ms, 500);
        assert_eq!(config.poll.status_stride, 10);
        assert_eq!(config.api.base_url, "http://localhost:8989");
    }
}
