use serde::Deserialize;
use thiserror::Error;

use crate::domain::downsample::DownsampleStrategy;
use crate::domain::point::ChartKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Read(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StreamConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_max_data_points")]
    pub max_data_points: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_max_render_points")]
    pub max_render_points: usize,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_chart")]
    pub chart: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_initial_points")]
    pub initial_points: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AggregationConfig {
    /// Bucket width for time-window averaging; disabled when absent.
    #[serde(default)]
    pub window_ms: Option<i64>,
}

fn default_tick_interval_ms() -> u64 {
    1_000
}

fn default_max_data_points() -> usize {
    100
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    600.0
}

fn default_padding() -> f64 {
    20.0
}

fn default_max_render_points() -> usize {
    200
}

fn default_strategy() -> String {
    "lttb".to_string()
}

fn default_chart() -> String {
    "line".to_string()
}

fn default_categories() -> Vec<String> {
    vec![
        "sensor-a".to_string(),
        "sensor-b".to_string(),
        "sensor-c".to_string(),
    ]
}

fn default_initial_points() -> usize {
    20
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_data_points: default_max_data_points(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
            max_render_points: default_max_render_points(),
            strategy: default_strategy(),
            chart: default_chart(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            seed: None,
            initial_points: default_initial_points(),
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stream.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "stream.tick_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.stream.max_data_points == 0 {
            return Err(ConfigError::Invalid(
                "stream.max_data_points must be at least 1".to_string(),
            ));
        }
        if self.render.max_render_points == 0 {
            return Err(ConfigError::Invalid(
                "render.max_render_points must be at least 1".to_string(),
            ));
        }
        if self.render.width <= 0.0 || self.render.height <= 0.0 {
            return Err(ConfigError::Invalid(
                "render.width and render.height must be positive".to_string(),
            ));
        }
        if self.render.padding < 0.0
            || 2.0 * self.render.padding >= self.render.width.min(self.render.height)
        {
            return Err(ConfigError::Invalid(
                "render.padding must be non-negative and fit the surface".to_string(),
            ));
        }
        if self.source.categories.is_empty() {
            return Err(ConfigError::Invalid(
                "source.categories must not be empty".to_string(),
            ));
        }
        if let Some(window_ms) = self.aggregation.window_ms
            && window_ms <= 0
        {
            return Err(ConfigError::Invalid(
                "aggregation.window_ms must be positive".to_string(),
            ));
        }
        self.strategy()?;
        self.chart_kind()?;
        Ok(())
    }

    pub fn strategy(&self) -> Result<DownsampleStrategy, ConfigError> {
        match self.render.strategy.as_str() {
            "stride" => Ok(DownsampleStrategy::Stride),
            "lttb" => Ok(DownsampleStrategy::Lttb),
            other => Err(ConfigError::Invalid(format!(
                "unknown downsample strategy: {other}"
            ))),
        }
    }

    pub fn chart_kind(&self) -> Result<ChartKind, ConfigError> {
        match self.render.chart.as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "scatter" => Ok(ChartKind::Scatter),
            "heatmap" => Ok(ChartKind::Heatmap),
            other => Err(ConfigError::Invalid(format!("unknown chart kind: {other}"))),
        }
    }
}

/// Load `config/dashboard.toml` (optional) plus `DASHBOARD_*` environment
/// overrides, then validate.
pub fn load_dashboard_config() -> Result<DashboardConfig, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    let dashboard: DashboardConfig = settings.try_deserialize()?;
    dashboard.validate()?;
    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(raw: &str) -> DashboardConfig {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .expect("build config")
            .try_deserialize()
            .expect("deserialize config")
    }

    #[test]
    fn empty_config_uses_defaults() {
        let dashboard = from_toml("");

        assert_eq!(dashboard.stream.tick_interval_ms, 1_000);
        assert_eq!(dashboard.stream.max_data_points, 100);
        assert_eq!(dashboard.render.max_render_points, 200);
        assert_eq!(dashboard.strategy().unwrap(), DownsampleStrategy::Lttb);
        assert_eq!(dashboard.chart_kind().unwrap(), ChartKind::Line);
        assert!(dashboard.aggregation.window_ms.is_none());
        assert!(dashboard.validate().is_ok());
    }

    #[test]
    fn sections_override_defaults() {
        let dashboard = from_toml(
            r#"
            [stream]
            tick_interval_ms = 250
            max_data_points = 500

            [render]
            strategy = "stride"
            chart = "heatmap"

            [aggregation]
            window_ms = 5000
            "#,
        );

        assert_eq!(dashboard.stream.tick_interval_ms, 250);
        assert_eq!(dashboard.stream.max_data_points, 500);
        assert_eq!(dashboard.strategy().unwrap(), DownsampleStrategy::Stride);
        assert_eq!(dashboard.chart_kind().unwrap(), ChartKind::Heatmap);
        assert_eq!(dashboard.aggregation.window_ms, Some(5_000));
        assert!(dashboard.validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let dashboard = from_toml("[stream]\nmax_data_points = 0\n");
        assert!(matches!(
            dashboard.validate(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let dashboard = from_toml("[render]\nstrategy = \"nearest\"\n");
        assert!(dashboard.validate().is_err());
    }

    #[test]
    fn non_positive_aggregation_window_is_rejected() {
        let dashboard = from_toml("[aggregation]\nwindow_ms = 0\n");
        assert!(dashboard.validate().is_err());
    }
}
