//! Configuration for the dashboard series chart
//! Where the chart lives on the page, what it is titled, and how long the
//! server keeps a computed series around.

use chrono::FixedOffset;
use dashboard_chart_shared::AxisCaptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod parser;
pub mod validation;

pub use parser::{ConfigFormat, ConfigParser};
pub use validation::ConfigValidator;

/// Env var toggling the server-side series cache
pub const ENV_CACHE_ENABLED: &str = "DASHBOARD_CACHE_ENABLED";
/// Env var holding the series cache lifetime in seconds
pub const ENV_CACHE_TIMEOUT: &str = "DASHBOARD_CACHE_TIMEOUT";
/// Env var holding the UTC offset months are counted in
pub const ENV_UTC_OFFSET: &str = "DASHBOARD_UTC_OFFSET";

/// Errors raised while loading settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Every knob of the chart pipeline. Missing keys fall back to the
/// dashboard's defaults, so a partial file (or a partial JS object) is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Element id of the canvas the chart draws into
    pub surface_id: String,
    /// `window` property the server writes the series to
    pub data_global: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    /// chrono format string for the monthly date labels
    pub label_format: String,
    /// Offset such as `-03:00`; a request belongs to the month of its
    /// local timestamp at this offset
    pub utc_offset: String,
    pub cache_enabled: bool,
    pub cache_timeout_secs: u64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        let captions = AxisCaptions::default();
        Self {
            surface_id: "solicitacoes-series-chart".to_string(),
            data_global: "dashboardChartData".to_string(),
            x_axis_title: captions.x,
            y_axis_title: captions.y,
            label_format: "%Y/%m".to_string(),
            // America/Fortaleza, which keeps no daylight saving time
            utc_offset: "-03:00".to_string(),
            cache_enabled: true,
            cache_timeout_secs: 300,
        }
    }
}

impl ChartSettings {
    pub fn axis_captions(&self) -> AxisCaptions {
        AxisCaptions {
            x: self.x_axis_title.clone(),
            y: self.y_axis_title.clone(),
        }
    }

    pub fn cache_timeout(&self) -> Duration {
        Duration::from_secs(self.cache_timeout_secs)
    }

    pub fn utc_offset(&self) -> Result<FixedOffset> {
        self.utc_offset
            .trim()
            .parse()
            .map_err(|e| ConfigError::Parse(format!("utc_offset {:?}: {e}", self.utc_offset)))
    }

    /// Apply `DASHBOARD_*` overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_CACHE_ENABLED) {
            self.cache_enabled = parse_bool(&raw).ok_or_else(|| {
                ConfigError::Parse(format!("{ENV_CACHE_ENABLED}: not a boolean: {raw:?}"))
            })?;
            log::debug!("{ENV_CACHE_ENABLED} override: {}", self.cache_enabled);
        }

        if let Some(raw) = lookup(ENV_CACHE_TIMEOUT) {
            self.cache_timeout_secs = raw.trim().parse().map_err(|e| {
                ConfigError::Parse(format!("{ENV_CACHE_TIMEOUT}: {e}: {raw:?}"))
            })?;
            log::debug!("{ENV_CACHE_TIMEOUT} override: {}s", self.cache_timeout_secs);
        }

        if let Some(raw) = lookup(ENV_UTC_OFFSET) {
            self.utc_offset = raw.trim().to_string();
            log::debug!("{ENV_UTC_OFFSET} override: {}", self.utc_offset);
        }

        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
