//! Shared types for the dashboard series chart
//!
//! This crate holds everything both ends of the pipe agree on: the series
//! point the server embeds into the page, the fixed table that maps counters
//! to chart lines, and the charting library's configuration schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod chart_config;
pub mod errors;
pub mod outcome;

pub use chart_config::{build_chart_config, format_tooltip_label, AxisCaptions, ChartConfiguration};
pub use errors::{ChartError, ChartResult};
pub use outcome::InitOutcome;

/// One dated record of the four request counters.
///
/// Every field is optional: a point that lacks a field keeps the slot empty
/// and the chart receives `undefined` for it, never a substituted zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sucesso: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub falha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processando: Option<f64>,
}

impl SeriesPoint {
    pub fn new(date: impl Into<String>, total: f64, sucesso: f64, falha: f64, processando: f64) -> Self {
        Self {
            date: Some(date.into()),
            total: Some(total),
            sucesso: Some(sucesso),
            falha: Some(falha),
            processando: Some(processando),
        }
    }

    /// Read a point out of an arbitrary JSON value without failing.
    ///
    /// Values are read the way the chart's linear scale and category labels
    /// read them: numeric strings count as numbers and scalar dates are
    /// printed as text. What the chart could not plot stays empty.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let counter = |field: Counter| object.get(field.field()).and_then(counter_value);

        Self {
            date: object.get("date").and_then(date_label),
            total: counter(Counter::Total),
            sucesso: counter(Counter::Sucesso),
            falha: counter(Counter::Falha),
            processando: counter(Counter::Processando),
        }
    }

    pub fn counter(&self, counter: Counter) -> Option<f64> {
        match counter {
            Counter::Total => self.total,
            Counter::Sucesso => self.sucesso,
            Counter::Falha => self.falha,
            Counter::Processando => self.processando,
        }
    }
}

fn counter_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|n: &f64| n.is_finite())
}

fn date_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Decode the page-global series value.
///
/// `null` means "not provided" and decodes to an empty series. Anything that
/// is not an array is reported as malformed so the caller can log it.
pub fn decode_series(value: &Value) -> ChartResult<Vec<SeriesPoint>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(points) => Ok(points.iter().map(SeriesPoint::from_json).collect()),
        other => Err(ChartError::MalformedSeries {
            found: json_kind(other).to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The four counters carried by every series point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Counter {
    Total,
    Sucesso,
    Falha,
    Processando,
}

impl Counter {
    pub fn field(&self) -> &'static str {
        match self {
            Counter::Total => "total",
            Counter::Sucesso => "sucesso",
            Counter::Falha => "falha",
            Counter::Processando => "processando",
        }
    }
}

/// How one counter maps onto one chart line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetDescriptor {
    pub label: &'static str,
    pub counter: Counter,
    pub color: &'static str,
}

/// Fixed dataset table. Its length and order never depend on the data.
pub const DATASETS: [DatasetDescriptor; 4] = [
    DatasetDescriptor {
        label: "Total",
        counter: Counter::Total,
        color: "#417690",
    },
    DatasetDescriptor {
        label: "Sucesso",
        counter: Counter::Sucesso,
        color: "#155724",
    },
    DatasetDescriptor {
        label: "Falha",
        counter: Counter::Falha,
        color: "#721c24",
    },
    DatasetDescriptor {
        label: "Processando",
        counter: Counter::Processando,
        color: "#856404",
    },
];
