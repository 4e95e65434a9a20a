//! Chart configuration schema handed to the charting library
//!
//! Field names serialize to the camelCase keys the library expects, so the
//! same value can go through `serde_json` (tests, server-side inspection) or
//! `serde-wasm-bindgen` (the browser).

use serde::{Deserialize, Serialize};

use crate::{SeriesPoint, DATASETS};

/// Curve interpolation tension for every line
pub const LINE_TENSION: f32 = 0.25;
/// Point marker radius for every line
pub const POINT_RADIUS: u32 = 2;

/// Axis titles shown under the x-axis and beside the y-axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisCaptions {
    pub x: String,
    pub y: String,
}

impl Default for AxisCaptions {
    fn default() -> Self {
        Self {
            x: "Data".to_string(),
            y: "Solicitações".to_string(),
        }
    }
}

/// Chart kinds the dashboard draws
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

/// Complete `{type, data, options}` object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartConfiguration {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<Option<String>>,
    pub datasets: Vec<LineDataset>,
}

/// One charted line: a counter across all dates plus its style
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineDataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub border_color: String,
    pub background_color: String,
    pub tension: f32,
    pub point_radius: u32,
    pub fill: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub interaction: InteractionOptions,
    pub plugins: PluginOptions,
    pub scales: ScaleOptions,
}

/// Hover behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionOptions {
    pub mode: InteractionMode,
    pub intersect: bool,
}

/// `Index` shares the hover across every dataset at one x-position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    Index,
    Nearest,
    Point,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginOptions {
    pub legend: LegendOptions,
    pub tooltip: TooltipOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegendOptions {
    pub display: bool,
}

/// Tooltip options. The label callback is a JS function and is attached by
/// the browser bridge after serialization; see [`format_tooltip_label`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TooltipOptions {
    pub callbacks: TooltipCallbacks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TooltipCallbacks {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScaleOptions {
    pub x: AxisOptions,
    pub y: AxisOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    pub title: AxisTitle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

impl AxisTitle {
    fn shown(text: &str) -> Self {
        Self {
            display: true,
            text: text.to_string(),
        }
    }
}

impl ChartOptions {
    pub fn dashboard(captions: &AxisCaptions) -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            interaction: InteractionOptions {
                mode: InteractionMode::Index,
                intersect: false,
            },
            plugins: PluginOptions {
                legend: LegendOptions { display: true },
                tooltip: TooltipOptions::default(),
            },
            scales: ScaleOptions {
                x: AxisOptions {
                    begin_at_zero: None,
                    title: AxisTitle::shown(&captions.x),
                },
                y: AxisOptions {
                    begin_at_zero: Some(true),
                    title: AxisTitle::shown(&captions.y),
                },
            },
        }
    }
}

/// Map a series into the line chart configuration.
///
/// Labels and every dataset have exactly `series.len()` entries, in series
/// order. An absent counter stays `None` in its dataset.
pub fn build_chart_config(series: &[SeriesPoint], captions: &AxisCaptions) -> ChartConfiguration {
    let labels = series.iter().map(|point| point.date.clone()).collect();

    let datasets = DATASETS
        .iter()
        .map(|descriptor| LineDataset {
            label: descriptor.label.to_string(),
            data: series
                .iter()
                .map(|point| point.counter(descriptor.counter))
                .collect(),
            border_color: descriptor.color.to_string(),
            background_color: descriptor.color.to_string(),
            tension: LINE_TENSION,
            point_radius: POINT_RADIUS,
            fill: false,
        })
        .collect();

    ChartConfiguration {
        kind: ChartKind::Line,
        data: ChartData { labels, datasets },
        options: ChartOptions::dashboard(captions),
    }
}

/// Tooltip line for one dataset at the hovered x-position
pub fn format_tooltip_label(dataset_label: &str, formatted_value: &str) -> String {
    format!("{dataset_label}: {formatted_value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_series() -> Vec<SeriesPoint> {
        vec![
            SeriesPoint::new("2024/01", 10.0, 8.0, 1.0, 1.0),
            SeriesPoint::new("2024/02", 4.0, 2.0, 2.0, 0.0),
            SeriesPoint::new("2024/03", 7.0, 7.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_labels_follow_series_order() {
        let config = build_chart_config(&sample_series(), &AxisCaptions::default());

        assert_eq!(
            config.data.labels,
            vec![
                Some("2024/01".to_string()),
                Some("2024/02".to_string()),
                Some("2024/03".to_string())
            ]
        );
    }

    #[test]
    fn test_four_datasets_of_series_length() {
        let series = sample_series();
        let config = build_chart_config(&series, &AxisCaptions::default());

        assert_eq!(config.data.datasets.len(), 4);
        for (dataset, descriptor) in config.data.datasets.iter().zip(DATASETS.iter()) {
            assert_eq!(dataset.label, descriptor.label);
            assert_eq!(dataset.border_color, descriptor.color);
            assert_eq!(dataset.background_color, descriptor.color);
            assert_eq!(dataset.data.len(), series.len());
            for (value, point) in dataset.data.iter().zip(series.iter()) {
                assert_eq!(*value, point.counter(descriptor.counter));
            }
        }
    }

    #[test]
    fn test_single_point_example() {
        let series = vec![SeriesPoint::new("2024-01-01", 10.0, 8.0, 1.0, 1.0)];
        let config = build_chart_config(&series, &AxisCaptions::default());

        assert_eq!(config.data.labels, vec![Some("2024-01-01".to_string())]);
        assert_eq!(config.data.datasets[0].data, vec![Some(10.0)]);
        assert_eq!(config.data.datasets[2].data, vec![Some(1.0)]);
    }

    #[test]
    fn test_missing_counter_is_not_zero() {
        let mut point = SeriesPoint::new("2024/05", 3.0, 2.0, 1.0, 0.0);
        point.processando = None;
        let config = build_chart_config(&[point], &AxisCaptions::default());

        assert_eq!(config.data.datasets[3].data, vec![None]);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["data"]["datasets"][3]["data"], json!([null]));
    }

    #[test]
    fn test_dataset_count_independent_of_length() {
        let config = build_chart_config(&[], &AxisCaptions::default());
        assert_eq!(config.data.datasets.len(), 4);
        assert!(config.data.datasets.iter().all(|d| d.data.is_empty()));
    }

    #[test]
    fn test_serialized_shape() {
        let config = build_chart_config(&sample_series(), &AxisCaptions::default());
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["type"], "line");
        assert_eq!(json["options"]["responsive"], true);
        assert_eq!(json["options"]["maintainAspectRatio"], false);
        assert_eq!(json["options"]["interaction"], json!({"mode": "index", "intersect": false}));
        assert_eq!(json["options"]["plugins"]["legend"]["display"], true);
        assert_eq!(json["options"]["plugins"]["tooltip"]["callbacks"], json!({}));
        assert_eq!(json["options"]["scales"]["x"], json!({"title": {"display": true, "text": "Data"}}));
        assert_eq!(json["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(json["options"]["scales"]["y"]["title"]["text"], "Solicitações");

        let dataset = &json["data"]["datasets"][1];
        assert_eq!(dataset["label"], "Sucesso");
        assert_eq!(dataset["borderColor"], "#155724");
        assert_eq!(dataset["tension"], 0.25);
        assert_eq!(dataset["pointRadius"], 2);
        assert_eq!(dataset["fill"], false);
    }

    #[test]
    fn test_custom_captions() {
        let captions = AxisCaptions {
            x: "Mês".to_string(),
            y: "Requisições".to_string(),
        };
        let config = build_chart_config(&sample_series(), &captions);

        assert_eq!(config.options.scales.x.title.text, "Mês");
        assert_eq!(config.options.scales.y.title.text, "Requisições");
    }

    #[test]
    fn test_tooltip_label() {
        assert_eq!(format_tooltip_label("Falha", "1,234"), "Falha: 1,234");
    }
}
