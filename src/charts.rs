// Dashboard chart configuration.
//
// Builds the JSON configs for the results doughnut and the per-platform bar
// chart. The results data is handed to the doughnut untouched. Only the
// platform data is parsed into RGBA values, so the bar border is the fill
// color with its alpha set to 1 rather than a string edit of the fill.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use crate::ui::Page;

/// Legend and tick label color on the dark theme.
pub const LABEL_COLOR: &str = "#e0e0ff";
pub const LABEL_FONT_SIZE: u32 = 12;
/// Grid lines on the bar chart.
pub const GRID_COLOR: Rgba = Rgba::new(255, 255, 255, 0.1);

pub const RESULTS_CANVAS: &str = "resultsChart";
pub const PLATFORMS_CANVAS: &str = "platformsChart";

/// An sRGB color with alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }

    /// CSS `rgba(r, g, b, a)` notation.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Parse `rgba(...)`, `rgb(...)`, `#rrggbb` or `#rgb`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(hex) = raw.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        let (body, expect_alpha) = if let Some(rest) = raw.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, true)
        } else if let Some(rest) = raw.strip_prefix("rgb(") {
            (rest.strip_suffix(')')?, false)
        } else {
            return None;
        };

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let channel = |s: &str| s.parse::<u8>().ok();
        match (parts.as_slice(), expect_alpha) {
            ([r, g, b, a], true) => {
                let a = a.parse::<f64>().ok().filter(|a| (0.0..=1.0).contains(a))?;
                Some(Self::new(channel(*r)?, channel(*g)?, channel(*b)?, a))
            }
            ([r, g, b], false) => Some(Self::new(channel(*r)?, channel(*g)?, channel(*b)?, 1.0)),
            _ => None,
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let byte = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
        Some(Self::new(byte(0)?, byte(2)?, byte(4)?, 1.0))
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.css())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgba::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized color: {raw}")))
    }
}

/// One dataset in chart-library shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    #[serde(default)]
    pub background_color: Vec<Rgba>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Vec<Rgba>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
}

/// Per-platform labels plus datasets, as precomputed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Bar,
}

/// A complete chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: Value,
    pub options: Value,
}

impl ChartConfig {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize chart config")
    }
}

fn label_style() -> Value {
    json!({ "color": LABEL_COLOR, "font": { "size": LABEL_FONT_SIZE } })
}

/// Doughnut chart of scan results, legend below.
///
/// `data` is passed through as-is: any dataset keys and color notations the
/// chart library accepts survive.
pub fn results_chart(data: &Value) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Doughnut,
        data: data.clone(),
        options: json!({
            "responsive": true,
            "plugins": {
                "legend": {
                    "position": "bottom",
                    "labels": label_style(),
                }
            }
        }),
    }
}

/// Bar chart of scans per platform from the first dataset of `data`.
pub fn platforms_chart(data: &ChartData) -> Result<ChartConfig> {
    let source = data
        .datasets
        .first()
        .context("Platform chart data has no datasets")?;

    let dataset = Dataset {
        label: Some("# of Scans".to_string()),
        data: source.data.clone(),
        background_color: source.background_color.clone(),
        border_color: Some(source.background_color.iter().map(|c| c.opaque()).collect()),
        border_width: Some(1),
    };

    let axis = json!({
        "ticks": label_style(),
        "grid": { "color": GRID_COLOR },
    });
    let mut y_axis = axis.clone();
    y_axis["beginAtZero"] = json!(true);

    let bar_data = ChartData {
        labels: data.labels.clone(),
        datasets: vec![dataset],
    };

    Ok(ChartConfig {
        kind: ChartKind::Bar,
        data: serde_json::to_value(&bar_data).context("Failed to serialize bar chart data")?,
        options: json!({
            "responsive": true,
            "scales": { "y": y_axis, "x": axis },
            "plugins": { "legend": { "display": false } }
        }),
    })
}

/// Chart configs for whichever canvases the page has.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub results: Option<ChartConfig>,
    pub platforms: Option<ChartConfig>,
}

impl ChartSet {
    pub fn bind(page: &Page, result_data: &Value, platform_data: &ChartData) -> Result<Self> {
        let results = page
            .by_id(RESULTS_CANVAS)
            .map(|_| results_chart(result_data));
        let platforms = match page.by_id(PLATFORMS_CANVAS) {
            Some(_) => Some(platforms_chart(platform_data)?),
            None => None,
        };
        Ok(Self { results, platforms })
    }
}
