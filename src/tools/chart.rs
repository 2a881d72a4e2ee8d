// ABOUTME: VisualizeTrendsTool - renders topic and Bloom's level distributions
// ABOUTME: as a two-panel SVG chart (topic panel: bar, pie, or line).

use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::config::PathConfig;
use crate::tool::{Tool, ToolResult};

const DEFAULT_OUTPUT: &str = "trends_chart.svg";
const CANVAS: (u32, u32) = (1400, 600);
const PANEL_SPLIT: i32 = 700;
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const LIGHT_CORAL: RGBColor = RGBColor(240, 128, 128);

/// How the topic panel is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Pie,
    Line,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
            ChartType::Line => "line",
        }
    }
}

impl FromStr for ChartType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartType::Bar),
            "pie" => Ok(ChartType::Pie),
            "line" => Ok(ChartType::Line),
            other => anyhow::bail!("unsupported chart type '{other}' (expected bar, pie, or line)"),
        }
    }
}

/// Counts pulled out of an `analyze_statistics` result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distributions {
    pub topics: Vec<(String, u64)>,
    pub blooms: Vec<(String, u64)>,
}

impl Distributions {
    /// Read `topic_distribution` and `bloom_distribution` from a statistics
    /// object or its JSON text. Missing distributions are empty.
    pub fn from_statistics(statistics: &Value) -> Result<Self, anyhow::Error> {
        let parsed;
        let object = match statistics {
            Value::String(text) => {
                parsed = serde_json::from_str::<Value>(text)?;
                &parsed
            }
            other => other,
        };
        let object = object
            .as_object()
            .ok_or_else(|| anyhow::anyhow!("statistics must be a JSON object"))?;

        Ok(Self {
            topics: counts(object.get("topic_distribution")),
            blooms: counts(object.get("bloom_distribution")),
        })
    }
}

fn counts(value: Option<&Value>) -> Vec<(String, u64)> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(k, v)| {
                    let n = v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0).round() as u64));
                    (k.clone(), n.unwrap_or(0))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Tool for charting exam statistics.
#[derive(Debug, Clone)]
pub struct VisualizeTrendsTool {
    paths: PathConfig,
}

impl VisualizeTrendsTool {
    pub fn new(paths: PathConfig) -> Self {
        Self { paths }
    }

    /// Bare file names land in the charts directory; anything with a
    /// directory component is used as given.
    fn resolve_output(&self, output_path: &str) -> std::io::Result<PathBuf> {
        let path = Path::new(output_path);
        let is_bare = path.parent().is_none_or(|p| p.as_os_str().is_empty());
        if is_bare {
            return self.paths.output_path(output_path, Some("charts"));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(path.to_path_buf())
    }

    fn visualize(&self, params: &Value) -> Result<Value, anyhow::Error> {
        let chart_type = match params.get("chart_type").and_then(Value::as_str) {
            Some(s) => s.parse::<ChartType>()?,
            None => ChartType::Bar,
        };
        let statistics = params.get("statistics").unwrap_or(&Value::Null);
        let data = Distributions::from_statistics(statistics)?;

        let output = params
            .get("output_path")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_OUTPUT);
        let path = self.resolve_output(output)?;

        render(&path, &data, chart_type)?;
        info!(path = %path.display(), chart_type = chart_type.as_str(), "chart saved");

        let chart_path = path.display().to_string();
        Ok(serde_json::json!({
            "chart_path": chart_path,
            "chart_type": chart_type,
            "success": true,
            "message": format!("Chart saved to {chart_path}"),
        }))
    }
}

/// Draw the topic panel on the left and the Bloom's level panel on the
/// right, then write the SVG.
pub fn render(path: &Path, data: &Distributions, chart_type: ChartType) -> Result<(), anyhow::Error> {
    let root = SVGBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(PANEL_SPLIT);

    let topic_title = "Topic Distribution";
    match chart_type {
        ChartType::Bar => draw_bars(&left, topic_title, &data.topics, SKY_BLUE)?,
        ChartType::Line => draw_line(&left, topic_title, &data.topics, SKY_BLUE)?,
        ChartType::Pie => draw_pie(&left, topic_title, &data.topics)?,
    }
    draw_bars(&right, "Bloom's Taxonomy Distribution", &data.blooms, LIGHT_CORAL)?;

    root.present()?;
    Ok(())
}

type Panel<'a> = DrawingArea<SVGBackend<'a>, Shift>;

fn label_for(data: &[(String, u64)], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => data
            .get(*i as usize)
            .map(|(name, _)| name.clone())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn y_ceiling(data: &[(String, u64)]) -> u64 {
    data.iter().map(|(_, n)| *n).max().unwrap_or(0) + 1
}

fn draw_bars(area: &Panel<'_>, title: &str, data: &[(String, u64)], color: RGBColor) -> Result<(), anyhow::Error> {
    if data.is_empty() {
        area.titled(title, ("sans-serif", 24))?;
        return Ok(());
    }

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..data.len() as u32).into_segmented(), 0u64..y_ceiling(data))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(data.len())
        .x_label_formatter(&|v: &SegmentValue<u32>| label_for(data, v))
        .y_desc("Count")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(color.filled())
            .margin(10)
            .data(data.iter().enumerate().map(|(i, (_, n))| (i as u32, *n))),
    )?;
    Ok(())
}

fn draw_line(area: &Panel<'_>, title: &str, data: &[(String, u64)], color: RGBColor) -> Result<(), anyhow::Error> {
    if data.is_empty() {
        area.titled(title, ("sans-serif", 24))?;
        return Ok(());
    }

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..data.len() as u32).into_segmented(), 0u64..y_ceiling(data))?;

    chart
        .configure_mesh()
        .x_labels(data.len())
        .x_label_formatter(&|v: &SegmentValue<u32>| label_for(data, v))
        .y_desc("Count")
        .draw()?;

    let points: Vec<(SegmentValue<u32>, u64)> = data
        .iter()
        .enumerate()
        .map(|(i, (_, n))| (SegmentValue::CenterOf(i as u32), *n))
        .collect();
    chart.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?;
    chart.draw_series(points.into_iter().map(|p| Circle::new(p, 4, color.filled())))?;
    Ok(())
}

fn draw_pie(area: &Panel<'_>, title: &str, data: &[(String, u64)]) -> Result<(), anyhow::Error> {
    let area = area.titled(title, ("sans-serif", 24))?;
    let total: u64 = data.iter().map(|(_, n)| *n).sum();
    if total == 0 {
        return Ok(());
    }

    let (width, height) = area.dim_in_pixel();
    let center = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = width.min(height) as f64 * 0.35;
    let at = |angle: f64, r: f64| {
        (
            (center.0 + r * angle.cos()).round() as i32,
            (center.1 + r * angle.sin()).round() as i32,
        )
    };

    // Slices run clockwise from twelve o'clock.
    let mut start = -PI / 2.0;
    for (i, (name, n)) in data.iter().enumerate() {
        if *n == 0 {
            continue;
        }
        let share = *n as f64 / total as f64;
        let sweep = share * 2.0 * PI;
        let steps = ((sweep / (2.0 * PI)) * 120.0).ceil().max(2.0) as usize;

        let mut outline = vec![at(0.0, 0.0)];
        outline.extend((0..=steps).map(|s| at(start + sweep * s as f64 / steps as f64, radius)));
        area.draw(&Polygon::new(outline, Palette99::pick(i).filled()))?;

        let mid = start + sweep / 2.0;
        area.draw(&Text::new(
            format!("{name} ({:.1}%)", share * 100.0),
            at(mid, radius * 1.15),
            ("sans-serif", 14).into_font().color(&BLACK),
        ))?;
        start += sweep;
    }
    Ok(())
}

#[async_trait]
impl Tool for VisualizeTrendsTool {
    fn name(&self) -> &str {
        "visualize_trends"
    }

    fn description(&self) -> &str {
        "Create a chart of topic and Bloom's level distributions from analyze_statistics output."
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "statistics": {
                    "type": "string",
                    "description": "Statistics JSON from analyze_statistics"
                },
                "output_path": {
                    "type": "string",
                    "description": "Where to save the chart (default: trends_chart.svg in the charts folder)"
                },
                "chart_type": {
                    "type": "string",
                    "enum": ["bar", "pie", "line"],
                    "description": "How to draw the topic panel"
                }
            },
            "required": ["statistics"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let this = self.clone();
        let outcome = tokio::task::spawn_blocking(move || this.visualize(&params)).await?;
        match outcome {
            Ok(value) => Ok(ToolResult::json(value)),
            Err(e) => Ok(ToolResult::error(format!("Failed to create visualization: {e}"))),
        }
    }
}
