//! Chart specs handed to the chart back-end as JSON.
//!
//! The back-end destroys and recreates its chart instance for every spec it
//! receives, so a spec is always a complete description of the chart. Empty
//! series produce empty (not missing) charts.

use crate::aggregate::{Bucket, ChartSeries};
use crate::cluster::ClusterPartition;
use serde::Serialize;

/// Grid lines of the energy chart are drawn only at multiples of this.
pub const ENERGY_GRID_STEP: f64 = 50.0;

/// Colors for cluster datasets; cluster `i` uses `CLUSTER_PALETTE[i % len]`.
pub const CLUSTER_PALETTE: [&str; 8] = [
    "rgba(139, 92, 246, 0.8)",
    "rgba(16, 185, 129, 0.8)",
    "rgba(245, 158, 11, 0.8)",
    "rgba(239, 68, 68, 0.8)",
    "rgba(59, 130, 246, 0.8)",
    "rgba(236, 72, 153, 0.8)",
    "rgba(20, 184, 166, 0.8)",
    "rgba(234, 179, 8, 0.8)",
];

const CENTROID_COLOR: &str = "rgba(255, 255, 255, 1)";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartSpec {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub dataset_label: String,
    pub color: String,
    pub border_color: String,
    /// Only y values that are multiples of this get a tick and grid line.
    pub y_grid_step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartSpec {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub dataset_label: String,
    pub color: String,
    /// Restrict y ticks to whole numbers.
    pub integer_ticks: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterDataset {
    pub label: String,
    pub color: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterChartSpec {
    pub x_label: String,
    pub y_label: String,
    pub datasets: Vec<ScatterDataset>,
}

fn split(buckets: &[Bucket]) -> (Vec<String>, Vec<f64>) {
    buckets.iter().map(|b| (b.label.clone(), b.value)).unzip()
}

/// Energy per time-of-day bucket.
pub fn bar_chart(series: &ChartSeries) -> BarChartSpec {
    let (labels, values) = split(&series.energy_by_time_of_day);
    BarChartSpec {
        labels,
        values,
        dataset_label: "Energy (kWh)".to_string(),
        color: "rgba(139, 92, 246, 0.7)".to_string(),
        border_color: "rgba(139, 92, 246, 1)".to_string(),
        y_grid_step: ENERGY_GRID_STEP,
    }
}

/// Sessions per day-of-week bucket.
pub fn line_chart(series: &ChartSeries) -> LineChartSpec {
    let (labels, values) = split(&series.sessions_by_day_of_week);
    LineChartSpec {
        labels,
        values,
        dataset_label: "Sessions".to_string(),
        color: "rgb(99, 102, 241)".to_string(),
        integer_ticks: true,
    }
}

/// Color of cluster `index`, wrapping around the palette.
pub fn cluster_color(index: usize) -> &'static str {
    CLUSTER_PALETTE[index % CLUSTER_PALETTE.len()]
}

/// One dataset per cluster plus a trailing centroid overlay when centroids
/// are known.
pub fn scatter_chart(
    feat1: &str,
    feat2: &str,
    partitions: &[ClusterPartition],
    centroids: &[ScatterPoint],
) -> ScatterChartSpec {
    let mut datasets: Vec<ScatterDataset> = partitions
        .iter()
        .map(|p| ScatterDataset {
            label: format!("Cluster {}", p.cluster + 1),
            color: cluster_color(p.cluster).to_string(),
            points: p.points.clone(),
        })
        .collect();

    if !centroids.is_empty() {
        datasets.push(ScatterDataset {
            label: "Centroids".to_string(),
            color: CENTROID_COLOR.to_string(),
            points: centroids.to_vec(),
        });
    }

    ScatterChartSpec {
        x_label: feat1.to_string(),
        y_label: feat2.to_string(),
        datasets,
    }
}
