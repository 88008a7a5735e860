// Render backend trait and the backend-agnostic draw request
use crate::domain::panel::{ChartKind, PanelStyle};
use crate::domain::snapshot::SamplePoint;
use async_trait::async_trait;
use serde::Serialize;

/// Display range for the request's value axis, fixed by measurement
/// identity in the dispatcher's range table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// The extracted (or synthesized) payload for one panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ChartData {
    /// Single current value, for gauges.
    Scalar { value: f64 },
    /// Short value series, for line and histogram displays.
    Series { values: Vec<f64> },
    /// Labeled breakdown, for bar displays.
    Categories { labels: Vec<String>, values: Vec<f64> },
    /// 2-D point cloud, for scatter displays.
    Points { points: Vec<SamplePoint> },
}

/// One validated, parameterized rendering call. Built by the dispatcher,
/// consumed read-only by the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawRequest {
    pub chart_kind: ChartKind,
    pub title: String,
    pub style: PanelStyle,
    pub axis: AxisRange,
    pub data: ChartData,
}

/// Displayable output for one panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    pub content_type: String,
    pub figure: serde_json::Value,
}

/// Turns a draw request into a displayable artifact.
///
/// May fail per call; the dispatcher converts a failure into a per-panel
/// outcome and keeps rendering the rest of the board.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    async fn render(&self, request: &DrawRequest) -> anyhow::Result<Artifact>;
}
