// Figure backend - renders draw requests as Plotly-style JSON figures
use crate::application::render_backend::{Artifact, ChartData, DrawRequest, RenderBackend};
use crate::domain::panel::ChartKind;
use anyhow::bail;
use async_trait::async_trait;
use serde_json::json;

const FIGURE_CONTENT_TYPE: &str = "application/vnd.figure+json";

/// Produces a structured figure description a charting frontend can draw
/// directly. The backend owns visual layout only; validation and range
/// policy happen upstream in the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct FigureBackend;

impl FigureBackend {
    pub fn new() -> Self {
        Self
    }

    fn trace(&self, request: &DrawRequest) -> anyhow::Result<serde_json::Value> {
        let style = &request.style;
        match (&request.chart_kind, &request.data) {
            (ChartKind::Gauge, ChartData::Scalar { value }) => Ok(json!({
                "type": "indicator",
                "mode": "gauge+number",
                "value": value,
                "gauge": {
                    "axis": { "range": [request.axis.min, request.axis.max] },
                    "bar": { "color": style.color },
                },
            })),
            (ChartKind::Line, ChartData::Series { values }) => Ok(json!({
                "type": "scatter",
                "mode": "lines",
                "x": (0..values.len()).collect::<Vec<_>>(),
                "y": values,
                "line": { "color": style.color, "width": style.line_width },
            })),
            (ChartKind::Histogram, ChartData::Series { values }) => Ok(json!({
                "type": "histogram",
                "x": values,
                "marker": { "color": style.color },
            })),
            (ChartKind::Bar, ChartData::Categories { labels, values }) => Ok(json!({
                "type": "bar",
                "x": labels,
                "y": values,
                "marker": { "color": style.color },
            })),
            (ChartKind::Scatter, ChartData::Points { points }) => Ok(json!({
                "type": "scatter",
                "mode": "markers",
                "x": points.iter().map(|p| p.x).collect::<Vec<_>>(),
                "y": points.iter().map(|p| p.y).collect::<Vec<_>>(),
                "marker": { "color": style.color, "symbol": style.marker.as_str() },
            })),
            (kind, data) => {
                bail!("{} request carries mismatched payload {:?}", kind, data)
            }
        }
    }

    fn layout(&self, request: &DrawRequest) -> serde_json::Value {
        let mut layout = json!({
            "title": request.title,
            "width": request.style.width,
            "height": request.style.height,
        });
        // Scatter axes are pinned to the display plane so a sparse cloud
        // does not rescale between cycles.
        if request.chart_kind == ChartKind::Scatter {
            layout["xaxis"] = json!({ "range": [request.axis.min, request.axis.max] });
            layout["yaxis"] = json!({ "range": [request.axis.min, request.axis.max] });
        }
        layout
    }
}

#[async_trait]
impl RenderBackend for FigureBackend {
    async fn render(&self, request: &DrawRequest) -> anyhow::Result<Artifact> {
        let figure = json!({
            "data": [self.trace(request)?],
            "layout": self.layout(request),
        });
        Ok(Artifact {
            content_type: FIGURE_CONTENT_TYPE.to_string(),
            figure,
        })
    }
}
