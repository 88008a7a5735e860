// Render dispatcher - validated dispatch from panels to backend calls
use crate::application::metric_source::MetricSource;
use crate::application::render_backend::{
    Artifact, AxisRange, ChartData, DrawRequest, RenderBackend,
};
use crate::domain::panel::{ChartKind, Measurement, PanelConfig, PanelId};
use crate::domain::registry::PanelRegistry;
use crate::domain::snapshot::MeasurementSnapshot;
use serde::Serialize;

pub const BAR_CATEGORIES: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Why a panel was skipped instead of rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    IncompatiblePair {
        measurement: Measurement,
        chart_kind: ChartKind,
    },
}

/// Per-panel result of one render cycle. `render_all` emits exactly one of
/// these per registry entry, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderOutcome {
    Rendered { panel_id: PanelId, artifact: Artifact },
    Skipped { panel_id: PanelId, reason: SkipReason },
    Failed { panel_id: PanelId, reason: String },
}

impl RenderOutcome {
    pub fn panel_id(&self) -> PanelId {
        match self {
            RenderOutcome::Rendered { panel_id, .. }
            | RenderOutcome::Skipped { panel_id, .. }
            | RenderOutcome::Failed { panel_id, .. } => *panel_id,
        }
    }
}

/// Display range table, keyed by measurement identity. Ratio channels are
/// normalized to [0,1]; other scalars share the fixed display range; the
/// constellation plane is symmetric around the origin.
pub fn display_range(measurement: Measurement) -> AxisRange {
    match measurement {
        Measurement::Bler => AxisRange::new(0.0, 1.0),
        Measurement::Constellation => AxisRange::new(-1.0, 1.0),
        Measurement::Mcs | Measurement::Sinr | Measurement::Throughput => {
            AxisRange::new(0.0, 100.0)
        }
    }
}

/// Maps each panel to one validated backend call against a single fresh
/// snapshot per cycle. One misconfigured or failing panel never blocks the
/// rest of the board.
#[derive(Debug, Clone)]
pub struct RenderDispatcher {
    series_len: usize,
}

impl Default for RenderDispatcher {
    fn default() -> Self {
        Self::new(10)
    }
}

impl RenderDispatcher {
    pub fn new(series_len: usize) -> Self {
        Self {
            series_len: series_len.max(2),
        }
    }

    /// Renders every panel in registry order. Never fails as a whole:
    /// incompatible pairs become `Skipped`, backend errors become `Failed`,
    /// and the cycle continues to the next panel either way.
    pub async fn render_all(
        &self,
        registry: &PanelRegistry,
        source: &dyn MetricSource,
        backend: &dyn RenderBackend,
    ) -> Vec<RenderOutcome> {
        let snapshot = source.sample().await;
        tracing::debug!(panels = registry.len(), "starting render cycle");

        let mut outcomes = Vec::with_capacity(registry.len());
        for panel in registry.list() {
            outcomes.push(self.render_panel(panel, &snapshot, backend).await);
        }
        outcomes
    }

    async fn render_panel(
        &self,
        panel: &PanelConfig,
        snapshot: &MeasurementSnapshot,
        backend: &dyn RenderBackend,
    ) -> RenderOutcome {
        if !panel.chart_kind.supports(panel.measurement) {
            tracing::debug!(
                panel = %panel.id,
                measurement = %panel.measurement,
                chart_kind = %panel.chart_kind,
                "skipping incompatible panel"
            );
            return RenderOutcome::Skipped {
                panel_id: panel.id,
                reason: SkipReason::IncompatiblePair {
                    measurement: panel.measurement,
                    chart_kind: panel.chart_kind,
                },
            };
        }

        let Some(data) = self.extract(panel.chart_kind, panel.measurement, snapshot) else {
            // Unreachable once the compatibility check passed.
            return RenderOutcome::Skipped {
                panel_id: panel.id,
                reason: SkipReason::IncompatiblePair {
                    measurement: panel.measurement,
                    chart_kind: panel.chart_kind,
                },
            };
        };

        let request = DrawRequest {
            chart_kind: panel.chart_kind,
            title: panel.title.clone(),
            style: panel.style.clone(),
            axis: display_range(panel.measurement),
            data,
        };

        match backend.render(&request).await {
            Ok(artifact) => RenderOutcome::Rendered {
                panel_id: panel.id,
                artifact,
            },
            Err(e) => {
                tracing::warn!(panel = %panel.id, error = %e, "backend failed to render panel");
                RenderOutcome::Failed {
                    panel_id: panel.id,
                    reason: format!("{e:#}"),
                }
            }
        }
    }

    /// Pulls the payload for a compatible (chart kind, measurement) pair out
    /// of the snapshot. Returns `None` only for pairs the compatibility
    /// table already rejects.
    fn extract(
        &self,
        chart_kind: ChartKind,
        measurement: Measurement,
        snapshot: &MeasurementSnapshot,
    ) -> Option<ChartData> {
        let range = display_range(measurement);
        match chart_kind {
            ChartKind::Gauge => snapshot
                .scalar(measurement)
                .map(|value| ChartData::Scalar { value }),
            ChartKind::Line | ChartKind::Histogram => {
                snapshot.scalar(measurement).map(|value| ChartData::Series {
                    values: self.synthesize_series(value, range, self.series_len),
                })
            }
            ChartKind::Bar => {
                let seed = snapshot
                    .scalar(measurement)
                    .unwrap_or_else(|| constellation_seed(snapshot));
                let values = self.synthesize_series(seed, range, BAR_CATEGORIES.len());
                Some(ChartData::Categories {
                    labels: BAR_CATEGORIES.iter().map(|s| s.to_string()).collect(),
                    values,
                })
            }
            ChartKind::Scatter => match measurement {
                Measurement::Constellation => Some(ChartData::Points {
                    points: snapshot.constellation().to_vec(),
                }),
                _ => None,
            },
        }
    }

    /// The board keeps no history buffer, so series-shaped charts derive a
    /// short pseudo-series from the current sample instead. Deterministic in
    /// the seed value, uniform within the channel's display range.
    fn synthesize_series(&self, seed: f64, range: AxisRange, len: usize) -> Vec<f64> {
        let span = range.max - range.min;
        let mut state = seed.to_bits() | 1;
        (0..len)
            .map(|_| {
                // xorshift64
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
                range.min + span * unit
            })
            .collect()
    }
}

fn constellation_seed(snapshot: &MeasurementSnapshot) -> f64 {
    let points = snapshot.constellation();
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.x * p.x + p.y * p.y).sum::<f64>() / points.len() as f64
}
