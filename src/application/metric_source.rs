// Metric source trait - pluggable telemetry snapshot provider
use crate::domain::snapshot::MeasurementSnapshot;
use async_trait::async_trait;

/// Produces a fresh snapshot of every telemetry channel on demand.
///
/// The contract is total: every call populates every known channel. Latency
/// is assumed bounded; the dispatcher awaits exactly one sample per render
/// cycle.
#[async_trait]
pub trait MetricSource: Send + Sync {
    async fn sample(&self) -> MeasurementSnapshot;
}
