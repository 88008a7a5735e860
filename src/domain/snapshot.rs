// Measurement snapshot domain model
use super::panel::Measurement;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One constellation sample in the IQ plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One atomic pull of current values for all telemetry channels.
///
/// Snapshots are consumed within a single render cycle and discarded; the
/// board keeps no history. Every channel is populated on every pull, so
/// lookups by scalar channel cannot miss.
#[derive(Debug, Clone)]
pub struct MeasurementSnapshot {
    pub sampled_at: DateTime<Utc>,
    pub mcs: f64,
    pub sinr: f64,
    pub throughput: f64,
    pub bler: f64,
    pub constellation: Vec<SamplePoint>,
}

impl MeasurementSnapshot {
    /// The current value of a scalar channel, or `None` for the
    /// constellation channel.
    pub fn scalar(&self, measurement: Measurement) -> Option<f64> {
        match measurement {
            Measurement::Mcs => Some(self.mcs),
            Measurement::Sinr => Some(self.sinr),
            Measurement::Throughput => Some(self.throughput),
            Measurement::Bler => Some(self.bler),
            Measurement::Constellation => None,
        }
    }

    pub fn constellation(&self) -> &[SamplePoint] {
        &self.constellation
    }
}
