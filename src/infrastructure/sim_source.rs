// Simulated metric source - uniform random draws per channel
use crate::application::metric_source::MetricSource;
use crate::domain::snapshot::{MeasurementSnapshot, SamplePoint};
use crate::infrastructure::config::ChannelsSettings;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;

/// Stand-in for a live RAN feed: every sample is an independent uniform
/// draw within the configured bounds of each channel.
#[derive(Debug, Clone)]
pub struct SimulatedMetricSource {
    channels: ChannelsSettings,
}

impl SimulatedMetricSource {
    pub fn new(channels: ChannelsSettings) -> Self {
        Self { channels }
    }

    fn draw(&self) -> MeasurementSnapshot {
        let mut rng = rand::thread_rng();
        let constellation = (0..self.channels.constellation.points)
            .map(|_| SamplePoint::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();

        MeasurementSnapshot {
            sampled_at: Utc::now(),
            mcs: rng.gen_range(self.channels.mcs.min..self.channels.mcs.max),
            sinr: rng.gen_range(self.channels.sinr.min..self.channels.sinr.max),
            throughput: rng
                .gen_range(self.channels.throughput.min..self.channels.throughput.max),
            bler: rng.gen_range(self.channels.bler.min..self.channels.bler.max),
            constellation,
        }
    }
}

#[async_trait]
impl MetricSource for SimulatedMetricSource {
    async fn sample(&self) -> MeasurementSnapshot {
        self.draw()
    }
}
