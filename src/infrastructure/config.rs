use anyhow::ensure;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    pub server: ServerSettings,
    pub channels: ChannelsSettings,
    pub synthesis: SynthesisSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChannelsSettings {
    pub mcs: ScalarChannel,
    pub sinr: ScalarChannel,
    pub throughput: ScalarChannel,
    pub bler: ScalarChannel,
    pub constellation: ConstellationChannel,
}

/// Simulation bounds for one scalar channel.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ScalarChannel {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ConstellationChannel {
    pub points: usize,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SynthesisSettings {
    pub series_len: usize,
}

pub fn load_board_config() -> anyhow::Result<BoardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/board"))
        .build()?;

    let board: BoardConfig = settings.try_deserialize()?;
    validate(&board)?;
    Ok(board)
}

fn validate(board: &BoardConfig) -> anyhow::Result<()> {
    for (name, channel) in [
        ("mcs", board.channels.mcs),
        ("sinr", board.channels.sinr),
        ("throughput", board.channels.throughput),
        ("bler", board.channels.bler),
    ] {
        ensure!(
            channel.min < channel.max,
            "channel {} has empty range {}..{}",
            name,
            channel.min,
            channel.max
        );
    }
    ensure!(
        board.channels.constellation.points > 0,
        "constellation needs at least one point"
    );
    ensure!(
        board.synthesis.series_len >= 2,
        "series_len must be at least 2"
    );
    Ok(())
}
