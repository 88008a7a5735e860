// Panel domain model
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque, registry-assigned panel identity. Never derived from display
/// fields and never recycled within a registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(pub u64);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// Simulated 5G RAN telemetry channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measurement {
    Mcs,
    Sinr,
    Throughput,
    Bler,
    Constellation,
}

impl Measurement {
    pub const ALL: [Measurement; 5] = [
        Measurement::Mcs,
        Measurement::Sinr,
        Measurement::Throughput,
        Measurement::Bler,
        Measurement::Constellation,
    ];

    /// Scalar channels carry one numeric value per snapshot; the
    /// constellation channel carries a point sequence instead.
    pub fn is_scalar(self) -> bool {
        !matches!(self, Measurement::Constellation)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Measurement::Mcs => "mcs",
            Measurement::Sinr => "sinr",
            Measurement::Throughput => "throughput",
            Measurement::Bler => "bler",
            Measurement::Constellation => "constellation",
        }
    }
}

impl FromStr for Measurement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mcs" => Ok(Measurement::Mcs),
            "sinr" => Ok(Measurement::Sinr),
            "throughput" => Ok(Measurement::Throughput),
            "bler" => Ok(Measurement::Bler),
            "constellation" => Ok(Measurement::Constellation),
            other => Err(ConfigError::UnknownMeasurement(other.to_string())),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual encodings a panel may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Gauge,
    Line,
    Bar,
    Scatter,
    Histogram,
}

impl ChartKind {
    /// Static compatibility table: which measurements a chart kind can
    /// represent. Scatter needs a point cloud; gauge/line/histogram need a
    /// scalar; bar accepts anything and synthesizes a categorical breakdown.
    pub fn supports(self, measurement: Measurement) -> bool {
        match self {
            ChartKind::Gauge | ChartKind::Line | ChartKind::Histogram => measurement.is_scalar(),
            ChartKind::Bar => true,
            ChartKind::Scatter => measurement == Measurement::Constellation,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Gauge => "gauge",
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Histogram => "histogram",
        }
    }
}

impl FromStr for ChartKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gauge" => Ok(ChartKind::Gauge),
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "scatter" => Ok(ChartKind::Scatter),
            "histogram" => Ok(ChartKind::Histogram),
            other => Err(ConfigError::UnknownChartKind(other.to_string())),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Circle,
    Square,
    Diamond,
    Cross,
    X,
}

impl MarkerShape {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerShape::Circle => "circle",
            MarkerShape::Square => "square",
            MarkerShape::Diamond => "diamond",
            MarkerShape::Cross => "cross",
            MarkerShape::X => "x",
        }
    }
}

impl FromStr for MarkerShape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "circle" => Ok(MarkerShape::Circle),
            "square" => Ok(MarkerShape::Square),
            "diamond" => Ok(MarkerShape::Diamond),
            "cross" => Ok(MarkerShape::Cross),
            "x" => Ok(MarkerShape::X),
            other => Err(ConfigError::UnknownMarkerShape(other.to_string())),
        }
    }
}

pub const LINE_WIDTH_RANGE: (f64, f64) = (1.0, 10.0);
pub const DIMENSION_RANGE: (u32, u32) = (100, 4000);

/// Presentation-only fields. Validated for type and range, never for
/// domain meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelStyle {
    pub color: String,
    pub line_width: f64,
    pub marker: MarkerShape,
    pub width: u32,
    pub height: u32,
}

impl PanelStyle {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_hex_color(&self.color) {
            return Err(ConfigError::MalformedColor(self.color.clone()));
        }
        let (lo, hi) = LINE_WIDTH_RANGE;
        if !self.line_width.is_finite() || self.line_width < lo || self.line_width > hi {
            return Err(ConfigError::StyleOutOfRange(format!(
                "line_width {} outside {}..={}",
                self.line_width, lo, hi
            )));
        }
        let (min_px, max_px) = DIMENSION_RANGE;
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value < min_px || value > max_px {
                return Err(ConfigError::StyleOutOfRange(format!(
                    "{} {}px outside {}..={}px",
                    field, value, min_px, max_px
                )));
            }
        }
        Ok(())
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// User-committed input for one panel, before the registry assigns identity.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelDraft {
    pub measurement: Measurement,
    pub chart_kind: ChartKind,
    pub style: PanelStyle,
    pub title: String,
}

/// One registered panel. Content is immutable after creation; only its
/// position in the registry order changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelConfig {
    pub id: PanelId,
    pub measurement: Measurement,
    pub chart_kind: ChartKind,
    pub style: PanelStyle,
    pub title: String,
}

/// Structurally malformed panel input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown measurement '{0}'")]
    UnknownMeasurement(String),
    #[error("unknown chart kind '{0}'")]
    UnknownChartKind(String),
    #[error("unknown marker shape '{0}'")]
    UnknownMarkerShape(String),
    #[error("malformed color '{0}', expected #rrggbb")]
    MalformedColor(String),
    #[error("style out of range: {0}")]
    StyleOutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> PanelStyle {
        PanelStyle {
            color: "#1f77b4".to_string(),
            line_width: 2.0,
            marker: MarkerShape::Circle,
            width: 400,
            height: 400,
        }
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("SINR".parse::<Measurement>().unwrap(), Measurement::Sinr);
        assert_eq!("gauge".parse::<ChartKind>().unwrap(), ChartKind::Gauge);
        assert_eq!("x".parse::<MarkerShape>().unwrap(), MarkerShape::X);

        assert!(matches!(
            "rsrp".parse::<Measurement>(),
            Err(ConfigError::UnknownMeasurement(_))
        ));
        assert!(matches!(
            "pie".parse::<ChartKind>(),
            Err(ConfigError::UnknownChartKind(_))
        ));
    }

    #[test]
    fn test_compatibility_table() {
        // Scatter is the only point-cloud encoding.
        assert!(ChartKind::Scatter.supports(Measurement::Constellation));
        for m in Measurement::ALL {
            if m.is_scalar() {
                assert!(!ChartKind::Scatter.supports(m));
                assert!(ChartKind::Gauge.supports(m));
                assert!(ChartKind::Line.supports(m));
                assert!(ChartKind::Histogram.supports(m));
            }
        }
        // Bar synthesizes a breakdown for any channel.
        for m in Measurement::ALL {
            assert!(ChartKind::Bar.supports(m));
        }
        assert!(!ChartKind::Gauge.supports(Measurement::Constellation));
        assert!(!ChartKind::Line.supports(Measurement::Constellation));
        assert!(!ChartKind::Histogram.supports(Measurement::Constellation));
    }

    #[test]
    fn test_style_validation() {
        assert!(style().validate().is_ok());

        let mut bad = style();
        bad.color = "blue".to_string();
        assert!(matches!(bad.validate(), Err(ConfigError::MalformedColor(_))));

        let mut bad = style();
        bad.line_width = 0.0;
        assert!(matches!(bad.validate(), Err(ConfigError::StyleOutOfRange(_))));

        let mut bad = style();
        bad.line_width = f64::NAN;
        assert!(bad.validate().is_err());

        let mut bad = style();
        bad.width = 50;
        assert!(matches!(bad.validate(), Err(ConfigError::StyleOutOfRange(_))));
    }
}
