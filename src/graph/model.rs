use serde::{Deserialize, Serialize};

/// A thematic track of stations, drawn as one connected path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Display size of a station. Only `large` is drawn differently; any other
/// wire value falls back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl StationSize {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "large" => StationSize::Large,
            "small" => StationSize::Small,
            _ => StationSize::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StationSize::Small => "small",
            StationSize::Medium => "medium",
            StationSize::Large => "large",
        }
    }

    pub fn is_large(&self) -> bool {
        matches!(self, StationSize::Large)
    }
}

/// A named, scored attribute of one station.
///
/// `impact` is `None` when the source value was not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: String,
    pub name: String,
    pub impact: Option<i64>,
}

/// A milestone placed at supplied coordinates. Stations are kept flat in
/// [`Graph::stations`] and point at their line through `line_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    pub line_id: String,
    /// `None` when the source value was not an integer.
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub size: StationSize,
    pub is_milestone: bool,
    pub benefits: Vec<Benefit>,
}

impl Station {
    /// Both coordinates, if both parsed.
    pub fn position(&self) -> Option<(i64, i64)> {
        Some((self.x?, self.y?))
    }
}

/// The normalized, renderer-ready dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Graph {
    pub lines: Vec<Line>,
    pub stations: Vec<Station>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.stations.is_empty()
    }

    pub fn line(&self, id: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Benefits of the selected station; empty when the id is unknown.
    pub fn benefits_for(&self, station_id: &str) -> &[Benefit] {
        self.station(station_id)
            .map(|s| s.benefits.as_slice())
            .unwrap_or(&[])
    }

    /// Stations on `line_id`, in station order.
    pub fn stations_on_line<'a>(&'a self, line_id: &'a str) -> impl Iterator<Item = &'a Station> + 'a {
        self.stations.iter().filter(move |s| s.line_id == line_id)
    }

    pub fn benefit_count(&self) -> usize {
        self.stations.iter().map(|s| s.benefits.len()).sum()
    }
}
