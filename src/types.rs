use serde::{Deserialize, Serialize, Serializer};

// Core types shared by the dataset loader, the graph queries and the reports

/// One entry of the input document: a station and its outgoing segments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    #[serde(rename = "Node")]
    pub station: String,
    #[serde(rename = "Edges")]
    pub segments: Vec<SegmentRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRecord {
    #[serde(rename = "Node")]
    pub target: String,
    #[serde(rename = "Line")]
    pub line: String,
    #[serde(rename = "Cost")]
    pub cost: f64,
}

impl StationRecord {
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            segments: Vec::new(),
        }
    }

    pub fn with_segment(mut self, target: impl Into<String>, line: impl Into<String>, cost: f64) -> Self {
        self.segments.push(SegmentRecord {
            target: target.into(),
            line: line.into(),
            cost,
        });
        self
    }
}

/// Minimum-cost path between two stations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub stations: Vec<String>,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub total_stations: usize,
    pub total_segments: usize,
    pub total_lines: usize,
    pub average_degree: f64,
}

/// A station together with its degree
pub type StationDegree = (String, usize);

/// Line identifier as written to reports. Integer literals are emitted as JSON numbers
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineKey(pub String);

impl Serialize for LineKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(number) => serializer.serialize_i64(number),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

/// Per-line summary record of the line report
#[derive(Debug, Clone, Serialize)]
pub struct LineInfo {
    pub line: LineKey,
    pub edges: usize,
    pub nodes: usize,
    pub is_connected: bool,
    pub is_path_graph: bool,
    pub degree_histogram: Vec<usize>,
    pub high_degree_nodes: Vec<StationDegree>,
}
