use crate::network::graph::TransitGraph;
use crate::network::traversal::GraphTraversal;
use crate::types::{LineInfo, LineKey, StationDegree};
use serde::Serialize;
use tracing::{debug, warn};

/// Degree histogram together with the stations above a threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeReport {
    pub histogram: Vec<usize>,
    pub high_degree_stations: Vec<StationDegree>,
}

/// Which stations a single-line degree query covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineDegreeMode {
    /// Only the stations touched by the line
    #[default]
    Induced,
    /// Every network station, counting only the line's segments
    AllStations,
}

impl LineDegreeMode {
    pub fn from_flag(all_stations: bool) -> Self {
        if all_stations {
            Self::AllStations
        } else {
            Self::Induced
        }
    }
}

/// Degree statistics over a whole network or a line subgraph
pub struct DegreeAnalyzer;

impl DegreeAnalyzer {
    /// Histogram where index `d` counts the stations of degree `d`.
    /// Empty when there are no stations.
    pub fn histogram(degrees: &[usize]) -> Vec<usize> {
        let Some(&max_degree) = degrees.iter().max() else {
            return Vec::new();
        };

        let mut histogram = vec![0; max_degree + 1];
        for &degree in degrees {
            histogram[degree] += 1;
        }
        histogram
    }

    pub fn degree_histogram(graph: &TransitGraph) -> Vec<usize> {
        Self::histogram(&graph.degrees())
    }

    /// Stations whose degree is strictly greater than `threshold`, in station order
    pub fn high_degree_stations(graph: &TransitGraph, threshold: usize) -> Vec<StationDegree> {
        Self::above_threshold(graph, &graph.degrees(), threshold)
    }

    fn above_threshold(graph: &TransitGraph, degrees: &[usize], threshold: usize) -> Vec<StationDegree> {
        degrees
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree > threshold)
            .map(|(index, &degree)| (graph.station_name(index).to_string(), degree))
            .collect()
    }

    pub fn analyze(graph: &TransitGraph, threshold: usize) -> DegreeReport {
        let degrees = graph.degrees();
        DegreeReport {
            histogram: Self::histogram(&degrees),
            high_degree_stations: Self::above_threshold(graph, &degrees, threshold),
        }
    }

    /// Degrees of every network station counting only the segments of `line`.
    /// Stations off the line get degree 0.
    pub fn line_view_degrees(graph: &TransitGraph, line: &str) -> Vec<usize> {
        let mut degrees = vec![0; graph.station_count()];
        let Some(line_index) = graph.line_index(line) else {
            warn!("Line {} has no segments in the network", line);
            return degrees;
        };

        for segment in graph.segments().iter().filter(|s| s.line == line_index) {
            degrees[segment.a] += 1;
            degrees[segment.b] += 1;
        }
        degrees
    }

    pub fn analyze_line_view(graph: &TransitGraph, line: &str, threshold: usize) -> DegreeReport {
        let degrees = Self::line_view_degrees(graph, line);
        DegreeReport {
            histogram: Self::histogram(&degrees),
            high_degree_stations: Self::above_threshold(graph, &degrees, threshold),
        }
    }

    /// Degree report of a single line in the requested mode
    pub fn analyze_line(graph: &TransitGraph, line: &str, mode: LineDegreeMode, threshold: usize) -> DegreeReport {
        match mode {
            LineDegreeMode::AllStations => Self::analyze_line_view(graph, line, threshold),
            LineDegreeMode::Induced => {
                let line_graph = LineExtractor::extract(graph, line);
                if line_graph.segment_count() == 0 {
                    warn!("Line {} has no segments in the network", line);
                }
                Self::analyze(&line_graph, threshold)
            }
        }
    }
}

/// Per-line subgraph extraction and topology classification
pub struct LineExtractor;

impl LineExtractor {
    /// Induced multigraph of one line: its segments and the stations they touch
    pub fn extract(graph: &TransitGraph, line: &str) -> TransitGraph {
        let mut line_graph = TransitGraph::new();

        if let Some(line_index) = graph.line_index(line) {
            for segment in graph.segments().iter().filter(|s| s.line == line_index) {
                line_graph.add_segment(
                    graph.station_name(segment.a),
                    graph.station_name(segment.b),
                    line,
                    segment.cost,
                );
            }
        }

        debug!(
            "Line {} subgraph: {} stations, {} segments",
            line,
            line_graph.station_count(),
            line_graph.segment_count()
        );
        line_graph
    }

    /// Histogram-shape heuristic: a line counts as a path when its histogram has
    /// 2 or 3 entries, i.e. the highest degree is 1 or 2. Linear connectivity is
    /// not checked.
    pub fn is_path_graph(histogram: &[usize]) -> bool {
        matches!(histogram.len(), 2 | 3)
    }

    /// Full summary of one line
    pub fn analyze(graph: &TransitGraph, line: &str, threshold: usize) -> LineInfo {
        let line_graph = Self::extract(graph, line);
        let degrees = DegreeAnalyzer::analyze(&line_graph, threshold);

        LineInfo {
            line: LineKey(line.to_string()),
            edges: line_graph.segment_count(),
            nodes: line_graph.station_count(),
            is_connected: GraphTraversal::is_connected(&line_graph),
            is_path_graph: Self::is_path_graph(&degrees.histogram),
            degree_histogram: degrees.histogram,
            high_degree_nodes: degrees.high_degree_stations,
        }
    }
}
