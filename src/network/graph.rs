use crate::types::{GraphStatistics, StationRecord};
use std::collections::HashMap;
use tracing::{debug, info};

/// Dense index of an interned station
pub type StationIndex = usize;

/// Dense index of an interned line identifier
pub type LineIndex = usize;

/// Undirected segment between two stations on one line
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub a: StationIndex,
    pub b: StationIndex,
    pub line: LineIndex,
    pub cost: f64,
}

impl Segment {
    /// The endpoint opposite to `station`. Self-loops return the station itself
    pub fn other(&self, station: StationIndex) -> StationIndex {
        if self.a == station {
            self.b
        } else {
            self.a
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.a == self.b
    }
}

/// Weighted transit multigraph with arena storage.
///
/// Stations and line identifiers are interned to dense indices; segments are flat
/// records referencing them. Between one unordered station pair a line identifier
/// keys at most one segment.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    stations: Vec<String>,
    station_map: HashMap<String, StationIndex>,
    lines: Vec<String>,
    line_map: HashMap<String, LineIndex>,
    segments: Vec<Segment>,
    incidence: Vec<Vec<usize>>,
    pair_index: HashMap<(StationIndex, StationIndex), HashMap<LineIndex, usize>>,
}

impl TransitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from the records of an input document
    pub fn from_records(records: &[StationRecord]) -> Self {
        let mut graph = Self::new();

        for record in records {
            let from = graph.intern_station(&record.station);
            for segment in &record.segments {
                let to = graph.intern_station(&segment.target);
                graph.insert_segment(from, to, &segment.line, segment.cost);
            }
        }

        info!(
            "Transit graph built with {} stations and {} segments",
            graph.station_count(),
            graph.segment_count()
        );

        graph
    }

    /// Add a segment by station name, creating stations on first reference
    pub fn add_segment(&mut self, from: &str, to: &str, line: &str, cost: f64) {
        let a = self.intern_station(from);
        let b = self.intern_station(to);
        self.insert_segment(a, b, line, cost);
    }

    pub fn intern_station(&mut self, name: &str) -> StationIndex {
        if let Some(&index) = self.station_map.get(name) {
            return index;
        }
        let index = self.stations.len();
        self.stations.push(name.to_string());
        self.station_map.insert(name.to_string(), index);
        self.incidence.push(Vec::new());
        index
    }

    fn intern_line(&mut self, line: &str) -> LineIndex {
        if let Some(&index) = self.line_map.get(line) {
            return index;
        }
        let index = self.lines.len();
        self.lines.push(line.to_string());
        self.line_map.insert(line.to_string(), index);
        index
    }

    /// Insert a segment keyed by line. An existing segment with the same pair and line
    /// keeps its position and takes the new cost.
    fn insert_segment(&mut self, a: StationIndex, b: StationIndex, line: &str, cost: f64) {
        let line_index = self.intern_line(line);
        let pair = (a.min(b), a.max(b));
        let keyed = self.pair_index.entry(pair).or_default();

        if let Some(&existing) = keyed.get(&line_index) {
            debug!(
                "Segment {} - {} on line {} overwritten (cost {} -> {})",
                self.stations[a], self.stations[b], line, self.segments[existing].cost, cost
            );
            self.segments[existing].cost = cost;
            return;
        }

        let segment_index = self.segments.len();
        keyed.insert(line_index, segment_index);
        self.segments.push(Segment {
            a,
            b,
            line: line_index,
            cost,
        });
        self.incidence[a].push(segment_index);
        if a != b {
            self.incidence[b].push(segment_index);
        }
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn station_index(&self, name: &str) -> Option<StationIndex> {
        self.station_map.get(name).copied()
    }

    pub fn station_name(&self, index: StationIndex) -> &str {
        &self.stations[index]
    }

    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn line_index(&self, line: &str) -> Option<LineIndex> {
        self.line_map.get(line).copied()
    }

    pub fn line_name(&self, index: LineIndex) -> &str {
        &self.lines[index]
    }

    /// Distinct line identifiers in ascending string order
    pub fn line_ids(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = self.lines.iter().map(String::as_str).collect();
        lines.sort_unstable();
        lines
    }

    /// Segments touching a station, each listed once (self-loops included)
    pub fn incident_segments(&self, station: StationIndex) -> impl Iterator<Item = &Segment> + '_ {
        self.incidence[station].iter().map(move |&index| &self.segments[index])
    }

    /// Segment between two stations on a given line, if any
    pub fn segment_between(&self, from: &str, to: &str, line: &str) -> Option<&Segment> {
        let a = self.station_index(from)?;
        let b = self.station_index(to)?;
        let line_index = self.line_index(line)?;
        let segment_index = self.pair_index.get(&(a.min(b), a.max(b)))?.get(&line_index)?;
        Some(&self.segments[*segment_index])
    }

    /// Degree of every station, indexed by station. Parallel segments count with
    /// multiplicity and a self-loop counts twice.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.stations.len()];
        for segment in &self.segments {
            degrees[segment.a] += 1;
            degrees[segment.b] += 1;
        }
        degrees
    }

    pub fn degree(&self, name: &str) -> Option<usize> {
        let index = self.station_index(name)?;
        Some(
            self.incident_segments(index)
                .map(|segment| if segment.is_self_loop() { 2 } else { 1 })
                .sum(),
        )
    }

    /// Graph summary
    pub fn statistics(&self) -> GraphStatistics {
        let total_stations = self.station_count();
        let total_degree: usize = self.degrees().iter().sum();

        let average_degree = if total_stations > 0 {
            total_degree as f64 / total_stations as f64
        } else {
            0.0
        };

        GraphStatistics {
            total_stations,
            total_segments: self.segment_count(),
            total_lines: self.line_count(),
            average_degree,
        }
    }
}
