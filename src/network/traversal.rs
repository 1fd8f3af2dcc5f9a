use crate::error::{AnalysisError, AnalysisResult};
use crate::network::graph::{StationIndex, TransitGraph};
use crate::network::union_find::UnionFind;
use crate::types::Route;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// Graph traversal utilities for transit network queries
pub struct GraphTraversal;

/// Heap entry ordered so that `BinaryHeap` pops the cheapest station first
#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    station: StationIndex,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.station.cmp(&self.station))
    }
}

impl GraphTraversal {
    /// Minimum-cost route between two named stations (Dijkstra).
    ///
    /// Every parallel segment is relaxed on its own, so the cheapest segment of a
    /// bundle decides the distance between its endpoints. A station is relaxed at
    /// most once, so the query terminates even when a segment has a negative cost.
    pub fn shortest_path(graph: &TransitGraph, from: &str, to: &str) -> AnalysisResult<Route> {
        let source = graph
            .station_index(from)
            .ok_or_else(|| AnalysisError::NodeNotFound(from.to_string()))?;
        let target = graph
            .station_index(to)
            .ok_or_else(|| AnalysisError::NodeNotFound(to.to_string()))?;

        let mut dist = vec![f64::INFINITY; graph.station_count()];
        let mut prev: Vec<Option<StationIndex>> = vec![None; graph.station_count()];
        let mut settled = vec![false; graph.station_count()];
        let mut heap = BinaryHeap::new();

        dist[source] = 0.0;
        heap.push(Frontier {
            cost: 0.0,
            station: source,
        });

        while let Some(Frontier { cost, station }) = heap.pop() {
            if station == target {
                break;
            }
            if settled[station] {
                continue;
            }
            settled[station] = true;

            for segment in graph.incident_segments(station) {
                if segment.is_self_loop() {
                    continue;
                }
                let next = segment.other(station);
                if settled[next] {
                    continue;
                }
                let candidate = cost + segment.cost;
                if candidate < dist[next] {
                    dist[next] = candidate;
                    prev[next] = Some(station);
                    heap.push(Frontier {
                        cost: candidate,
                        station: next,
                    });
                }
            }
        }

        if dist[target].is_infinite() {
            return Err(AnalysisError::NoPathExists {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        // Walk predecessors back from the target
        let mut path = vec![target];
        let mut current = target;
        while let Some(previous) = prev[current] {
            path.push(previous);
            current = previous;
        }
        path.reverse();

        let stations: Vec<String> = path
            .into_iter()
            .map(|index| graph.station_name(index).to_string())
            .collect();

        debug!(
            "Shortest path {} -> {}: {} stations, cost {}",
            from,
            to,
            stations.len(),
            dist[target]
        );

        Ok(Route {
            stations,
            cost: dist[target],
        })
    }

    /// Number of connected components
    pub fn connected_components(graph: &TransitGraph) -> usize {
        let mut components = UnionFind::new(graph.station_count());
        for segment in graph.segments() {
            components.union(segment.a, segment.b);
        }
        components.components()
    }

    /// True when the graph forms a single component. Vacuously true for at most one station
    pub fn is_connected(graph: &TransitGraph) -> bool {
        graph.station_count() <= 1 || Self::connected_components(graph) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StationRecord;

    fn create_test_graph() -> TransitGraph {
        // A -1- B -1- C
        let records = vec![
            StationRecord::new("A").with_segment("B", "1", 1.0),
            StationRecord::new("B").with_segment("C", "1", 2.0),
        ];
        TransitGraph::from_records(&records)
    }

    #[test]
    fn test_shortest_path_along_line() {
        let graph = create_test_graph();
        let route = GraphTraversal::shortest_path(&graph, "A", "C").unwrap();

        assert_eq!(route.stations, vec!["A", "B", "C"]);
        assert_eq!(route.cost, 3.0);
    }

    #[test]
    fn test_shortest_path_ignores_expensive_direct_segment() {
        let mut graph = create_test_graph();
        graph.add_segment("A", "C", "2", 10.0);

        let route = GraphTraversal::shortest_path(&graph, "A", "C").unwrap();
        assert_eq!(route.stations, vec!["A", "B", "C"]);
        assert_eq!(route.cost, 3.0);
    }

    #[test]
    fn test_shortest_path_uses_cheapest_parallel_segment() {
        let mut graph = create_test_graph();
        graph.add_segment("A", "C", "2", 10.0);
        graph.add_segment("C", "A", "3", 0.5);

        let route = GraphTraversal::shortest_path(&graph, "A", "C").unwrap();
        assert_eq!(route.stations, vec!["A", "C"]);
        assert_eq!(route.cost, 0.5);
    }

    #[test]
    fn test_shortest_path_is_symmetric() {
        let graph = create_test_graph();
        let route = GraphTraversal::shortest_path(&graph, "C", "A").unwrap();

        assert_eq!(route.stations, vec!["C", "B", "A"]);
        assert_eq!(route.cost, 3.0);
    }

    #[test]
    fn test_shortest_path_to_self() {
        let graph = create_test_graph();
        let route = GraphTraversal::shortest_path(&graph, "B", "B").unwrap();

        assert_eq!(route.stations, vec!["B"]);
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn test_unknown_station() {
        let graph = create_test_graph();

        match GraphTraversal::shortest_path(&graph, "A", "Q") {
            Err(AnalysisError::NodeNotFound(station)) => assert_eq!(station, "Q"),
            other => panic!("expected NodeNotFound, got {:?}", other),
        }
        assert!(matches!(
            GraphTraversal::shortest_path(&graph, "Q", "A"),
            Err(AnalysisError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_no_path_between_components() {
        let mut graph = create_test_graph();
        graph.add_segment("X", "Y", "1", 1.0);

        assert!(matches!(
            GraphTraversal::shortest_path(&graph, "A", "Y"),
            Err(AnalysisError::NoPathExists { .. })
        ));
    }

    #[test]
    fn test_negative_segment_cost_terminates() {
        let mut graph = TransitGraph::new();
        graph.add_segment("A", "B", "1", -1.0);
        graph.add_segment("B", "C", "1", 1.0);

        let route = GraphTraversal::shortest_path(&graph, "A", "C").unwrap();
        assert_eq!(route.stations, vec!["A", "B", "C"]);
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn test_connectivity() {
        let mut graph = create_test_graph();
        assert!(GraphTraversal::is_connected(&graph));
        assert_eq!(GraphTraversal::connected_components(&graph), 1);

        graph.add_segment("X", "Y", "1", 1.0);
        assert!(!GraphTraversal::is_connected(&graph));
        assert_eq!(GraphTraversal::connected_components(&graph), 2);
    }

    #[test]
    fn test_empty_graph_is_connected() {
        assert!(GraphTraversal::is_connected(&TransitGraph::new()));
    }
}
