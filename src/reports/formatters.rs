use crate::network::DegreeReport;
use crate::types::{GraphStatistics, LineInfo, Route};
use anyhow::Result;

/// Trait for line report formatters
pub trait ReportFormatter {
    fn format(&self, infos: &[LineInfo]) -> Result<String>;
}

/// JSON array of line records
pub struct JsonFormatter {
    pub pretty: bool,
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, infos: &[LineInfo]) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(infos)?)
        } else {
            Ok(serde_json::to_string(infos)?)
        }
    }
}

/// Plain text table, one line per record
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format(&self, infos: &[LineInfo]) -> Result<String> {
        let mut out = format!(
            "{:<10} {:>6} {:>6} {:>10} {:>5}  {}\n",
            "line", "edges", "nodes", "connected", "path", "junctions"
        );

        for info in infos {
            let junctions: Vec<String> = info
                .high_degree_nodes
                .iter()
                .map(|(station, degree)| format!("{}({})", station, degree))
                .collect();

            out.push_str(&format!(
                "{:<10} {:>6} {:>6} {:>10} {:>5}  {}\n",
                info.line.0,
                info.edges,
                info.nodes,
                info.is_connected,
                info.is_path_graph,
                junctions.join(" ")
            ));
        }

        Ok(out)
    }
}

/// Console output for a shortest path query
pub fn format_route(route: &Route) -> String {
    format!("path:  {:?}\ncost:  {}", route.stations, route.cost)
}

/// Histogram line followed by one `station degree` line per high-degree station
pub fn format_degree_report(report: &DegreeReport) -> String {
    let mut out = format!("degree_histogram:  {:?}", report.histogram);
    for (station, degree) in &report.high_degree_stations {
        out.push_str(&format!("\n{} {}", station, degree));
    }
    out
}

pub fn format_statistics(stats: &GraphStatistics) -> String {
    format!(
        "Number of stations: {}\nNumber of segments: {}\nNumber of lines: {}\nAverage degree: {:.4}",
        stats.total_stations, stats.total_segments, stats.total_lines, stats.average_degree
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineKey;

    fn sample_info() -> LineInfo {
        LineInfo {
            line: LineKey("4010".to_string()),
            edges: 3,
            nodes: 4,
            is_connected: true,
            is_path_graph: false,
            degree_histogram: vec![0, 3, 0, 1],
            high_degree_nodes: vec![("DE0HH".to_string(), 3)],
        }
    }

    #[test]
    fn test_json_formatter_compact() {
        let json = JsonFormatter { pretty: false }.format(&[sample_info()]).unwrap();
        assert!(json.starts_with("[{\"line\":4010,"));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_text_formatter_lists_junctions() {
        let text = TextFormatter.format(&[sample_info()]).unwrap();
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows.len(), 2);
        assert!(rows[1].starts_with("4010"));
        assert!(rows[1].ends_with("DE0HH(3)"));
    }

    #[test]
    fn test_format_route() {
        let route = Route {
            stations: vec!["A".to_string(), "B".to_string()],
            cost: 3.0,
        };
        assert_eq!(format_route(&route), "path:  [\"A\", \"B\"]\ncost:  3");
    }

    #[test]
    fn test_format_degree_report() {
        let report = DegreeReport {
            histogram: vec![0, 2, 1],
            high_degree_stations: vec![("B".to_string(), 11)],
        };
        assert_eq!(format_degree_report(&report), "degree_histogram:  [0, 2, 1]\nB 11");
    }
}
