use crate::network::{LineExtractor, TransitGraph};
use crate::reports::formatters::{JsonFormatter, ReportFormatter, TextFormatter};
use crate::types::LineInfo;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Assembles per-line summaries for every line of the network
pub struct ReportGenerator {
    line_degree_threshold: usize,
}

impl ReportGenerator {
    pub fn new(line_degree_threshold: usize) -> Self {
        Self {
            line_degree_threshold,
        }
    }

    /// One record per distinct line, in ascending line order
    pub fn line_infos(&self, graph: &TransitGraph) -> Vec<LineInfo> {
        let infos: Vec<LineInfo> = graph
            .line_ids()
            .into_iter()
            .map(|line| LineExtractor::analyze(graph, line, self.line_degree_threshold))
            .collect();

        info!("Analyzed {} lines", infos.len());
        infos
    }

    /// Render the reports in the specified format
    pub fn render(&self, infos: &[LineInfo], format: &str, pretty: bool) -> Result<String> {
        match format.to_lowercase().as_str() {
            "json" => JsonFormatter { pretty }.format(infos),
            "text" => TextFormatter.format(infos),
            _ => Err(anyhow::anyhow!("Unsupported format: {}", format)),
        }
    }

    /// Analyze every line and write the report to `output_path`
    pub fn write_report<P: AsRef<Path>>(
        &self,
        graph: &TransitGraph,
        output_path: P,
        format: &str,
        pretty: bool,
    ) -> Result<Vec<LineInfo>> {
        let output_path = output_path.as_ref();
        let infos = self.line_infos(graph);
        let content = self.render(&infos, format, pretty)?;

        fs::write(output_path, content)
            .with_context(|| format!("Failed to write line report to: {:?}", output_path))?;
        info!("Line report written to: {:?}", output_path);

        Ok(infos)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(2)
    }
}
