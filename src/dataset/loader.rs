use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::network::TransitGraph;
use crate::types::StationRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which of the two published graph documents to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatasetSource {
    #[default]
    Default,
    Original,
}

impl DatasetSource {
    pub fn from_flag(original: bool) -> Self {
        if original {
            Self::Original
        } else {
            Self::Default
        }
    }
}

/// Loader for the station/segment JSON document
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    input_path: PathBuf,
}

impl DatasetLoader {
    pub fn new<P: AsRef<Path>>(input_path: P) -> Self {
        Self {
            input_path: input_path.as_ref().to_path_buf(),
        }
    }

    /// Resolve the document path for a source under the configured data directory
    pub fn for_source(config: &AnalyzerConfig, source: DatasetSource) -> Self {
        let file_name = match source {
            DatasetSource::Default => &config.graph_file,
            DatasetSource::Original => &config.original_graph_file,
        };
        Self::new(config.data_dir.join(file_name))
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Read and parse every station record. Any missing field fails the whole load
    pub fn load_records(&self) -> AnalysisResult<Vec<StationRecord>> {
        debug!("Loading graph document from: {:?}", self.input_path);

        let content = fs::read_to_string(&self.input_path).map_err(|source| AnalysisError::InputRead {
            path: self.input_path.clone(),
            source,
        })?;

        let records: Vec<StationRecord> =
            serde_json::from_str(&content).map_err(|source| AnalysisError::InputParse {
                path: self.input_path.clone(),
                source,
            })?;

        info!("Loaded {} station records from {:?}", records.len(), self.input_path);
        Ok(records)
    }

    pub fn load_graph(&self) -> AnalysisResult<TransitGraph> {
        let records = self.load_records()?;
        Ok(TransitGraph::from_records(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_document(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_graph() {
        let file = write_document(
            r#"[
                {"Node": "A", "Edges": [{"Node": "B", "Line": "1", "Cost": 1}]},
                {"Node": "B", "Edges": [
                    {"Node": "A", "Line": "1", "Cost": 4},
                    {"Node": "C", "Line": "1", "Cost": 2.5}
                ]}
            ]"#,
        );

        let graph = DatasetLoader::new(file.path()).load_graph().unwrap();

        assert_eq!(graph.station_count(), 3);
        assert_eq!(graph.segment_count(), 2);
        assert_eq!(graph.segment_between("A", "B", "1").unwrap().cost, 4.0);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let loader = DatasetLoader::new(dir.path().join("Graph.json"));

        let err = loader.load_records().unwrap_err();
        assert!(matches!(err, AnalysisError::InputRead { .. }));
        assert!(err.is_input_load());
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let file = write_document(r#"[{"Node": "A", "Edges": [{"Node": "B", "Cost": 1}]}]"#);

        let err = DatasetLoader::new(file.path()).load_records().unwrap_err();
        assert!(matches!(err, AnalysisError::InputParse { .. }));
    }

    #[test]
    fn test_source_resolution() {
        let config = AnalyzerConfig {
            data_dir: PathBuf::from("data"),
            ..AnalyzerConfig::default()
        };

        let default = DatasetLoader::for_source(&config, DatasetSource::from_flag(false));
        let original = DatasetLoader::for_source(&config, DatasetSource::from_flag(true));

        assert_eq!(default.input_path(), Path::new("data/Graph.json"));
        assert_eq!(original.input_path(), Path::new("data/Graph-orig.json"));
    }
}
