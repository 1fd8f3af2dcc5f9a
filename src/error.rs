use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by dataset loading and graph queries
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to read input document {}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input document {}", path.display())]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("station '{0}' not found in graph")]
    NodeNotFound(String),

    #[error("no path between '{from}' and '{to}'")]
    NoPathExists { from: String, to: String },
}

impl AnalysisError {
    /// True for errors raised before any query could run
    pub fn is_input_load(&self) -> bool {
        matches!(self, Self::InputRead { .. } | Self::InputParse { .. })
    }
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
