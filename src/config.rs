//! Configuration management for the RInf graph analyzer
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable prefix, e.g. `RINF_LINE_DEGREE_THRESHOLD`
pub const ENV_PREFIX: &str = "RINF";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory holding the graph documents
    pub data_dir: PathBuf,
    pub graph_file: String,
    pub original_graph_file: String,
    /// Whole-network queries list stations with a degree above this
    pub network_degree_threshold: usize,
    /// Line queries list stations with a degree above this
    pub line_degree_threshold: usize,
    pub log_level: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("rinf-data"),
            graph_file: "Graph.json".to_string(),
            original_graph_file: "Graph-orig.json".to_string(),
            network_degree_threshold: 10,
            line_degree_threshold: 2,
            log_level: "info".to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Layer defaults, an optional file and `RINF_*` environment variables
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(config_path, ENV_PREFIX)
    }

    fn load_with_prefix(config_path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let defaults = ::config::Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let mut builder = ::config::Config::builder().add_source(defaults);

        if let Some(path) = config_path {
            if path.exists() {
                info!("Loading configuration from: {:?}", path);
            } else {
                debug!("Configuration file {:?} not found, skipping", path);
            }
            builder = builder.add_source(::config::File::from(path.to_path_buf()).required(false));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to assemble configuration")?;

        let config: AnalyzerConfig = settings
            .try_deserialize()
            .context("Failed to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration as YAML
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write configuration file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Apply command line overrides on top of the loaded layers
    pub fn apply_overrides(&mut self, data_dir: Option<PathBuf>, log_level: Option<String>) {
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        if let Some(log_level) = log_level {
            self.log_level = log_level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.graph_file.trim().is_empty() {
            return Err(anyhow::anyhow!("graph_file must not be empty"));
        }

        if self.original_graph_file.trim().is_empty() {
            return Err(anyhow::anyhow!("original_graph_file must not be empty"));
        }

        if self.log_level.trim().is_empty() {
            return Err(anyhow::anyhow!("log_level must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let config = AnalyzerConfig::load_with_prefix(None, "RINF_TEST_DEFAULTS").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rinf-analyze.yml");

        let config = AnalyzerConfig {
            network_degree_threshold: 6,
            data_dir: PathBuf::from("/srv/rinf"),
            ..AnalyzerConfig::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = AnalyzerConfig::load_with_prefix(Some(&path), "RINF_TEST_FILE").unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.yaml");
        fs::write(&path, "line_degree_threshold: 4\n").unwrap();

        let loaded = AnalyzerConfig::load_with_prefix(Some(&path), "RINF_TEST_PARTIAL").unwrap();
        assert_eq!(loaded.line_degree_threshold, 4);
        assert_eq!(loaded.network_degree_threshold, 10);
        assert_eq!(loaded.graph_file, "Graph.json");
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yml");

        let loaded = AnalyzerConfig::load_with_prefix(Some(&path), "RINF_TEST_ABSENT").unwrap();
        assert_eq!(loaded, AnalyzerConfig::default());
    }

    #[test]
    fn test_environment_overrides() {
        std::env::set_var("RINF_TEST_ENV_LINE_DEGREE_THRESHOLD", "5");
        let loaded = AnalyzerConfig::load_with_prefix(None, "RINF_TEST_ENV").unwrap();
        std::env::remove_var("RINF_TEST_ENV_LINE_DEGREE_THRESHOLD");

        assert_eq!(loaded.line_degree_threshold, 5);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());

        config.graph_file = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = AnalyzerConfig::default();
        config.apply_overrides(Some(PathBuf::from("other")), None);

        assert_eq!(config.data_dir, PathBuf::from("other"));
        assert_eq!(config.log_level, "info");
    }
}
