pub mod config;
pub mod dataset;
pub mod error;
pub mod network;
pub mod reports;
pub mod types;

pub use error::{AnalysisError, AnalysisResult};
