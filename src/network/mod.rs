pub mod analyzer;
pub mod graph;
pub mod traversal;
pub mod union_find;

pub use analyzer::{DegreeAnalyzer, DegreeReport, LineDegreeMode, LineExtractor};
pub use graph::TransitGraph;
pub use traversal::GraphTraversal;
