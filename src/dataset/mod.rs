pub mod loader;

pub use loader::{DatasetLoader, DatasetSource};
