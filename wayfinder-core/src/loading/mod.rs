//! This module is responsible for loading per-floor GeoJSON floor plans
//! into an immutable snapshot.

mod builder;
mod config;
mod loader;
mod parser;

pub use builder::load_snapshot;
pub use config::FloorSourceConfig;
pub use loader::{DirectoryLoader, FloorLoader};
pub use parser::parse_feature_collection;
