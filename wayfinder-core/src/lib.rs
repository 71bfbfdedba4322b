//! Multi-floor indoor routing.
//!
//! Builds a navigable graph from per-floor GeoJSON floor plans, snaps query
//! locations onto it and computes stair-aware shortest paths, split into
//! per-floor segments with floor transition instructions.

pub mod algo;
pub mod config;
pub mod engine;
mod error;
pub mod graph;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use config::{EdgeWeights, RoutingConfig};
pub use engine::{Engine, FloorReport, LoadReport, RoutingState};
pub use error::Error;
pub use graph::{RoutingGraph, build_graph};
pub use loading::{DirectoryLoader, FloorLoader, FloorSourceConfig, load_snapshot};
pub use model::{FloorFeature, FloorId, FloorSnapshot, NodeKey};
pub use routing::{Route, RouteEndpoint};

/// Route cost in abstract units (one walkway hop by default)
pub type Cost = u32;

/// Floor assumed for walkways that carry no `level` tag
pub const DEFAULT_FLOOR: &str = "0";

/// Label used for stairs without a `name` tag
pub const DEFAULT_STAIR_LABEL: &str = "Stair";
