//! Multi-floor routing graph and its construction from floor snapshots

mod builder;
mod index;
pub mod network;
pub mod stairs;

pub use builder::build_graph;
pub use network::{EdgeKind, GraphEdge, GraphNode, RoutingGraph};
pub use stairs::{StairRecord, collect_stairs};
