// Re-export key components
pub use crate::algo::search::{SearchHit, search_features};
pub use crate::config::{EdgeWeights, RoutingConfig};
pub use crate::engine::{Engine, FloorReport, LoadReport, RoutingState};
pub use crate::graph::{RoutingGraph, StairRecord, build_graph};
pub use crate::loading::{
    DirectoryLoader, FloorLoader, FloorSourceConfig, load_snapshot, parse_feature_collection,
};
pub use crate::model::{
    FeatureGeometry, FloorFeature, FloorId, FloorLoadFailure, FloorSnapshot, NodeKey, Tags,
    index_midpoint,
};
pub use crate::routing::{
    FloorSegment, Path, Route, RouteEndpoint, RouteWarning, Snap, StairTransition, Waypoint,
    shortest_path,
};

// Core scalar types
pub use crate::Cost;
pub use crate::Error;
pub use crate::{DEFAULT_FLOOR, DEFAULT_STAIR_LABEL};
