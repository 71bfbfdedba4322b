//! Data model for multi-floor indoor routing
//!
//! Contains floor identifiers, floor plan features, canonical node keys and
//! the snapshot of all floors a graph is built from.

pub mod feature;
pub mod floor;
pub mod geometry;
pub mod node;
pub mod snapshot;

pub use feature::{FloorFeature, Tags};
pub use floor::{FloorId, parse_levels};
pub use geometry::{FeatureGeometry, haversine_distance, index_midpoint};
pub use node::{COORD_SCALE, FixedCoord, NodeKey};
pub use snapshot::{FloorLoadFailure, FloorSnapshot};
