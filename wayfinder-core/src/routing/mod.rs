pub mod dijkstra;
pub mod directions;
mod itinerary;
pub mod path;
pub mod segment;
mod snap;

pub use dijkstra::shortest_path;
pub use directions::{route_summary, transition_instruction};
pub use itinerary::{Route, RouteEndpoint};
pub use path::{Path, Waypoint};
pub use segment::{FloorSegment, RouteWarning, Segmentation, StairTransition, segment_path};
pub use snap::Snap;
