//! Queries over loaded floor plans that do not need the routing graph

pub mod search;

pub use search::{SearchHit, search_features};
