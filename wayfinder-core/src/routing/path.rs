use geo::Coord;
use petgraph::graph::NodeIndex;

use crate::{
    Cost,
    model::{FloorId, NodeKey},
};

/// One step of a solved path
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub key: NodeKey,
    pub coord: Coord<f64>,
}

impl Waypoint {
    pub fn floor(&self) -> &FloorId {
        &self.key.floor
    }
}

/// Ordered waypoints from start to end inclusive
#[derive(Debug, Clone)]
pub struct Path {
    pub nodes: Vec<NodeIndex>,
    pub waypoints: Vec<Waypoint>,
    pub cost: Cost,
}

impl Path {
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn first(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    pub fn last(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }

    /// Number of consecutive waypoint pairs on different floors
    pub fn floor_changes(&self) -> usize {
        self.waypoints
            .windows(2)
            .filter(|pair| pair[0].floor() != pair[1].floor())
            .count()
    }
}
