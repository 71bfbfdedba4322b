//! Complete route requests: snapping, solving, segmentation and directions

mod to_geojson;

use geo::Coord;
use log::debug;

use super::{
    directions::{route_summary, transition_instruction},
    dijkstra::shortest_path,
    path::Path,
    segment::{FloorSegment, RouteWarning, StairTransition, segment_path},
    snap::Snap,
};
use crate::{
    Cost, Error, RoutingConfig,
    graph::RoutingGraph,
    model::{FloorFeature, FloorId, index_midpoint},
};

/// A requested route start or destination
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEndpoint {
    /// x = longitude, y = latitude
    pub coord: Coord<f64>,
    pub floor: FloorId,
}

impl RouteEndpoint {
    pub fn new(lat: f64, lon: f64, floor: impl Into<FloorId>) -> Self {
        Self {
            coord: Coord { x: lon, y: lat },
            floor: floor.into(),
        }
    }

    /// Endpoint for a selected map feature: its index midpoint on the first
    /// floor it lists, or on `fallback_floor` when it has no level
    pub fn from_feature(feature: &FloorFeature, fallback_floor: &FloorId) -> Option<Self> {
        let coord = index_midpoint(&feature.geometry)?;
        let floor = feature
            .tags
            .levels()
            .into_iter()
            .next()
            .unwrap_or_else(|| fallback_floor.clone());
        Some(Self { coord, floor })
    }
}

/// A solved multi-floor route ready for rendering
#[derive(Debug, Clone)]
pub struct Route {
    pub start: Snap,
    pub end: Snap,
    pub path: Path,
    pub segments: Vec<FloorSegment>,
    pub transitions: Vec<StairTransition>,
    /// One instruction per transition
    pub instructions: Vec<String>,
    pub summary: String,
    pub warnings: Vec<RouteWarning>,
    /// Snapshot generation of the graph that produced the route
    pub generation: u64,
}

impl Route {
    /// Plan a route on `graph` between two endpoints.
    ///
    /// # Errors
    ///
    /// `NoWalkableGeometryOnFloor` when an endpoint floor has no nodes and
    /// `Disconnected` when no path links the snapped nodes.
    pub fn plan(
        graph: &RoutingGraph,
        start: &RouteEndpoint,
        end: &RouteEndpoint,
        config: &RoutingConfig,
    ) -> Result<Self, Error> {
        let start_snap = graph
            .nearest_node(start.coord, &start.floor)
            .ok_or_else(|| Error::NoWalkableGeometryOnFloor(start.floor.clone()))?;
        let end_snap = graph
            .nearest_node(end.coord, &end.floor)
            .ok_or_else(|| Error::NoWalkableGeometryOnFloor(end.floor.clone()))?;

        let path = shortest_path(graph, start_snap.node, end_snap.node)?;
        let segmentation = segment_path(&path, graph.stairs(), &config.stair_label);

        let instructions = segmentation
            .transitions
            .iter()
            .map(|t| transition_instruction(t, config))
            .collect();
        let summary = route_summary(
            &start.floor,
            &end.floor,
            &segmentation.transitions,
            config,
        );

        debug!(
            "Route from {} to {}: {} waypoints, cost {}, {} floor changes",
            start_snap.key,
            end_snap.key,
            path.len(),
            path.cost,
            segmentation.transitions.len()
        );

        Ok(Self {
            start: start_snap,
            end: end_snap,
            path,
            segments: segmentation.segments,
            transitions: segmentation.transitions,
            instructions,
            summary,
            warnings: segmentation.warnings,
            generation: graph.generation(),
        })
    }

    pub fn cost(&self) -> Cost {
        self.path.cost
    }
}
