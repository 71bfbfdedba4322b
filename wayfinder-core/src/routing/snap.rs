//! Snapping of arbitrary query locations onto the routing graph

use std::cmp::Ordering;

use geo::Coord;
use log::trace;
use petgraph::graph::NodeIndex;

use crate::{
    graph::RoutingGraph,
    model::{FloorId, NodeKey, haversine_distance},
};

/// Tolerance between the planar lower bound and great-circle distance
const PLANAR_SLACK_RATIO: f64 = 1.01;
const PLANAR_SLACK_M: f64 = 1.0;

/// Graph node closest to a query point
#[derive(Debug, Clone, PartialEq)]
pub struct Snap {
    pub node: NodeIndex,
    pub key: NodeKey,
    pub coord: Coord<f64>,
    /// Great-circle distance from the query point in metres
    pub distance: f64,
    /// Set when the node is the anchor of a stair serving the floor
    pub stair_name: Option<String>,
}

impl RoutingGraph {
    /// Nearest node on `floor` to `point` (x = longitude, y = latitude).
    ///
    /// Candidates are every walkway vertex on the floor and the anchor of
    /// every stair serving it. Equal distances resolve to the node that was
    /// added to the graph first. `None` when the floor has no nodes.
    ///
    /// The spatial index is planar, so candidates are taken in planar order
    /// until their scaled planar distance exceeds the best great-circle
    /// distance found so far plus a small slack. Floors spanning tens of
    /// degrees of latitude degrade towards a full scan rather than a wrong
    /// answer.
    pub fn nearest_node(&self, point: Coord<f64>, floor: &FloorId) -> Option<Snap> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let index = self.floor_indices.get(floor)?;
        let scale = index.lower_bound_scale(point);

        let mut best: Option<(f64, NodeIndex)> = None;

        for (node, planar) in index.nearest_iter(point) {
            if let Some((best_distance, _)) = best
                && planar * scale > best_distance * PLANAR_SLACK_RATIO + PLANAR_SLACK_M
            {
                break;
            }

            let distance = haversine_distance(point, self.graph[node].coord);
            let better = match best {
                None => true,
                Some((best_distance, best_node)) => match distance.total_cmp(&best_distance) {
                    Ordering::Less => true,
                    Ordering::Equal => node.index() < best_node.index(),
                    Ordering::Greater => false,
                },
            };
            if better {
                best = Some((distance, node));
            }
        }

        let (distance, node) = best?;
        let graph_node = &self.graph[node];
        let stair_name = self
            .stairs
            .iter()
            .find(|stair| stair.serves(floor) && stair.is_anchored_at(graph_node.key.position))
            .map(|stair| stair.name.clone());

        trace!(
            "Snapped ({:.7}, {:.7}) to {} at {distance:.1} m",
            point.y, point.x, graph_node.key
        );

        Some(Snap {
            node,
            key: graph_node.key.clone(),
            coord: graph_node.coord,
            distance,
            stair_name,
        })
    }
}
