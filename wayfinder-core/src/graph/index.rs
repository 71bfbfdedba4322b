//! Per-floor spatial index over graph nodes.
//!
//! Nodes are projected onto a local equirectangular plane (metres) around the
//! mean latitude of the floor. East-west distances shrink away from that
//! latitude, so callers scale planar distances by [`FloorIndex::lower_bound_scale`]
//! before treating them as a bound on great-circle distance.

use std::fmt;

use geo::Coord;
use petgraph::graph::NodeIndex;
use rstar::{RTree, primitives::GeomWithData};

const EARTH_RADIUS_M: f64 = 6_371_008.8;

type IndexedNode = GeomWithData<[f64; 2], NodeIndex>;

#[derive(Clone)]
pub(crate) struct FloorIndex {
    tree: RTree<IndexedNode>,
    cos_lat: f64,
    /// Cosine of the latitude furthest from the equator
    min_cos_lat: f64,
}

impl FloorIndex {
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn new(nodes: &[(NodeIndex, Coord<f64>)]) -> Self {
        let mean_lat = if nodes.is_empty() {
            0.0
        } else {
            nodes.iter().map(|(_, c)| c.y).sum::<f64>() / nodes.len() as f64
        };
        let cos_lat = mean_lat.to_radians().cos();
        let min_cos_lat = nodes
            .iter()
            .map(|(_, c)| c.y.to_radians().cos())
            .fold(cos_lat, f64::min);

        let entries = nodes
            .iter()
            .map(|&(node, coord)| GeomWithData::new(project(coord, cos_lat), node))
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
            cos_lat,
            min_cos_lat,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.size()
    }

    /// Factor that turns a planar distance from [`Self::nearest_iter`] into a
    /// lower bound on the great-circle distance from `coord`.
    ///
    /// Uses the latitude furthest from the equator among the floor's nodes and
    /// the query, so the search widens as the latitude spread grows.
    pub(crate) fn lower_bound_scale(&self, coord: Coord<f64>) -> f64 {
        if self.cos_lat <= f64::EPSILON {
            return 0.0;
        }
        let min_cos = self.min_cos_lat.min(coord.y.to_radians().cos()).max(0.0);
        (min_cos / self.cos_lat).min(1.0)
    }

    /// Nodes in increasing planar distance, with that distance in metres
    pub(crate) fn nearest_iter(&self, coord: Coord<f64>) -> impl Iterator<Item = (NodeIndex, f64)> {
        let query = project(coord, self.cos_lat);
        self.tree
            .nearest_neighbor_iter_with_distance_2(&query)
            .map(|(entry, distance_2)| (entry.data, distance_2.sqrt()))
    }
}

impl fmt::Debug for FloorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloorIndex")
            .field("nodes", &self.tree.size())
            .finish()
    }
}

fn project(coord: Coord<f64>, cos_lat: f64) -> [f64; 2] {
    [
        coord.x.to_radians() * cos_lat * EARTH_RADIUS_M,
        coord.y.to_radians() * EARTH_RADIUS_M,
    ]
}
