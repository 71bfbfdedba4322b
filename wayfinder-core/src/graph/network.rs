use std::collections::BTreeSet;

use geo::Coord;
use hashbrown::HashMap;
use petgraph::{
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};

use super::{index::FloorIndex, stairs::StairRecord};
use crate::{
    Cost,
    model::{FloorId, NodeKey},
};

/// Routing graph node: a rounded position on one floor
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub key: NodeKey,
    /// First coordinate seen for this key, used for output geometry
    pub coord: Coord<f64>,
}

impl GraphNode {
    pub fn floor(&self) -> &FloorId {
        &self.key.floor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeKind {
    /// Consecutive vertices of a walkable line on one floor
    Walkway,
    /// The same stair location on two different floors
    Stair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    pub kind: EdgeKind,
    pub weight: Cost,
}

/// Immutable, undirected multi-floor routing graph.
///
/// Built once per floor snapshot by [`super::build_graph`] and never mutated
/// afterwards; a reload produces a new value.
#[derive(Debug, Clone, Default)]
pub struct RoutingGraph {
    pub(crate) graph: UnGraph<GraphNode, GraphEdge>,
    pub(crate) lookup: HashMap<NodeKey, NodeIndex>,
    pub(crate) stairs: Vec<StairRecord>,
    pub(crate) floor_indices: HashMap<FloorId, FloorIndex>,
    pub(crate) generation: u64,
}

impl RoutingGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn edge_count_of(&self, kind: EdgeKind) -> usize {
        self.graph
            .edge_weights()
            .filter(|edge| edge.kind == kind)
            .count()
    }

    pub fn node_index(&self, key: &NodeKey) -> Option<NodeIndex> {
        self.lookup.get(key).copied()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(index)
    }

    pub fn contains(&self, index: NodeIndex) -> bool {
        index.index() < self.graph.node_count()
    }

    /// Adjacent nodes with the connecting edge
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, &GraphEdge)> {
        self.graph.edges(node).map(move |edge| {
            let other = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            (other, edge.weight())
        })
    }

    /// Number of distinct neighbours, i.e. the size of the adjacency set
    pub fn degree(&self, node: NodeIndex) -> usize {
        self.graph.neighbors(node).collect::<BTreeSet<_>>().len()
    }

    pub fn stairs(&self) -> &[StairRecord] {
        &self.stairs
    }

    /// Floors that have at least one node, sorted
    pub fn floors(&self) -> Vec<&FloorId> {
        let mut floors: Vec<&FloorId> = self.floor_indices.keys().collect();
        floors.sort();
        floors
    }

    pub fn nodes_on_floor(&self, floor: &FloorId) -> usize {
        self.floor_indices.get(floor).map_or(0, FloorIndex::len)
    }

    /// Generation of the snapshot this graph was built from
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Order independent view of all edges, endpoints sorted per edge
    pub fn edge_set(&self) -> BTreeSet<(NodeKey, NodeKey, EdgeKind, Cost)> {
        self.graph
            .edge_references()
            .map(|edge| {
                let a = self.graph[edge.source()].key.clone();
                let b = self.graph[edge.target()].key.clone();
                let (a, b) = if a <= b { (a, b) } else { (b, a) };
                (a, b, edge.weight().kind, edge.weight().weight)
            })
            .collect()
    }

    pub fn node_set(&self) -> BTreeSet<NodeKey> {
        self.lookup.keys().cloned().collect()
    }
}
