use geo::{Coord, LineString};
use hashbrown::HashMap;
use itertools::Itertools;
use log::{debug, info, warn};
use petgraph::graph::{NodeIndex, UnGraph};

use super::{
    index::FloorIndex,
    network::{EdgeKind, GraphEdge, GraphNode, RoutingGraph},
    stairs::{StairRecord, collect_stairs},
};
use crate::{
    EdgeWeights, RoutingConfig,
    model::{FeatureGeometry, FloorId, FloorSnapshot, NodeKey},
};

/// Build a routing graph from a floor snapshot.
///
/// Walkways (corridors, service ways, footways) contribute one edge per pair
/// of consecutive vertices on every floor their `level` lists. Stairs
/// register their anchor on each listed floor and link every pair of those
/// floors. The result depends only on the snapshot contents and `config`.
pub fn build_graph(snapshot: &FloorSnapshot, config: &RoutingConfig) -> RoutingGraph {
    let mut builder = GraphBuilder::new(config.weights);

    for (_, features) in snapshot.floors() {
        for feature in features {
            match &feature.geometry {
                FeatureGeometry::LineString(line) if feature.tags.is_walkway() => {
                    for floor in feature.floors_or(&config.default_floor) {
                        builder.add_walkway(line, &floor);
                    }
                }
                geometry if feature.tags.is_walkway() => {
                    debug!("Ignoring walkway with {} geometry", geometry.type_name());
                }
                _ => {}
            }
        }
    }

    let stairs = collect_stairs(snapshot, &config.stair_label);
    for stair in &stairs {
        builder.add_stair(stair);
    }

    let graph = builder.finish(stairs, snapshot.generation());

    info!(
        "Built routing graph: {} nodes, {} walkway edges, {} stair edges, {} stairs on {} floors",
        graph.node_count(),
        graph.edge_count_of(EdgeKind::Walkway),
        graph.edge_count_of(EdgeKind::Stair),
        graph.stairs().len(),
        graph.floors().len()
    );
    if graph.stairs().is_empty() && snapshot.floor_count() > 1 {
        warn!("No stair features found, multi-floor routing may not work");
    }

    graph
}

struct GraphBuilder {
    graph: UnGraph<GraphNode, GraphEdge>,
    lookup: HashMap<NodeKey, NodeIndex>,
    weights: EdgeWeights,
}

impl GraphBuilder {
    fn new(weights: EdgeWeights) -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            lookup: HashMap::new(),
            weights,
        }
    }

    /// Existing node for the rounded key, or a new one
    fn node(&mut self, coord: Coord<f64>, floor: &FloorId) -> NodeIndex {
        let key = NodeKey::new(coord, floor.clone());
        let graph = &mut self.graph;
        *self
            .lookup
            .entry(key.clone())
            .or_insert_with(|| graph.add_node(GraphNode { key, coord }))
    }

    /// Insert an undirected edge unless the pair is already linked
    fn link(&mut self, a: NodeIndex, b: NodeIndex, kind: EdgeKind) -> bool {
        if a == b || self.graph.find_edge(a, b).is_some() {
            return false;
        }
        let weight = match kind {
            EdgeKind::Walkway => self.weights.walkway,
            EdgeKind::Stair => self.weights.stair,
        };
        self.graph.add_edge(a, b, GraphEdge { kind, weight });
        true
    }

    fn add_walkway(&mut self, line: &LineString<f64>, floor: &FloorId) {
        for segment in line.0.windows(2) {
            let from = self.node(segment[0], floor);
            let to = self.node(segment[1], floor);
            self.link(from, to, EdgeKind::Walkway);
        }
    }

    fn add_stair(&mut self, stair: &StairRecord) {
        let nodes: Vec<NodeIndex> = stair
            .floors
            .iter()
            .map(|floor| self.node(stair.anchor, floor))
            .collect();

        for (&a, &b) in nodes.iter().tuple_combinations() {
            self.link(a, b, EdgeKind::Stair);
        }
    }

    fn finish(self, stairs: Vec<StairRecord>, generation: u64) -> RoutingGraph {
        let mut per_floor: HashMap<FloorId, Vec<(NodeIndex, Coord<f64>)>> = HashMap::new();
        for index in self.graph.node_indices() {
            let node = &self.graph[index];
            per_floor
                .entry(node.key.floor.clone())
                .or_default()
                .push((index, node.coord));
        }

        let floor_indices = per_floor
            .into_iter()
            .map(|(floor, nodes)| (floor, FloorIndex::new(&nodes)))
            .collect();

        RoutingGraph {
            graph: self.graph,
            lookup: self.lookup,
            stairs,
            floor_indices,
            generation,
        }
    }
}
