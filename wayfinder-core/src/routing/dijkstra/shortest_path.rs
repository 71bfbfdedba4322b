use std::collections::BinaryHeap;

use hashbrown::{HashMap, hash_map::Entry};
use petgraph::graph::NodeIndex;

use super::state::State;
use crate::{
    Cost, Error,
    graph::RoutingGraph,
    routing::path::{Path, Waypoint},
};

/// Dijkstra's algorithm between two nodes of the routing graph.
///
/// Walkway hops and stair links cost what the graph was built with, so the
/// search minimises floor changes first and hop count second. Cost ties are
/// settled in discovery order and a predecessor is only replaced on a strict
/// improvement, which keeps results reproducible.
///
/// # Errors
///
/// `InvalidNodeIndex` for nodes outside the graph, `Disconnected` when `end`
/// cannot be reached from `start`.
pub fn shortest_path(graph: &RoutingGraph, start: NodeIndex, end: NodeIndex) -> Result<Path, Error> {
    if !graph.contains(start) || !graph.contains(end) {
        return Err(Error::InvalidNodeIndex);
    }

    // Estimate capacity based on graph size
    let estimated_nodes = graph.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, Cost> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);
    let mut seq: u64 = 0;

    // Start node has distance 0
    heap.push(State {
        cost: 0,
        seq,
        node: start,
    });
    distances.insert(start, 0);

    let mut reached = false;
    while let Some(State { cost, node, .. }) = heap.pop() {
        if node == end {
            reached = true;
            break;
        }

        // Skip if we've found a better path
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for (next, edge) in graph.neighbors(node) {
            let next_cost = cost.saturating_add(edge.weight);

            let improved = match distances.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    true
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        true
                    } else {
                        false
                    }
                }
            };

            if improved {
                seq += 1;
                heap.push(State {
                    cost: next_cost,
                    seq,
                    node: next,
                });
                predecessors.insert(next, node);
            }
        }
    }

    if !reached {
        return Err(Error::Disconnected {
            from: graph.graph[start].key.clone(),
            to: graph.graph[end].key.clone(),
        });
    }

    // Follow predecessors backward from end to start
    let mut nodes = vec![end];
    let mut current = end;
    while current != start {
        current = *predecessors.get(&current).ok_or(Error::InvalidNodeIndex)?;
        nodes.push(current);
    }
    nodes.reverse();

    let waypoints = nodes
        .iter()
        .map(|&index| {
            let node = &graph.graph[index];
            Waypoint {
                key: node.key.clone(),
                coord: node.coord,
            }
        })
        .collect();

    Ok(Path {
        nodes,
        waypoints,
        cost: distances.get(&end).copied().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use geo::{Coord, LineString, line_string, point};

    use super::*;
    use crate::{
        RoutingConfig,
        graph::build_graph,
        model::{FeatureGeometry, FloorFeature, FloorId, FloorSnapshot, NodeKey},
    };

    fn corridor(line: LineString<f64>, level: &str) -> FloorFeature {
        FloorFeature::new(
            FeatureGeometry::LineString(line),
            [("indoor", "corridor"), ("level", level)].into_iter().collect(),
        )
    }

    fn stairs(x: f64, y: f64, level: &str) -> FloorFeature {
        FloorFeature::new(
            FeatureGeometry::Point(point!(x: x, y: y)),
            [("highway", "steps"), ("level", level)].into_iter().collect(),
        )
    }

    fn node(graph: &RoutingGraph, x: f64, y: f64, floor: &str) -> NodeIndex {
        graph
            .node_index(&NodeKey::new(Coord { x, y }, FloorId::from(floor)))
            .unwrap()
    }

    #[test]
    fn test_trivial_path() {
        let snapshot = FloorSnapshot::new().with_floor(
            "0",
            vec![corridor(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)], "0")],
        );
        let graph = build_graph(&snapshot, &RoutingConfig::default());
        let a = node(&graph, 0.0, 0.0, "0");

        let path = shortest_path(&graph, a, a).unwrap();
        assert_eq!(path.nodes, vec![a]);
        assert_eq!(path.cost, 0);
    }

    #[test]
    fn test_straight_corridor() {
        let snapshot = FloorSnapshot::new().with_floor(
            "0",
            vec![corridor(
                line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)],
                "0",
            )],
        );
        let graph = build_graph(&snapshot, &RoutingConfig::default());
        let a = node(&graph, 0.0, 0.0, "0");
        let b = node(&graph, 1.0, 0.0, "0");
        let c = node(&graph, 2.0, 0.0, "0");

        let path = shortest_path(&graph, a, c).unwrap();
        assert_eq!(path.nodes, vec![a, b, c]);
        assert_eq!(path.cost, 2);

        let back = shortest_path(&graph, c, a).unwrap();
        assert_eq!(back.nodes, vec![c, b, a]);
    }

    #[test]
    fn test_two_hop_walk_beats_stair_detour() {
        // X and Y sit on a two-hop corridor on floor 0. A stair at X also
        // links to floor 1, where a single walkway hop would reach Y's
        // column, but that would need two stair links (cost >= 20).
        let snapshot = FloorSnapshot::new()
            .with_floor(
                "0",
                vec![
                    corridor(
                        line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)],
                        "0",
                    ),
                    stairs(0.0, 0.0, "0;1"),
                    stairs(2.0, 0.0, "0;1"),
                ],
            )
            .with_floor(
                "1",
                vec![corridor(line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)], "1")],
            );
        let graph = build_graph(&snapshot, &RoutingConfig::default());
        let x = node(&graph, 0.0, 0.0, "0");
        let y = node(&graph, 2.0, 0.0, "0");

        let path = shortest_path(&graph, x, y).unwrap();
        assert_eq!(path.cost, 2);
        assert_eq!(path.floor_changes(), 0);
    }

    #[test]
    fn test_stair_crossing_costs_penalty() {
        let snapshot = FloorSnapshot::new()
            .with_floor(
                "0",
                vec![
                    corridor(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)], "0"),
                    stairs(1.0, 0.0, "0;1"),
                ],
            )
            .with_floor(
                "1",
                vec![corridor(line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0)], "1")],
            );
        let graph = build_graph(&snapshot, &RoutingConfig::default());
        let start = node(&graph, 0.0, 0.0, "0");
        let end = node(&graph, 2.0, 0.0, "1");

        let path = shortest_path(&graph, start, end).unwrap();
        assert_eq!(path.cost, 12);
        assert_eq!(path.len(), 4);
        assert_eq!(path.floor_changes(), 1);
    }

    #[test]
    fn test_disconnected_nodes() {
        let snapshot = FloorSnapshot::new().with_floor(
            "0",
            vec![
                corridor(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)], "0"),
                corridor(line_string![(x: 5.0, y: 0.0), (x: 6.0, y: 0.0)], "0"),
            ],
        );
        let graph = build_graph(&snapshot, &RoutingConfig::default());
        let a = node(&graph, 0.0, 0.0, "0");
        let z = node(&graph, 6.0, 0.0, "0");

        assert!(matches!(
            shortest_path(&graph, a, z),
            Err(Error::Disconnected { .. })
        ));
        // The graph stays usable after a failed query
        assert!(shortest_path(&graph, a, a).is_ok());
    }

    #[test]
    fn test_invalid_node_index() {
        let graph = build_graph(&FloorSnapshot::new(), &RoutingConfig::default());
        assert!(matches!(
            shortest_path(&graph, NodeIndex::new(0), NodeIndex::new(1)),
            Err(Error::InvalidNodeIndex)
        ));
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        // Two equal-cost branches around a square
        let snapshot = FloorSnapshot::new().with_floor(
            "0",
            vec![
                corridor(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)], "0"),
                corridor(line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0), (x: 1.0, y: 1.0)], "0"),
            ],
        );
        let graph = build_graph(&snapshot, &RoutingConfig::default());
        let a = node(&graph, 0.0, 0.0, "0");
        let d = node(&graph, 1.0, 1.0, "0");

        let first = shortest_path(&graph, a, d).unwrap();
        for _ in 0..5 {
            assert_eq!(shortest_path(&graph, a, d).unwrap().nodes, first.nodes);
        }
        assert_eq!(first.cost, 2);
        assert_eq!(first.len(), 3);
    }
}
