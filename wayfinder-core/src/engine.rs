//! Versioned routing state shared between concurrent requests

use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicU64, Ordering},
};

use log::info;
use rayon::prelude::*;

use crate::{
    Error, RoutingConfig,
    algo::{SearchHit, search_features},
    graph::{RoutingGraph, build_graph},
    loading::{FloorLoader, load_snapshot},
    model::{FloorId, FloorLoadFailure, FloorSnapshot},
    routing::{Route, RouteEndpoint},
};

/// A floor snapshot together with the graph built from it
#[derive(Debug, Default)]
pub struct RoutingState {
    pub snapshot: FloorSnapshot,
    pub graph: RoutingGraph,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorReport {
    pub floor: FloorId,
    pub feature_count: usize,
    pub node_count: usize,
}

/// Summary of one installed routing state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub generation: u64,
    pub floors: Vec<FloorReport>,
    pub failures: Vec<FloorLoadFailure>,
    pub node_count: usize,
    pub edge_count: usize,
    pub stair_count: usize,
}

impl LoadReport {
    pub fn from_state(state: &RoutingState) -> Self {
        let floors = state
            .snapshot
            .floors()
            .map(|(floor, features)| FloorReport {
                floor: floor.clone(),
                feature_count: features.len(),
                node_count: state.graph.nodes_on_floor(floor),
            })
            .collect();

        Self {
            generation: state.snapshot.generation(),
            floors,
            failures: state.snapshot.failures().to_vec(),
            node_count: state.graph.node_count(),
            edge_count: state.graph.edge_count(),
            stair_count: state.graph.stairs().len(),
        }
    }
}

/// Routing entry point.
///
/// Holds the current [`RoutingState`] behind an `Arc`. Reloads build a
/// complete new state and swap it in one step, so a request that called
/// [`Engine::current`] keeps a consistent snapshot and graph until it ends.
#[derive(Debug)]
pub struct Engine {
    config: RoutingConfig,
    state: RwLock<Arc<RoutingState>>,
    generation: AtomicU64,
}

impl Engine {
    pub fn new(config: RoutingConfig) -> Self {
        Self {
            config,
            state: RwLock::new(Arc::new(RoutingState::default())),
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn current(&self) -> Arc<RoutingState> {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Load `floors` through `loader`, build a graph and make it current.
    ///
    /// # Errors
    ///
    /// Returns an error if no floors are requested or none could be loaded,
    /// in which case the current state is kept. Individual floor failures
    /// are reported in the returned [`LoadReport`] instead.
    pub fn load(&self, loader: &dyn FloorLoader, floors: &[FloorId]) -> Result<LoadReport, Error> {
        let snapshot = load_snapshot(loader, floors)?;
        Ok(self.install(snapshot))
    }

    /// Build a graph from an in-memory snapshot and make it current.
    ///
    /// Overlapping installs may finish out of order; a state is only swapped
    /// in when its generation is newer than the current one, so the engine
    /// never goes back to an older snapshot.
    pub fn install(&self, mut snapshot: FloorSnapshot) -> LoadReport {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        snapshot.set_generation(generation);

        let graph = build_graph(&snapshot, &self.config);
        let state = Arc::new(RoutingState { snapshot, graph });
        let report = LoadReport::from_state(&state);

        if self.swap_if_newer(state) {
            info!(
                "Installed generation {generation}: {} floors, {} nodes, {} edges",
                report.floors.len(),
                report.node_count,
                report.edge_count
            );
        }
        report
    }

    fn swap_if_newer(&self, state: Arc<RoutingState>) -> bool {
        let mut current = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let (incoming, installed) = (state.snapshot.generation(), current.snapshot.generation());
        if incoming <= installed {
            info!("Discarding generation {incoming}, generation {installed} is already installed");
            return false;
        }
        *current = state;
        true
    }

    /// # Errors
    ///
    /// See [`Route::plan`]
    pub fn route(&self, start: &RouteEndpoint, end: &RouteEndpoint) -> Result<Route, Error> {
        let state = self.current();
        Route::plan(&state.graph, start, end, &self.config)
    }

    /// Route from one start to many destinations against a single state.
    /// Results are in `ends` order.
    pub fn route_many(
        &self,
        start: &RouteEndpoint,
        ends: &[RouteEndpoint],
    ) -> Vec<Result<Route, Error>> {
        let state = self.current();
        ends.par_iter()
            .map(|end| Route::plan(&state.graph, start, end, &self.config))
            .collect()
    }

    pub fn search(&self, query: &str, floor: &FloorId) -> Vec<SearchHit> {
        let state = self.current();
        search_features(&state.snapshot, query, floor, &self.config.default_floor)
    }
}
