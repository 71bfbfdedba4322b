//! Immutable set of per-floor features used to build one graph version

use std::collections::BTreeMap;

use super::{FloorFeature, FloorId};

/// A floor that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorLoadFailure {
    pub floor: FloorId,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct FloorSnapshot {
    floors: BTreeMap<FloorId, Vec<FloorFeature>>,
    failures: Vec<FloorLoadFailure>,
    generation: u64,
}

impl FloorSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style floor insertion, mostly for tests and in-memory data
    #[must_use]
    pub fn with_floor(mut self, floor: impl Into<FloorId>, features: Vec<FloorFeature>) -> Self {
        self.insert_floor(floor.into(), features);
        self
    }

    pub fn insert_floor(&mut self, floor: FloorId, features: Vec<FloorFeature>) {
        self.floors.insert(floor, features);
    }

    pub fn record_failure(&mut self, floor: FloorId, reason: impl Into<String>) {
        self.failures.push(FloorLoadFailure {
            floor,
            reason: reason.into(),
        });
    }

    /// Loaded floors in floor id order
    pub fn floors(&self) -> impl Iterator<Item = (&FloorId, &[FloorFeature])> {
        self.floors.iter().map(|(id, features)| (id, features.as_slice()))
    }

    pub fn floor(&self, floor: &FloorId) -> Option<&[FloorFeature]> {
        self.floors.get(floor).map(Vec::as_slice)
    }

    /// Every feature of every loaded floor, in floor id then file order
    pub fn features(&self) -> impl Iterator<Item = &FloorFeature> {
        self.floors.values().flatten()
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn feature_count(&self) -> usize {
        self.floors.values().map(Vec::len).sum()
    }

    pub fn failures(&self) -> &[FloorLoadFailure] {
        &self.failures
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }
}
