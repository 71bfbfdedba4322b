//! Routing parameters shared by graph construction, segmentation and directions

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{Cost, DEFAULT_FLOOR, DEFAULT_STAIR_LABEL, model::FloorId};

/// Edge costs used by the path solver.
///
/// These are hand-tuned heuristics, not physical measurements: a walkway hop
/// counts as one unit regardless of its length, and a stair link costs as
/// much as several hops so that routes avoid unnecessary floor changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EdgeWeights {
    /// Cost of one walkway segment between consecutive vertices
    pub walkway: Cost,
    /// Cost of moving between two floors over a stair
    pub stair: Cost,
}

impl Default for EdgeWeights {
    fn default() -> Self {
        Self {
            walkway: 1,
            stair: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub weights: EdgeWeights,
    /// Floor assigned to walkways without a `level` tag
    pub default_floor: FloorId,
    /// Name used for stairs that carry no `name` tag
    pub stair_label: String,
    /// Display names keyed by floor identifier
    pub floor_names: BTreeMap<FloorId, String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        let floor_names = [
            ("0", "Ground Floor"),
            ("1", "Second Floor"),
            ("2", "Third Floor"),
        ]
        .into_iter()
        .map(|(id, name)| (FloorId::from(id), name.to_string()))
        .collect();

        Self {
            weights: EdgeWeights::default(),
            default_floor: FloorId::from(DEFAULT_FLOOR),
            stair_label: DEFAULT_STAIR_LABEL.to_string(),
            floor_names,
        }
    }
}

impl RoutingConfig {
    /// Human readable floor name, `Level {id}` for unmapped floors
    pub fn floor_display_name(&self, floor: &FloorId) -> String {
        self.floor_names
            .get(floor)
            .cloned()
            .unwrap_or_else(|| format!("Level {floor}"))
    }
}
