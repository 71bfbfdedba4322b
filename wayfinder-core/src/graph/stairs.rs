use geo::Coord;
use log::debug;

use crate::model::{FixedCoord, FloorFeature, FloorId, FloorSnapshot, index_midpoint};

/// A stair feature with the floors it connects
#[derive(Debug, Clone)]
pub struct StairRecord {
    pub feature: FloorFeature,
    /// Floors from the `level` tag, at least one
    pub floors: Vec<FloorId>,
    /// Representative point, see [`index_midpoint`]
    pub anchor: Coord<f64>,
    pub name: String,
    /// Floor file the stair was loaded from
    pub source_floor: FloorId,
}

impl StairRecord {
    /// `None` unless the feature is tagged as stairs with a non-empty level
    pub fn from_feature(feature: &FloorFeature, source_floor: &FloorId, label: &str) -> Option<Self> {
        if !feature.tags.is_stairs() {
            return None;
        }
        let floors = feature.tags.levels();
        if floors.is_empty() {
            debug!("Skipping stairs without level on floor {source_floor}");
            return None;
        }
        let anchor = index_midpoint(&feature.geometry)?;
        let name = feature.tags.name().unwrap_or(label).to_string();

        Some(Self {
            feature: feature.clone(),
            floors,
            anchor,
            name,
            source_floor: source_floor.clone(),
        })
    }

    pub fn serves(&self, floor: &FloorId) -> bool {
        self.floors.contains(floor)
    }

    pub fn connects(&self, from: &FloorId, to: &FloorId) -> bool {
        self.serves(from) && self.serves(to)
    }

    pub fn is_anchored_at(&self, position: FixedCoord) -> bool {
        FixedCoord::from_coord(self.anchor) == position
    }

    /// True when `position` is the anchor or any vertex of the stair geometry
    pub fn touches(&self, position: FixedCoord) -> bool {
        self.is_anchored_at(position)
            || self
                .feature
                .geometry
                .vertices()
                .iter()
                .any(|&v| FixedCoord::from_coord(v) == position)
    }
}

/// Collect stair records from every loaded floor, in floor then file order
pub fn collect_stairs(snapshot: &FloorSnapshot, label: &str) -> Vec<StairRecord> {
    snapshot
        .floors()
        .flat_map(|(floor, features)| {
            features
                .iter()
                .filter_map(move |feature| StairRecord::from_feature(feature, floor, label))
        })
        .collect()
}
