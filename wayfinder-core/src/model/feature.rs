//! Floor plan features and their semantic tags

use std::collections::BTreeMap;

use super::{FeatureGeometry, FloorId, parse_levels};

/// Semantic tags of a feature (`highway`, `indoor`, `level`, `room`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn is(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    /// Corridors, service ways and footways can be walked along
    pub fn is_walkway(&self) -> bool {
        self.is("indoor", "corridor") || self.is("highway", "service") || self.is("highway", "footway")
    }

    pub fn is_stairs(&self) -> bool {
        self.is("highway", "steps")
    }

    pub fn is_building(&self) -> bool {
        self.is("building", "yes")
    }

    /// Floors listed in the `level` tag, empty when absent
    pub fn levels(&self) -> Vec<FloorId> {
        self.get("level").map(parse_levels).unwrap_or_default()
    }

    pub fn has_level(&self) -> bool {
        self.get("level").is_some_and(|l| !l.trim().is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    pub fn room(&self) -> Option<&str> {
        self.get("room")
    }

    pub fn pathway(&self) -> Option<&str> {
        self.get("pathway")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One floor plan feature as loaded from GeoJSON
#[derive(Debug, Clone, PartialEq)]
pub struct FloorFeature {
    pub geometry: FeatureGeometry,
    pub tags: Tags,
}

impl FloorFeature {
    pub fn new(geometry: FeatureGeometry, tags: Tags) -> Self {
        Self { geometry, tags }
    }

    /// Floors this feature lies on; untagged features belong to `default_floor`
    pub fn floors_or(&self, default_floor: &FloorId) -> Vec<FloorId> {
        let levels = self.tags.levels();
        if levels.is_empty() {
            vec![default_floor.clone()]
        } else {
            levels
        }
    }

    pub fn is_on_floor(&self, floor: &FloorId, default_floor: &FloorId) -> bool {
        self.floors_or(default_floor).contains(floor)
    }
}
