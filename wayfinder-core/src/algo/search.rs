//! Case-insensitive lookup of rooms, pathways and named places on a floor

use crate::model::{FloorFeature, FloorId, FloorSnapshot, Tags};

const MIN_QUERY_LEN: usize = 2;
const BUILDING_LABEL: &str = "Building";

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub feature: FloorFeature,
    pub display_name: String,
}

/// Features on `floor` whose room, pathway or name contains `query`.
///
/// Buildings (`building=yes`) also match the word "building". Queries
/// shorter than two characters return nothing. Hits are in floor file
/// order.
pub fn search_features(
    snapshot: &FloorSnapshot,
    query: &str,
    floor: &FloorId,
    default_floor: &FloorId,
) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    snapshot
        .features()
        .filter(|feature| feature.is_on_floor(floor, default_floor))
        .filter(|feature| is_searchable(&feature.tags))
        .filter(|feature| matches(&feature.tags, &query))
        .filter_map(|feature| {
            display_name(&feature.tags).map(|display_name| SearchHit {
                feature: feature.clone(),
                display_name,
            })
        })
        .collect()
}

fn is_searchable(tags: &Tags) -> bool {
    tags.room().is_some()
        || tags.pathway().is_some()
        || tags.name().is_some()
        || tags.is_building()
        || tags.is_walkway()
        || tags.is_stairs()
}

fn matches(tags: &Tags, query: &str) -> bool {
    [tags.room(), tags.pathway(), tags.name()]
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(query))
        || (tags.is_building() && BUILDING_LABEL.to_lowercase().contains(query))
}

fn display_name(tags: &Tags) -> Option<String> {
    tags.room()
        .or_else(|| tags.pathway())
        .or_else(|| tags.is_building().then_some(BUILDING_LABEL))
        .or_else(|| tags.name())
        .map(ToString::to_string)
}
