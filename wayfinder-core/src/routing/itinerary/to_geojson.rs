use geo::{LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::{
    Error,
    routing::segment::{FloorSegment, StairTransition},
};

use super::Route;

impl Route {
    /// Converts the route to a `GeoJSON` `FeatureCollection`: one `LineString`
    /// per floor segment followed by one `Point` per stair transition.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let mut features = Vec::with_capacity(self.segments.len() + self.transitions.len());

        // A single coordinate is not a valid LineString
        for (idx, segment) in self
            .segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.coords.len() >= 2)
        {
            features.push(create_segment_feature(idx, segment)?);
        }

        for (transition, instruction) in self.transitions.iter().zip(&self.instructions) {
            features.push(create_transition_feature(transition, instruction)?);
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn create_segment_feature(segment_idx: usize, segment: &FloorSegment) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(segment.coords.clone())));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "kind": "segment",
            "floor": segment.floor,
            "segment_index": segment_idx,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_transition_feature(
    transition: &StairTransition,
    instruction: &str,
) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&Point::from(transition.coordinate)));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "kind": "stair_transition",
            "from_floor": transition.from_floor,
            "to_floor": transition.to_floor,
            "stair_name": transition.stair_name,
            "instruction": instruction,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
