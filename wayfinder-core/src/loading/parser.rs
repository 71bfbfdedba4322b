//! Floor plan GeoJSON parsing

use geo::Geometry as GeoGeometry;
use geojson::{Feature, GeoJson};
use log::debug;
use serde_json::Value as JsonValue;

use crate::{
    Error,
    model::{FeatureGeometry, FloorFeature, Tags},
};

/// Parse a floor plan document into features.
///
/// Accepts a `FeatureCollection` or a single `Feature`. Features without a
/// geometry, or with a geometry other than Point, LineString or Polygon, are
/// skipped.
///
/// # Errors
///
/// Returns `GeoJsonError` when the text is not valid GeoJSON or is a bare
/// geometry.
pub fn parse_feature_collection(text: &str) -> Result<Vec<FloorFeature>, Error> {
    let document = text
        .parse::<GeoJson>()
        .map_err(|e| Error::GeoJsonError(e.to_string()))?;

    let features = match document {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(Error::GeoJsonError(
                "Expected a FeatureCollection or Feature, found a bare geometry".to_string(),
            ));
        }
    };

    let total = features.len();
    let parsed: Vec<FloorFeature> = features.into_iter().filter_map(convert_feature).collect();
    if parsed.len() < total {
        debug!("Skipped {} of {total} features", total - parsed.len());
    }

    Ok(parsed)
}

fn convert_feature(feature: Feature) -> Option<FloorFeature> {
    let tags = convert_properties(&feature);
    let geometry = feature.geometry?;

    let geometry = match GeoGeometry::<f64>::try_from(geometry) {
        Ok(GeoGeometry::Point(point)) => FeatureGeometry::Point(point),
        Ok(GeoGeometry::LineString(line)) => FeatureGeometry::LineString(line),
        Ok(GeoGeometry::Polygon(polygon)) => FeatureGeometry::Polygon(polygon),
        Ok(other) => {
            debug!("Unsupported geometry {other:?}");
            return None;
        }
        Err(e) => {
            debug!("Invalid geometry: {e}");
            return None;
        }
    };

    Some(FloorFeature::new(geometry, tags))
}

/// String properties are kept verbatim, other scalars are stringified and
/// nulls are dropped
fn convert_properties(feature: &Feature) -> Tags {
    feature
        .properties
        .iter()
        .flatten()
        .filter_map(|(key, value)| match value {
            JsonValue::Null => None,
            JsonValue::String(s) => Some((key.clone(), s.clone())),
            other => Some((key.clone(), other.to_string())),
        })
        .collect()
}
