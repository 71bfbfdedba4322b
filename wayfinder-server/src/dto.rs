//! JSON request and response bodies

use geo::Coord;
use serde::{Deserialize, Serialize};
use wayfinder_core::{
    FloorReport, LoadReport, RoutingConfig,
    prelude::{FloorId, Route, RouteEndpoint, SearchHit, Snap},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coord<f64>> for LatLon {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lon: coord.x,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointRequest {
    pub lat: f64,
    pub lon: f64,
    pub floor: FloorId,
}

impl EndpointRequest {
    /// Rejects coordinates outside the WGS84 range
    pub fn to_endpoint(&self) -> Result<RouteEndpoint, String> {
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lon) {
            return Err(format!(
                "Coordinate ({}, {}) is outside the valid range",
                self.lat, self.lon
            ));
        }
        Ok(RouteEndpoint::new(self.lat, self.lon, self.floor.clone()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteRequest {
    pub start: EndpointRequest,
    pub end: EndpointRequest,
}

#[derive(Debug, Serialize)]
pub struct SnapResponse {
    #[serde(flatten)]
    pub position: LatLon,
    pub floor: FloorId,
    pub distance_m: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stair_name: Option<String>,
}

impl From<&Snap> for SnapResponse {
    fn from(snap: &Snap) -> Self {
        Self {
            position: snap.coord.into(),
            floor: snap.key.floor.clone(),
            distance_m: snap.distance,
            stair_name: snap.stair_name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub floor: FloorId,
    pub floor_name: String,
    pub points: Vec<LatLon>,
}

#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub from_floor: FloorId,
    pub to_floor: FloorId,
    #[serde(flatten)]
    pub position: LatLon,
    pub stair_name: String,
    pub instruction: String,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub generation: u64,
    pub cost: u32,
    pub start: SnapResponse,
    pub end: SnapResponse,
    pub segments: Vec<SegmentResponse>,
    pub transitions: Vec<TransitionResponse>,
    pub summary: String,
    pub warnings: Vec<String>,
}

impl RouteResponse {
    pub fn new(route: &Route, config: &RoutingConfig) -> Self {
        let segments = route
            .segments
            .iter()
            .map(|segment| SegmentResponse {
                floor: segment.floor.clone(),
                floor_name: config.floor_display_name(&segment.floor),
                points: segment.coords.iter().copied().map(LatLon::from).collect(),
            })
            .collect();

        let transitions = route
            .transitions
            .iter()
            .zip(&route.instructions)
            .map(|(transition, instruction)| TransitionResponse {
                from_floor: transition.from_floor.clone(),
                to_floor: transition.to_floor.clone(),
                position: transition.coordinate.into(),
                stair_name: transition.stair_name.clone(),
                instruction: instruction.clone(),
            })
            .collect();

        Self {
            generation: route.generation,
            cost: route.cost(),
            start: (&route.start).into(),
            end: (&route.end).into(),
            segments,
            transitions,
            summary: route.summary.clone(),
            warnings: route.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FloorResponse {
    pub floor: FloorId,
    pub name: String,
    pub feature_count: usize,
    pub node_count: usize,
}

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub floor: FloorId,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub generation: u64,
    pub floors: Vec<FloorResponse>,
    pub failures: Vec<FailureResponse>,
    pub node_count: usize,
    pub edge_count: usize,
    pub stair_count: usize,
}

impl ReportResponse {
    pub fn new(report: &LoadReport, config: &RoutingConfig) -> Self {
        let floors = report
            .floors
            .iter()
            .map(|FloorReport { floor, feature_count, node_count }| FloorResponse {
                floor: floor.clone(),
                name: config.floor_display_name(floor),
                feature_count: *feature_count,
                node_count: *node_count,
            })
            .collect();

        Self {
            generation: report.generation,
            floors,
            failures: report
                .failures
                .iter()
                .map(|f| FailureResponse {
                    floor: f.floor.clone(),
                    reason: f.reason.clone(),
                })
                .collect(),
            node_count: report.node_count,
            edge_count: report.edge_count,
            stair_count: report.stair_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub floor: Option<FloorId>,
}

#[derive(Debug, Serialize)]
pub struct EndpointResponse {
    #[serde(flatten)]
    pub position: LatLon,
    pub floor: FloorId,
}

#[derive(Debug, Serialize)]
pub struct SearchHitResponse {
    pub display_name: String,
    pub geometry_type: &'static str,
    /// Where a route to this feature should start or end
    pub endpoint: Option<EndpointResponse>,
    pub tags: serde_json::Map<String, serde_json::Value>,
}

impl SearchHitResponse {
    pub fn new(hit: &SearchHit, fallback_floor: &FloorId) -> Self {
        let endpoint = RouteEndpoint::from_feature(&hit.feature, fallback_floor).map(|e| {
            EndpointResponse {
                position: e.coord.into(),
                floor: e.floor,
            }
        });

        Self {
            display_name: hit.display_name.clone(),
            geometry_type: hit.feature.geometry.type_name(),
            endpoint,
            tags: hit
                .feature
                .tags
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub floor: FloorId,
    pub hits: Vec<SearchHitResponse>,
}
