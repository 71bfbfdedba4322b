use std::sync::Arc;

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use geojson::FeatureCollection;
use serde_json::json;
use tower::{ServiceBuilder, limit::ConcurrencyLimitLayer, timeout::TimeoutLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use wayfinder_core::{
    DirectoryLoader, Engine, Error, FloorSourceConfig, LoadReport,
    prelude::Route,
};

use crate::{
    config::HttpConfig,
    dto::{ReportResponse, RouteRequest, RouteResponse, SearchHitResponse, SearchQuery, SearchResponse},
};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub source: Arc<FloorSourceConfig>,
}

impl AppState {
    pub fn new(engine: Arc<Engine>, source: FloorSourceConfig) -> Self {
        Self {
            engine,
            source: Arc::new(source),
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let status = match &error {
            Error::NoWalkableGeometryOnFloor(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Disconnected { .. } => StatusCode::NOT_FOUND,
            Error::InvalidData(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!("{}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn router(state: AppState, http: &HttpConfig) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/floors", get(floors))
        .route("/api/route", post(route))
        .route("/api/route/geojson", post(route_geojson))
        .route("/api/search", get(search))
        .route("/api/reload", post(reload))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(http.request_timeout()))
                .layer(ConcurrencyLimitLayer::new(http.concurrency_limit.max(1))),
        )
        .with_state(state)
}

async fn handle_middleware_error(error: BoxError) -> ApiError {
    if error.is::<tower::timeout::error::Elapsed>() {
        ApiError::new(StatusCode::REQUEST_TIMEOUT, "Request timed out")
    } else {
        ApiError::internal(format!("Unhandled internal error: {error}"))
    }
}

/// Runs CPU bound work off the async workers
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn floors(State(state): State<AppState>) -> Json<ReportResponse> {
    let report = LoadReport::from_state(&state.engine.current());
    Json(ReportResponse::new(&report, state.engine.config()))
}

async fn plan(
    state: &AppState,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Route, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let start = request.start.to_endpoint().map_err(ApiError::bad_request)?;
    let end = request.end.to_endpoint().map_err(ApiError::bad_request)?;

    let engine = Arc::clone(&state.engine);
    blocking(move || engine.route(&start, &end).map_err(ApiError::from)).await
}

async fn route(
    State(state): State<AppState>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<RouteResponse>, ApiError> {
    let route = plan(&state, payload).await?;
    Ok(Json(RouteResponse::new(&route, state.engine.config())))
}

async fn route_geojson(
    State(state): State<AppState>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let route = plan(&state, payload).await?;
    Ok(Json(route.to_geojson()?))
}

async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let default_floor = &state.engine.config().default_floor;
    let floor = query.floor.unwrap_or_else(|| default_floor.clone());

    let hits = state
        .engine
        .search(&query.q, &floor)
        .iter()
        .map(|hit| SearchHitResponse::new(hit, default_floor))
        .collect();

    Json(SearchResponse {
        query: query.q,
        floor,
        hits,
    })
}

async fn reload(State(state): State<AppState>) -> Result<Json<ReportResponse>, ApiError> {
    let engine = Arc::clone(&state.engine);
    let source = Arc::clone(&state.source);

    let report = blocking(move || {
        engine
            .load(&DirectoryLoader::new((*source).clone()), &source.floors)
            .map_err(|e| ApiError::internal(format!("Reload failed: {e}")))
    })
    .await?;

    info!(
        "Reloaded generation {} with {} floors",
        report.generation,
        report.floors.len()
    );
    Ok(Json(ReportResponse::new(&report, state.engine.config())))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, header},
    };
    use geo::line_string;
    use serde_json::Value;
    use tower::ServiceExt;
    use wayfinder_core::{
        RoutingConfig,
        prelude::{FeatureGeometry, FloorFeature, FloorId, FloorSnapshot},
    };

    use super::*;

    fn fixtures() -> FloorSourceConfig {
        let mut source = FloorSourceConfig::new(
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../wayfinder-core/tests/fixtures"),
        );
        source.floors = ["0", "1", "2"].into_iter().map(FloorId::from).collect();
        source
    }

    fn app_with(source: FloorSourceConfig) -> (Router, Arc<Engine>) {
        let engine = Arc::new(Engine::new(RoutingConfig::default()));
        engine
            .load(&DirectoryLoader::new(fixtures()), &fixtures().floors)
            .unwrap();
        let state = AppState::new(Arc::clone(&engine), source);
        (router(state, &HttpConfig::default()), engine)
    }

    fn app() -> Router {
        app_with(fixtures()).0
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const CROSS_FLOOR: &str = r#"{
        "start": {"lat": 8.0650, "lon": 123.7560, "floor": "0"},
        "end": {"lat": 8.0652, "lon": 123.7560, "floor": "1"}
    }"#;

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), get_request("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_floors_report() {
        let (status, body) = send(app(), get_request("/api/floors")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generation"], 1);
        assert_eq!(body["floors"][0]["name"], "Ground Floor");
        assert_eq!(body["floors"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["failures"][0]["floor"], "2");
        assert_eq!(body["node_count"], 7);
    }

    #[tokio::test]
    async fn test_route_across_floors() {
        let (status, body) = send(app(), post_json("/api/route", CROSS_FLOOR)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cost"], 15);
        assert_eq!(body["segments"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["segments"][1]["floor_name"], "Second Floor");
        assert_eq!(
            body["transitions"][0]["instruction"],
            "Take North Stair to Second Floor"
        );
        assert_eq!(
            body["summary"],
            "Route from Ground Floor to Second Floor via North Stair."
        );
        assert_eq!(body["start"]["floor"], "0");
    }

    #[tokio::test]
    async fn test_route_geojson() {
        let (status, body) = send(app(), post_json("/api/route/geojson", CROSS_FLOOR)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "FeatureCollection");
        assert_eq!(body["features"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["features"][2]["properties"]["kind"], "stair_transition");
    }

    #[tokio::test]
    async fn test_route_to_empty_floor_is_unprocessable() {
        let request = r#"{
            "start": {"lat": 8.0650, "lon": 123.7560, "floor": "0"},
            "end": {"lat": 8.0650, "lon": 123.7560, "floor": "2"}
        }"#;
        let (status, body) = send(app(), post_json("/api/route", request)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().is_some_and(|e| e.contains('2')));
    }

    #[tokio::test]
    async fn test_malformed_route_requests() {
        let (status, _) = send(app(), post_json("/api/route", "{")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(app(), post_json("/api/route", r#"{"start": {}}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let out_of_range = r#"{
            "start": {"lat": 95.0, "lon": 123.7560, "floor": "0"},
            "end": {"lat": 8.0650, "lon": 123.7560, "floor": "0"}
        }"#;
        let (status, body) = send(app(), post_json("/api/route", out_of_range)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_disconnected_route_is_not_found() {
        let (app, engine) = app_with(fixtures());
        let corridor = |x: f64| {
            FloorFeature::new(
                FeatureGeometry::LineString(line_string![(x: x, y: 0.0), (x: x, y: 0.0001)]),
                [("indoor", "corridor")].into_iter().collect(),
            )
        };
        engine.install(FloorSnapshot::new().with_floor("0", vec![corridor(0.0), corridor(0.001)]));

        let request = r#"{
            "start": {"lat": 0.0, "lon": 0.0, "floor": "0"},
            "end": {"lat": 0.0, "lon": 0.001, "floor": "0"}
        }"#;
        let (status, _) = send(app, post_json("/api/route", request)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search() {
        let (status, body) = send(app(), get_request("/api/search?q=room&floor=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hits"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["hits"][0]["display_name"], "Room 201");
        assert_eq!(body["hits"][0]["endpoint"]["floor"], "1");

        let (_, body) = send(app(), get_request("/api/search?q=hall")).await;
        assert_eq!(body["floor"], "0");
        assert_eq!(body["hits"][0]["display_name"], "Main Hall");

        let (_, body) = send(app(), get_request("/api/search?q=r")).await;
        assert_eq!(body["hits"], json!([]));
    }

    #[tokio::test]
    async fn test_reload_bumps_generation() {
        let (status, body) = send(app(), post_json("/api/reload", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generation"], 2);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_current_state() {
        let (app, engine) = app_with(FloorSourceConfig::new("/nonexistent/wayfinder"));
        let (status, body) = send(app.clone(), post_json("/api/reload", "")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());

        assert_eq!(engine.current().snapshot.generation(), 1);
        let (status, _) = send(app, post_json("/api/route", CROSS_FLOOR)).await;
        assert_eq!(status, StatusCode::OK);
    }
}
