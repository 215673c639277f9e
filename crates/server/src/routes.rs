use axum::{
    middleware,
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::{metrics, openapi::ApiDoc, state::AppState};

pub mod ships;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: ship REST API plus health, metrics and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let ships = Router::new()
        .route("/rest/ships", get(ships::list).post(ships::create))
        .route("/rest/ships/count", get(ships::count))
        .route(
            "/rest/ships/",
            get(ships::empty_id).post(ships::empty_id).delete(ships::empty_id),
        )
        .route(
            "/rest/ships/:id",
            get(ships::get).post(ships::update).delete(ships::delete),
        )
        .route_layer(middleware::from_fn(metrics::track))
        .with_state(state);

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    ships
        .merge(ops)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        // one INFO span per request with method and path
                        .make_span_with(
                            DefaultMakeSpan::new()
                                .level(Level::INFO)
                                .include_headers(false),
                        )
                        .on_request(
                            DefaultOnRequest::new()
                                .level(Level::INFO),
                        )
                        // status code and latency
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .include_headers(false),
                        )
                        // 5xx and other failures at ERROR
                        .on_failure(
                            DefaultOnFailure::new()
                                .level(Level::ERROR),
                        ),
                )
                .layer(cors),
        )
}
