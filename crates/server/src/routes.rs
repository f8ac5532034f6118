use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::observability::encode_metrics;
use crate::openapi::{ApiDoc, HealthResponse};
use crate::state::AppState;

pub mod authors;
pub mod posts;
pub mod tags;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics() -> (axum::http::StatusCode, String) {
    encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: the three resources plus health, metrics and docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let users = Router::new()
        .route("/users", axum::routing::post(authors::create_author))
        .route("/users/all", get(authors::list_authors))
        .route("/users/:id", get(authors::get_author))
        .route("/users/update/:id", axum::routing::put(authors::update_author))
        .route("/users/delete/:id", axum::routing::delete(authors::delete_author));

    let posts = Router::new()
        .route("/posts", axum::routing::post(posts::create_post))
        .route("/posts/all", get(posts::list_posts))
        .route("/posts/:id", get(posts::get_post))
        .route("/posts/update/:id", axum::routing::put(posts::update_post))
        .route("/posts/delete/:id", axum::routing::delete(posts::delete_post));

    let tags = Router::new()
        .route("/tags", axum::routing::post(tags::create_tag))
        .route("/tags/all", get(tags::list_tags))
        .route("/tags/:id", get(tags::get_tag))
        .route("/tags/update/:id", axum::routing::put(tags::update_tag))
        .route("/tags/delete/:id", axum::routing::delete(tags::delete_tag));

    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    public
        .merge(users)
        .merge(posts)
        .merge(tags)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
