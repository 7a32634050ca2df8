//! Router construction and request logging.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::Request,
    http::{
        header::{InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use log::info;
use tower_http::cors::CorsLayer;

use crate::handlers::{create_attributes_handler, filter_attributes_handler, health_handler};
use crate::state::AppState;

const CORS_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Builds the CORS policy for a single allowed browser origin.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE))
}

/// Builds the full router with all routes and middleware.
pub fn build_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/attribute",
            get(filter_attributes_handler).post(create_attributes_handler),
        )
        .layer(middleware::from_fn(log_requests))
        .layer(cors)
        .with_state(state)
}

// Path only: the query string can carry user search text.
async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    info!(
        "event=http_request module=http status=done method={method} path={path} http_status={} duration_ms={}",
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
