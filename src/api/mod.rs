//! HTTP surface of the gateway.
//!
//! Handlers stay thin: they extract the JSON body and hand it to [`Gateway`].
//! Every route answers unmatched methods with the same 404 body as unknown
//! paths.

mod handlers;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::gateway::Gateway;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Listed in the body of every 404.
pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "GET /health",
    "POST /api/fetchSheets",
    "POST /api/fetchHeaders",
    "POST /api/fetchData",
    "POST /api/testAccess",
];

pub fn router(gateway: Gateway, config: &ServerConfig) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.origin_headers()?))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let router = Router::new()
        .route(
            "/health",
            get(handlers::health).fallback(handlers::not_found),
        )
        .route(
            "/api/fetchSheets",
            post(handlers::fetch_sheets).fallback(handlers::not_found),
        )
        .route(
            "/api/fetchHeaders",
            post(handlers::fetch_headers).fallback(handlers::not_found),
        )
        .route(
            "/api/fetchData",
            post(handlers::fetch_data).fallback(handlers::not_found),
        )
        .route(
            "/api/testAccess",
            post(handlers::test_access).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(gateway);

    Ok(router)
}
