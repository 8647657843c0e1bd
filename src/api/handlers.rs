use super::AVAILABLE_ENDPOINTS;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::models::{
    AccessResponse, DataResponse, ErrorCode, GatewayRequest, HeadersResponse, HealthResponse,
    NotFoundResponse, SheetsResponse,
};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::any::Any;
use tracing::error;

type Payload = std::result::Result<Json<GatewayRequest>, JsonRejection>;

pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "Sheet gateway is running",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub(super) async fn fetch_sheets(
    State(gateway): State<Gateway>,
    payload: Payload,
) -> Result<Json<SheetsResponse>> {
    let Json(request) = payload?;
    Ok(Json(gateway.fetch_sheets(request).await?))
}

pub(super) async fn fetch_headers(
    State(gateway): State<Gateway>,
    payload: Payload,
) -> Result<Json<HeadersResponse>> {
    let Json(request) = payload?;
    Ok(Json(gateway.fetch_headers(request).await?))
}

pub(super) async fn fetch_data(
    State(gateway): State<Gateway>,
    payload: Payload,
) -> Result<Json<DataResponse>> {
    let Json(request) = payload?;
    Ok(Json(gateway.fetch_data(request).await?))
}

pub(super) async fn test_access(
    State(gateway): State<Gateway>,
    payload: Payload,
) -> Result<Json<AccessResponse>> {
    let Json(request) = payload?;
    Ok(Json(gateway.test_access(request).await?))
}

pub(super) async fn not_found() -> (StatusCode, Json<NotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            success: false,
            error: "Endpoint not found",
            code: ErrorCode::NotFound,
            available_endpoints: AVAILABLE_ENDPOINTS,
        }),
    )
}

/// Last-resort response when a handler panics.
pub(super) fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(%details, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": "Internal server error",
            "code": ErrorCode::Unknown,
            "message": details,
        })),
    )
        .into_response()
}
