use axum::{
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use serde_json::json;

pub const SERVICE_NAME: &str = "iot-monitoring-api";

pub async fn health() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        Json(json!({ "status": "healthy", "service": SERVICE_NAME })),
    )
}

/// `GET /`: service name, version, and endpoint map.
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "name": "IoT Power Monitoring API",
        "version": env!("CARGO_PKG_VERSION"),
        "classification": "Rule-Based",
        "endpoints": {
            "data": "/classify",
            "status": "/status",
            "summary": "/summary",
            "trend": "/trend",
            "statistics": "/statistics",
            "distribution": "/distribution",
            "cost": "/cost_estimate",
            "health": "/health",
            "metrics": "/metrics"
        }
    }))
}
