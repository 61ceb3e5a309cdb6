//! HTTP surface: route table, shared state, and request middleware.

pub mod analytics;
pub mod health;
pub mod readings;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::metrics::AppMetrics;
use crate::queries::PowerQueries;

/// Shared state for the query routes.
pub type ApiState = Arc<PowerQueries>;

/// Assemble the full application router.
pub fn create_router(
    queries: ApiState,
    metrics: Arc<AppMetrics>,
    cors_origins: &[String],
) -> Router {
    let query_routes = Router::new()
        .route("/", get(health::api_info))
        .route("/classify", get(readings::classify))
        .route("/status", get(readings::status))
        .route("/summary", get(readings::summary))
        .route("/trend", get(readings::trend))
        .route("/statistics", get(analytics::statistics))
        .route("/distribution", get(analytics::distribution))
        .route("/cost_estimate", get(analytics::cost_estimate))
        .with_state(queries);

    let metrics_routes = Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(metrics.clone());

    Router::new()
        .route("/health", get(health::health))
        .merge(query_routes)
        .merge(metrics_routes)
        .route_layer(middleware::from_fn_with_state(metrics, track_requests))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Record request count and latency under the matched route template.
async fn track_requests(
    State(metrics): State<Arc<AppMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    metrics
        .http_requests_total
        .with_label_values(&[&method, &path, &status])
        .inc();
    metrics
        .http_request_duration
        .with_label_values(&[&path])
        .observe(started.elapsed().as_secs_f64());

    response
}

async fn render_metrics(State(metrics): State<Arc<AppMetrics>>) -> Response {
    match metrics.render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            Body::from(body),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Failed to render metrics: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics error").into_response()
        }
    }
}
