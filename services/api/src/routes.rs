use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// Adds service-level endpoints around the domain router.
pub(crate) fn with_service_routes(api: axum::Router) -> axum::Router {
    api.route("/", axum::routing::get(root_endpoint))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) services: ServiceStatuses,
}

#[derive(Debug, Serialize)]
pub(crate) struct ServiceStatuses {
    pub(crate) llm: &'static str,
    pub(crate) sms: &'static str,
}

pub(crate) async fn root_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "SchemeConnect Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "chat": "/chat",
            "eligibility": "/eligibility",
            "sms": "/sms",
            "metrics": "/metrics",
        },
    }))
}

pub(crate) async fn healthcheck(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        services: ServiceStatuses {
            llm: if state.generator.is_available() {
                "ok"
            } else {
                "fallback"
            },
            sms: if state.notifier.is_available() {
                "ok"
            } else {
                "mock"
            },
        },
    })
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(std::sync::atomic::Ordering::Relaxed) {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
