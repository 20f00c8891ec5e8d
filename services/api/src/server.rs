use crate::cli::ServeArgs;
use crate::infra::{build_api_state, AppState};
use crate::routes::with_service_routes;
use axum::http::{header, HeaderValue, Method};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scheme_connect::config::AppConfig;
use scheme_connect::error::AppError;
use scheme_connect::notify::notifier_from_config;
use scheme_connect::reply::reply_generator_from_config;
use scheme_connect::router::api_router;
use scheme_connect::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let generator = reply_generator_from_config(&config.gemini);
    let notifier = notifier_from_config(&config.twilio);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let ready = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: ready.clone(),
        metrics: Arc::new(prometheus_handle),
        generator: generator.clone(),
        notifier: notifier.clone(),
    };

    let app = with_service_routes(api_router(build_api_state(&config, generator, notifier)))
        .layer(Extension(app_state))
        .layer(cors_layer(&config.cors_origins))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::Bind { addr, source })?;
    ready.store(true, Ordering::Release);
    info!(?config.environment, %addr, "scheme discovery service listening");

    axum::serve(listener, app).await.map_err(AppError::Serve)?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
