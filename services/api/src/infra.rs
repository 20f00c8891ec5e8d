use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use scheme_connect::chat::{ChatService, SessionStore};
use scheme_connect::config::AppConfig;
use scheme_connect::notify::SchemeNotifier;
use scheme_connect::reply::ReplyGenerator;
use scheme_connect::router::{ApiState, RequestLimits};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) generator: Arc<dyn ReplyGenerator>,
    pub(crate) notifier: Arc<dyn SchemeNotifier>,
}

/// Wires the in-memory domain services the router runs on.
pub(crate) fn build_api_state(
    config: &AppConfig,
    generator: Arc<dyn ReplyGenerator>,
    notifier: Arc<dyn SchemeNotifier>,
) -> ApiState {
    let store = SessionStore::new(config.session.timeout());
    let chat = Arc::new(ChatService::new(store, generator));
    let limits = Arc::new(RequestLimits::from_settings(&config.limits));

    ApiState {
        chat,
        notifier,
        limits,
    }
}
