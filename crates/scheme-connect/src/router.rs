//! Domain HTTP endpoints: chat turns, direct eligibility checks, and SMS
//! dispatch. Service wiring (health, metrics, CORS) lives in the API crate.

use std::sync::{Arc, OnceLock};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::catalog::find_scheme;
use crate::chat::{ChatService, UserProfile};
use crate::config::RateLimitSettings;
use crate::eligibility::{eligible_schemes, EligibilityProfile, SchemeMatch};
use crate::notify::{DeliveryStatus, SchemeNotifier};
use crate::ratelimit::RateLimiter;

/// One limiter per guarded surface; keys never cross surfaces.
pub struct RequestLimits {
    pub chat: RateLimiter,
    pub eligibility: RateLimiter,
    pub sms: RateLimiter,
}

impl RequestLimits {
    pub fn from_settings(settings: &RateLimitSettings) -> Self {
        Self {
            chat: RateLimiter::new(settings.chat.max_requests, settings.chat.window()),
            eligibility: RateLimiter::new(
                settings.eligibility.max_requests,
                settings.eligibility.window(),
            ),
            sms: RateLimiter::new(settings.sms.max_requests, settings.sms.window()),
        }
    }
}

#[derive(Clone)]
pub struct ApiState {
    pub chat: Arc<ChatService>,
    pub notifier: Arc<dyn SchemeNotifier>,
    pub limits: Arc<RequestLimits>,
}

/// Router builder exposing the domain endpoints.
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/eligibility", post(eligibility_handler))
        .route("/sms", post(sms_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
    #[serde(default)]
    pub user_profile: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub schemes: Vec<SchemeMatch>,
    pub next_question: Option<String>,
}

pub(crate) async fn chat_handler(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let (allowed, _remaining) = state.limits.chat.is_allowed(&request.session_id);
    if !allowed {
        return too_many_requests("Too many requests. Please wait before sending another message.");
    }

    match state
        .chat
        .handle_turn(&request.session_id, &request.user_profile, &request.message)
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ChatResponse {
                response: outcome.reply,
                schemes: outcome.schemes,
                next_question: outcome.next_question,
            }),
        )
            .into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EligibilityResponse {
    pub eligible_schemes: Vec<SchemeMatch>,
    pub count: usize,
}

pub(crate) async fn eligibility_handler(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(profile): Json<EligibilityProfile>,
) -> Response {
    if !(1..=120).contains(&profile.age) {
        let payload = json!({ "error": "age must be between 1 and 120" });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    let (allowed, _remaining) = state.limits.eligibility.is_allowed(&client_key(&headers));
    if !allowed {
        return too_many_requests("Too many requests. Please try again later.");
    }

    let matches = eligible_schemes(&profile);
    let count = matches.len();
    (
        StatusCode::OK,
        Json(EligibilityResponse {
            eligible_schemes: matches,
            count,
        }),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
pub struct SmsRequest {
    pub phone: String,
    pub scheme_id: String,
}

#[derive(Debug, Serialize)]
pub struct SmsResponse {
    pub status: DeliveryStatus,
    pub message: String,
}

pub(crate) async fn sms_handler(
    State(state): State<ApiState>,
    Json(request): Json<SmsRequest>,
) -> Response {
    if !indian_phone().is_match(&request.phone) {
        let payload = json!({
            "error": "Invalid Indian phone number. Must be 10 digits starting with 6-9"
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    // Keyed by phone number so one recipient cannot be spammed from many
    // client addresses.
    let (allowed, _remaining) = state.limits.sms.is_allowed(&request.phone);
    if !allowed {
        return too_many_requests("Too many SMS requests. Please try again later.");
    }

    let Some(scheme) = find_scheme(&request.scheme_id) else {
        let payload = json!({ "error": format!("Scheme {} not found", request.scheme_id) });
        return (StatusCode::NOT_FOUND, Json(payload)).into_response();
    };

    let receipt = state
        .notifier
        .send_scheme_details(&request.phone, scheme)
        .await;
    (
        StatusCode::OK,
        Json(SmsResponse {
            status: receipt.status,
            message: receipt.message,
        }),
    )
        .into_response()
}

fn indian_phone() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[6-9]\d{9}$").expect("valid phone pattern"))
}

/// Rate-limit key for callers without a session: the forwarded client
/// address when a proxy supplies one, a shared bucket otherwise.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn too_many_requests(detail: &str) -> Response {
    let payload = json!({ "error": detail });
    (StatusCode::TOO_MANY_REQUESTS, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_pattern_accepts_only_ten_digit_indian_mobiles() {
        assert!(indian_phone().is_match("9876543210"));
        assert!(indian_phone().is_match("6000000000"));
        assert!(!indian_phone().is_match("1234567890"));
        assert!(!indian_phone().is_match("98765"));
        assert!(!indian_phone().is_match("98765432109"));
    }

    #[test]
    fn client_key_prefers_the_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.7, 10.0.0.1".parse().unwrap());
        assert_eq!(client_key(&headers), "10.0.0.7");

        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }
}
