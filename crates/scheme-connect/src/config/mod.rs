use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Deployment stage the process believes it is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn detect(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("prod") || v.eq_ignore_ascii_case("production") => {
                Self::Production
            }
            Some(v) if v.eq_ignore_ascii_case("test") || v.eq_ignore_ascii_case("ci") => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub session: SessionConfig,
    pub limits: RateLimitSettings,
    pub gemini: GeminiConfig,
    pub twilio: TwilioConfig,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Reads the full configuration from the environment, with development
    /// defaults for anything unset.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: AppEnvironment::detect(env::var("APP_ENV").ok()),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig::from_env(),
            session: SessionConfig::from_env()?,
            limits: RateLimitSettings::from_env()?,
            gemini: GeminiConfig::from_env(),
            twilio: TwilioConfig::from_env(),
            cors_origins: cors_origins_from_env(),
        })
    }
}

fn cors_origins_from_env() -> Vec<String> {
    match env::var("CORS_ORIGINS") {
        Ok(raw) => raw
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect(),
        // Vite and CRA dev servers, the usual local frontends.
        Err(_) => vec![
            "http://localhost:5173".to_string(),
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:5173".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ],
    }
}

fn env_number<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var }),
        Err(_) => Ok(default),
    }
}

fn env_optional(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: match env::var("APP_PORT") {
                Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort)?,
                Err(_) => 3000,
            },
        })
    }

    /// Resolves the bind address, accepting the "localhost" alias.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl TelemetryConfig {
    fn from_env() -> Self {
        Self {
            log_level: env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// Inactivity window after which conversational sessions are swept.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub timeout_minutes: i64,
}

impl SessionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            timeout_minutes: env_number("SESSION_TIMEOUT_MINUTES", 30)?,
        })
    }

    pub fn timeout(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.timeout_minutes)
    }
}

/// Sliding-window quota for one guarded surface.
#[derive(Debug, Clone, Copy)]
pub struct QuotaConfig {
    pub max_requests: usize,
    pub window_seconds: u64,
}

impl QuotaConfig {
    fn from_env(
        limit_var: &'static str,
        window_var: &'static str,
        defaults: (usize, u64),
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            max_requests: env_number(limit_var, defaults.0)?,
            window_seconds: env_number(window_var, defaults.1)?,
        })
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}

/// Independent quotas for the chat, direct-eligibility, and SMS surfaces.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitSettings {
    pub chat: QuotaConfig,
    pub eligibility: QuotaConfig,
    pub sms: QuotaConfig,
}

impl RateLimitSettings {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            chat: QuotaConfig::from_env("CHAT_RATE_LIMIT", "CHAT_RATE_WINDOW_SECONDS", (20, 60))?,
            eligibility: QuotaConfig::from_env(
                "ELIGIBILITY_RATE_LIMIT",
                "ELIGIBILITY_RATE_WINDOW_SECONDS",
                (30, 60),
            )?,
            sms: QuotaConfig::from_env("SMS_RATE_LIMIT", "SMS_RATE_WINDOW_SECONDS", (5, 60))?,
        })
    }
}

/// Google Gemini access. Reply generation degrades to templates when the key is absent.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
}

impl GeminiConfig {
    fn from_env() -> Self {
        Self {
            api_key: env_optional("GOOGLE_API_KEY"),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string()),
        }
    }
}

/// Twilio access. SMS delivery degrades to mock receipts unless all three are present.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub from_number: Option<String>,
}

impl TwilioConfig {
    fn from_env() -> Self {
        Self {
            account_sid: env_optional("TWILIO_ACCOUNT_SID"),
            auth_token: env_optional("TWILIO_AUTH_TOKEN"),
            from_number: env_optional("TWILIO_PHONE_NUMBER"),
        }
    }

    pub fn credentials(&self) -> Option<(String, String, String)> {
        match (&self.account_sid, &self.auth_token, &self.from_number) {
            (Some(sid), Some(token), Some(from)) => {
                Some((sid.clone(), token.clone(), from.clone()))
            }
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT is not a valid port number"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST is neither an IP address nor 'localhost'")
            }
            ConfigError::InvalidNumber { var } => write!(f, "{var} is not a valid number"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    const ALL_VARS: [&str; 17] = [
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "APP_LOG_LEVEL",
        "SESSION_TIMEOUT_MINUTES",
        "CHAT_RATE_LIMIT",
        "CHAT_RATE_WINDOW_SECONDS",
        "ELIGIBILITY_RATE_LIMIT",
        "ELIGIBILITY_RATE_WINDOW_SECONDS",
        "SMS_RATE_LIMIT",
        "SMS_RATE_WINDOW_SECONDS",
        "GOOGLE_API_KEY",
        "GEMINI_MODEL",
        "TWILIO_ACCOUNT_SID",
        "TWILIO_AUTH_TOKEN",
        "TWILIO_PHONE_NUMBER",
        "CORS_ORIGINS",
    ];

    // Env mutation is process-wide, so every test takes this lock.
    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_env() {
        for var in ALL_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _guard = env_lock().lock().expect("env mutex poisoned");
        clear_env();

        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.session.timeout_minutes, 30);
        assert_eq!(config.limits.chat.max_requests, 20);
        assert_eq!(config.limits.eligibility.max_requests, 30);
        assert_eq!(config.limits.sms.max_requests, 5);
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.gemini.model, "gemini-pro");
        assert!(config.twilio.credentials().is_none());
        assert_eq!(config.cors_origins.len(), 4);
    }

    #[test]
    fn accepts_localhost_host() {
        let _guard = env_lock().lock().expect("env mutex poisoned");
        clear_env();
        env::set_var("APP_HOST", "localhost");

        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn rejects_malformed_quota() {
        let _guard = env_lock().lock().expect("env mutex poisoned");
        clear_env();
        env::set_var("SMS_RATE_LIMIT", "not-a-number");

        let err = AppConfig::load().expect_err("malformed quota rejected");
        assert!(err.to_string().contains("SMS_RATE_LIMIT"));
    }

    #[test]
    fn blank_collaborator_keys_are_treated_as_absent() {
        let _guard = env_lock().lock().expect("env mutex poisoned");
        clear_env();
        env::set_var("GOOGLE_API_KEY", "   ");
        env::set_var("TWILIO_ACCOUNT_SID", "sid");

        let config = AppConfig::load().expect("config loads");
        assert!(config.gemini.api_key.is_none());
        assert!(config.twilio.credentials().is_none());
    }
}
