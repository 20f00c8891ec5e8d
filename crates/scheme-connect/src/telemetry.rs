//! Tracing subscriber setup shared by the server and CLI entry points.

use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { spec: String, source: ParseError },
    Init(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { spec, .. } => {
                write!(f, "'{spec}' is not a valid tracing filter")
            }
            TelemetryError::Init(err) => write!(f, "failed to install subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::Init(err) => Some(&**err),
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured
/// level so operators can raise verbosity without touching config.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Init)
}

fn parse_filter(spec: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(spec).map_err(|source| TelemetryError::InvalidFilter {
        spec: spec.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::parse_filter;

    #[test]
    fn plain_levels_and_directives_parse() {
        assert!(parse_filter("info").is_ok());
        assert!(parse_filter("warn,scheme_connect=debug").is_ok());
    }

    #[test]
    fn malformed_directives_are_reported_with_the_spec() {
        let err = parse_filter("scheme_connect=notalevel").expect_err("malformed filter rejected");
        assert!(err.to_string().contains("scheme_connect=notalevel"));
    }
}
