//! Process-startup failures surfaced by the server and CLI entry points.
//! Request-scoped errors live next to the handlers that produce them.

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use std::fmt;
use std::net::SocketAddr;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    Serve(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "could not load configuration: {err}"),
            AppError::Telemetry(err) => write!(f, "could not set up telemetry: {err}"),
            AppError::Bind { addr, source } => write!(f, "could not bind {addr}: {source}"),
            AppError::Serve(err) => write!(f, "server terminated: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let source: &(dyn std::error::Error + 'static) = match self {
            AppError::Config(err) => err,
            AppError::Telemetry(err) => err,
            AppError::Bind { source, .. } => source,
            AppError::Serve(err) => err,
        };
        Some(source)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}
