//! Binary crate wiring the scheme-connect library behind an HTTP server
//! and a small set of CLI commands.

mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use scheme_connect::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
