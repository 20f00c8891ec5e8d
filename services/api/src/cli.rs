use crate::demo::{run_check, run_demo, CheckArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scheme_connect::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SchemeConnect",
    about = "Scholarship scheme discovery service and companion CLI tools",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (the default when no command is given)
    Serve(ServeArgs),
    /// Evaluate a profile against the scheme catalog and print the matches
    Check(CheckArgs),
    /// Walk a scripted conversation through the in-process chat service
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Bind host, overriding APP_HOST
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Bind port, overriding APP_PORT
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    match Cli::parse().command {
        None => server::run(ServeArgs::default()).await,
        Some(Command::Serve(args)) => server::run(args).await,
        Some(Command::Check(args)) => run_check(args),
        Some(Command::Demo(args)) => run_demo(args).await,
    }
}
