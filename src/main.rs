#![recursion_limit = "256"]

mod api;
mod commands;
mod config;
mod error;
mod poll;
mod session;
mod web;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), error::CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = commands::Cli::parse();
    commands::run(cli).await
}
