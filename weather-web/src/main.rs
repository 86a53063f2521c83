//! Binary crate for the `weather-web` app.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and interactive configuration
//! - Serving the home, results and comparison pages over HTTP
//! - Rendering view data into HTML

use clap::Parser;

mod cli;
mod error;
mod handlers;
mod server;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
