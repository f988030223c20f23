//! Binary crate for the `weatherlog` polling client.
//!
//! This crate focuses on:
//! - Parsing and validating CLI arguments
//! - Logging setup and dependency wiring
//! - Graceful shutdown on ctrl-c

use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weatherlog_core::{Config, FileSink, POLL_INTERVAL, Poller, WeatherClient};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Arguments are validated before anything touches the filesystem, so
    // a usage error leaves no report file behind.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cities = match cli::parse_cities(&args) {
        Ok(cities) => cities,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };

    let config = Config::load()?;
    info!("Starting up");

    let client = WeatherClient::new(config.api);
    let sink = FileSink::create(&config.saver).await?;

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received ctrl-c, cancelling the polling loop");
            signal_cancel.cancel();
        }
    });

    let poller = Poller::new(client, sink, POLL_INTERVAL, cancel);
    poller.run(&cities).await?;

    Ok(())
}
