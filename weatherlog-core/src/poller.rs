use crate::{client::WeatherApi, error::Error, report::format_report, sink::ReportSink};
use chrono::Local;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Fixed pause between reporting cycles. No jitter, no backoff.
pub const POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Drives the validate-then-report loop over an injected API and sink.
///
/// The loop is sequential: cities within a cycle are fetched one at a
/// time, so sink writes land in request order. Cancellation is checked
/// before every cycle and races the inter-cycle sleep, so the loop can be
/// shut down cleanly from outside.
pub struct Poller<A, S> {
    api: A,
    sink: S,
    interval: Duration,
    cancel: CancellationToken,
}

impl<A, S> Poller<A, S>
where
    A: WeatherApi,
    S: ReportSink,
{
    pub fn new(api: A, sink: S, interval: Duration, cancel: CancellationToken) -> Self {
        Self {
            api,
            sink,
            interval,
            cancel,
        }
    }

    /// Validate the requested cities once, then report on the valid ones
    /// until cancelled.
    ///
    /// A failing city-list fetch (including the token renewal behind it)
    /// is fatal: nothing can be reported without the valid set. Once the
    /// loop is running, a failure for one city never suppresses the rest
    /// of its cycle or later cycles.
    pub async fn run(&self, requested: &[String]) -> Result<(), Error> {
        let valid = self.api.list_valid_cities().await?;
        let (required, invalid) = partition_cities(requested, &valid);

        if !invalid.is_empty() {
            warn!(?invalid, "Some requested cities are not served by the API");
            println!();
            println!("We have found some invalid cities:");
            for city in &invalid {
                println!("{city}");
            }
            println!("Proceeding with weather reporting using valid cities, if any.");
        }

        if required.is_empty() {
            println!();
            println!("No valid cities");
            return Ok(());
        }

        println!();
        println!("Reporting weather using cities:");
        for city in &required {
            println!("{city}");
        }
        println!();

        while !self.cancel.is_cancelled() {
            self.report_cycle(&required).await;

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("Polling loop cancelled, shutting down");
        Ok(())
    }

    /// One pass over the required cities. Per-city failures are reported
    /// to the operator and skipped.
    async fn report_cycle(&self, cities: &[String]) {
        for city in cities {
            if let Err(e) = self.report_city(city).await {
                error!(%city, error = %e, "Skipping city for this cycle");
                eprintln!("Failed to report weather for {city}: {e}");
            }
        }
    }

    async fn report_city(&self, city: &str) -> Result<(), Error> {
        let report = self.api.city_weather(city).await?;
        let text = format_report(&report, Local::now());
        self.sink.save(&text).await?;
        println!("{text}");
        Ok(())
    }
}

/// Split the requested city names into (required, invalid) against the
/// server's valid set. Both halves preserve request order; duplicate
/// requests collapse to their first occurrence.
pub fn partition_cities(requested: &[String], valid: &[String]) -> (Vec<String>, Vec<String>) {
    let mut required = Vec::new();
    let mut invalid = Vec::new();

    for city in requested {
        if required.contains(city) || invalid.contains(city) {
            continue;
        }
        if valid.contains(city) {
            required.push(city.clone());
        } else {
            invalid.push(city.clone());
        }
    }

    (required, invalid)
}
