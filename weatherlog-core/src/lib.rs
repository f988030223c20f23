//! Core library for the `weatherlog` polling client.
//!
//! This crate defines:
//! - Configuration handling for the remote API and the report file
//! - Session-token acquisition and caching
//! - The authenticated HTTP client for the weather service
//! - Report formatting and the append-only persistence sink
//! - The polling loop that drives repeated per-city reporting
//!
//! It is used by `weatherlog-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod poller;
pub mod report;
pub mod sink;
pub mod token;

pub use client::{WeatherApi, WeatherClient};
pub use config::{ApiConfig, Config, SaverConfig};
pub use error::Error;
pub use model::{Credential, WeatherReport};
pub use poller::{POLL_INTERVAL, Poller};
pub use report::{format_report, trim_trailing_commas};
pub use sink::{FileSink, ReportSink};
pub use token::TokenCache;
