#![allow(clippy::must_use_candidate)]

pub mod accounts;
mod env;
pub mod errors;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use accounts::*;
pub use env::EnvError;
pub use errors::*;
pub use health::*;
pub use server::*;
pub use telemetry::*;

/// Top-level LMZ configuration
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Account directory configuration
    #[serde(default)]
    pub accounts: AccountsConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
