//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use lmz_config::{Config, ErrorsConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Seed the account directory from a JSON file
    pub fn with_seed_file(mut self, path: &Path) -> Self {
        self.config.accounts.seed_file = Some(path.to_path_buf());
        self
    }

    /// Set the error exposure policy
    pub fn with_errors(mut self, errors: ErrorsConfig) -> Self {
        self.config.server.errors = errors;
        self
    }

    /// Move the health endpoint
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
