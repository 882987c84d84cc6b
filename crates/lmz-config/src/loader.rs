use std::path::Path;

use crate::Config;

/// Path prefix owned by the account API
const ACCOUNT_ROUTES: &str = "/v1/accounts";

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::from_toml(&raw)?;
        tracing::debug!(path = %path.display(), "configuration loaded");

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable expansion, parsing, or
    /// validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the health path is not a plain absolute path
    /// outside the account API, or a redacted context key is blank
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_health()?;
        self.validate_errors()?;
        Ok(())
    }

    fn validate_health(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if !health.enabled {
            return Ok(());
        }
        if !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': `{}`", health.path);
        }
        if health.path.contains(['{', '}', '*', ':']) {
            anyhow::bail!("server.health.path must not contain route parameters: `{}`", health.path);
        }
        let under_accounts = health
            .path
            .strip_prefix(ACCOUNT_ROUTES)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
        if under_accounts {
            anyhow::bail!("server.health.path collides with the account API: `{}`", health.path);
        }
        Ok(())
    }

    fn validate_errors(&self) -> anyhow::Result<()> {
        if self.server.errors.redact_keys.iter().any(|k| k.trim().is_empty()) {
            anyhow::bail!("server.errors.redact_keys must not contain blank keys");
        }
        Ok(())
    }
}
