use std::path::PathBuf;

use serde::Deserialize;

/// Account directory configuration
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountsConfig {
    /// JSON file of accounts loaded at startup
    pub seed_file: Option<PathBuf>,
}
