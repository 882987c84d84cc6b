use serde::Deserialize;

/// Controls how much of an expected error reaches API consumers
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorsConfig {
    /// Include the error context in response bodies
    #[serde(default = "default_expose_context")]
    pub expose_context: bool,
    /// Context keys whose values are replaced before rendering
    #[serde(default)]
    pub redact_keys: Vec<String>,
}

impl Default for ErrorsConfig {
    fn default() -> Self {
        Self {
            expose_context: default_expose_context(),
            redact_keys: Vec::new(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_expose_context() -> bool {
    true
}
