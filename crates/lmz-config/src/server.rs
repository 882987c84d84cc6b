use std::net::SocketAddr;

use serde::Deserialize;

use crate::{errors::ErrorsConfig, health::HealthConfig};

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub errors: ErrorsConfig,
}
