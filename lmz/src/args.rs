use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// LMZ account service
#[derive(Debug, Parser)]
#[command(name = "lmz", about = "Account service with structured error responses")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "lmz.toml", env = "LMZ_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "LMZ_LISTEN")]
    pub listen: Option<SocketAddr>,
}
