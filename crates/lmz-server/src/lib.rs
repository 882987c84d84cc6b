#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod boundary;
mod error;
mod routes;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use lmz_accounts::AccountStore;
use lmz_config::Config;
use tower_http::trace::TraceLayer;

pub use boundary::{ErrorPolicy, error_boundary_middleware};
pub use error::{ApiError, ErrorReport};
pub use routes::{AccountsState, ApiJson, ApiPath};

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the configured
    /// account seed file cannot be loaded
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let store = match config.accounts.seed_file {
            Some(ref path) => AccountStore::from_seed_file(path).await?,
            None => AccountStore::new(),
        };

        let accounts = AccountsState {
            store,
            seed_file: config.accounts.seed_file.clone(),
        };

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(routes::health_handler));
        }

        app = app
            .merge(routes::account_router(accounts))
            .method_not_allowed_fallback(routes::method_not_allowed_fallback)
            .fallback(routes::not_found_fallback);

        // Apply middleware layers (innermost first)

        // Error boundary (innermost, sees every handler error first)
        let policy = Arc::new(ErrorPolicy::from(&config.server.errors));
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let policy = Arc::clone(&policy);
            async move { error_boundary_middleware(policy, req, next).await }
        }));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
