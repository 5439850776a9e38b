//! Gateway server — backend selection, CORS, bind and serve

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use codebox_core::{Backend, CodeboxConfig, LocalSandbox, RemoteJudge, Runner};

use crate::routes;
use crate::state::GatewayState;

/// The HTTP server wrapping the execution sandbox.
pub struct GatewayServer {
    config: CodeboxConfig,
}

impl GatewayServer {
    pub fn new(config: CodeboxConfig) -> Self {
        Self { config }
    }

    /// Instantiate the configured execution backend.
    pub fn runner(&self) -> Arc<dyn Runner> {
        match self.config.gateway.backend {
            Backend::Local => Arc::new(LocalSandbox::new(self.config.sandbox.clone())),
            Backend::Remote => Arc::new(RemoteJudge::new(&self.config.remote)),
        }
    }

    fn cors_layer(&self) -> Result<CorsLayer> {
        if self.config.gateway.allowed_origins.is_empty() {
            return Ok(CorsLayer::permissive());
        }
        let origins = self
            .config
            .gateway
            .allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid allowed origin: {origin}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any))
    }

    /// Bind the configured address and serve until the process exits.
    pub async fn serve(self) -> Result<()> {
        let bind = self.config.gateway.bind.clone();
        let backend = self.config.gateway.backend;
        let state = GatewayState::new(
            self.runner(),
            self.config.gateway.max_concurrent_executions,
        );
        let app = routes::router(state).layer(self.cors_layer()?);

        let listener = tokio::net::TcpListener::bind(&bind)
            .await
            .with_context(|| format!("Failed to bind to {bind}"))?;
        info!("Gateway listening on {bind} ({backend} backend)");

        axum::serve(listener, app).await.context("Server error")?;
        Ok(())
    }
}
