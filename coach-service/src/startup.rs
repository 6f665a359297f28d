//! Application startup and lifecycle management.

use crate::config::CoachConfig;
use crate::handlers::{generate, health};
use crate::services::CoachService;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{make_request_span, request_id_middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub coach: Arc<CoachService>,
}

impl AppState {
    pub fn new(coach: CoachService) -> Self {
        Self {
            coach: Arc::new(coach),
        }
    }
}

async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Route not found"))
}

/// Build the HTTP router for the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/generate",
            post(generate::generate).fallback(generate::method_not_allowed),
        )
        .route("/health", get(health::health_check))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// A missing API key is not fatal here: it is logged once and every
    /// generate request answers with a configuration error.
    pub async fn build(config: CoachConfig) -> Result<Self, AppError> {
        let coach = CoachService::from_config(&config)?;
        Self::build_with_service(config, coach).await
    }

    /// Build around an already constructed service (tests inject mocks here).
    pub async fn build_with_service(
        config: CoachConfig,
        coach: CoachService,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Coach service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(coach),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_with_shutdown(std::future::pending::<()>()).await
    }

    /// Run until `shutdown` resolves, letting in-flight requests finish.
    pub async fn run_with_shutdown<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
