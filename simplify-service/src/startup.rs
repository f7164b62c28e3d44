//! Application startup and lifecycle management.

use crate::config::SimplifyConfig;
use crate::handlers::{
    health::{health_check, readiness_check},
    metrics::metrics,
    simplify::simplify,
};
use crate::services::providers::gemini::GeminiTextProvider;
use crate::services::providers::unconfigured::UnconfiguredTextProvider;
use crate::services::providers::TextProvider;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{http_trace_layer, request_id_middleware},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Shared application state. Cloned per request; holds no mutable data.
#[derive(Clone)]
pub struct AppState {
    pub text_provider: Arc<dyn TextProvider>,
}

impl AppState {
    pub fn new(text_provider: Arc<dyn TextProvider>) -> Self {
        Self { text_provider }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/simplify", post(simplify))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Gemini provider described by `config`.
    ///
    /// If the Gemini client cannot be built (e.g. no API key) the service
    /// still starts; `/simplify` then fails with a server error and `/ready`
    /// reports unavailable.
    pub async fn build(config: SimplifyConfig) -> Result<Self, AppError> {
        let text_provider: Arc<dyn TextProvider> =
            match GeminiTextProvider::new(config.gemini.provider_config()) {
                Ok(provider) => {
                    tracing::info!(
                        model = %config.gemini.model,
                        "Initialized Gemini text provider"
                    );
                    Arc::new(provider)
                }
                Err(e) => {
                    tracing::error!(
                        model = %config.gemini.model,
                        error = %e,
                        "Failed to initialize Gemini client; simplify requests will fail"
                    );
                    Arc::new(UnconfiguredTextProvider::new(
                        config.gemini.model.clone(),
                        e.to_string(),
                    ))
                }
            };

        Self::build_with_provider(config, text_provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: SimplifyConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        // Port 0 binds a random port (used by tests).
        let addr = config.common.socket_addr()?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Simplify service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(text_provider),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
