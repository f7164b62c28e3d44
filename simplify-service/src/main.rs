use service_core::observability::{init_tracing, shutdown_tracing};
use simplify_service::config::SimplifyConfig;
use simplify_service::services::metrics::init_metrics;
use simplify_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = SimplifyConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "simplify-service",
        &config.common.log_level,
        config.common.otlp_endpoint(),
    );
    init_metrics();

    let app = Application::build(config).await?;
    tracing::info!(port = app.port(), "Starting simplify-service");

    let result = app.run_until_stopped().await;
    shutdown_tracing();

    result.map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
