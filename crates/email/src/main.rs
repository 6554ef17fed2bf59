use anyhow::{Context, Result};
use donation_email::{app::EmailServiceApp, config::Config};
use dotenv::dotenv;
use shared::utils::{Telemetry, init_logger};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match &config.otel_endpoint {
        Some(endpoint) => Some(
            Telemetry::init("email-service", endpoint)
                .context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    let _guard = init_logger(
        "email-service",
        config.dev_mode,
        config.enable_file_log,
        telemetry.as_ref().map(Telemetry::logger_provider),
    );

    info!("🚀 Starting email service on port {}", config.port);

    let result = EmailServiceApp::new(config).run().await;

    info!("Shutting down email service...");

    if let Some(telemetry) = telemetry {
        if let Err(e) = telemetry.shutdown() {
            warn!("Telemetry shutdown failed: {e}");
        }
    }

    result
}
