use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

use otp_api::{app, build_state, config, handlers, telemetry};
use otp_core::services::RateLimiter;
use otp_infra::{create_email_sender, InMemoryIdentityStore, RateLimitCleanupTask};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load().context("Failed to load configuration")?;
    telemetry::init(&config.logging);

    info!(environment = %config.environment, "Starting email OTP service");

    let store = match config.directory.seed_file.as_deref() {
        Some(path) => InMemoryIdentityStore::load_seed_file(path)
            .await
            .with_context(|| format!("Failed to load directory seed from {}", path))?,
        None => {
            warn!("No directory seed file configured, starting with an empty directory");
            InMemoryIdentityStore::new()
        }
    };
    let store = Arc::new(store);

    let sender = create_email_sender(&config.email).context("Failed to create email sender")?;
    info!(provider = sender.provider_name(), "Email sender ready");

    let rate_limiter = Arc::new(RateLimiter::with_system_clock(config.rate_limit.clone()));
    let cleanup = RateLimitCleanupTask::new(
        rate_limiter.clone(),
        config.rate_limit.cleanup_interval_seconds,
    )
    .start();

    let state = web::Data::new(build_state(&config, store, sender, rate_limiter));

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(app::configure(state.clone()))
            .default_service(web::route().to(handlers::not_found))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    cleanup.shutdown().await;
    info!("Email OTP service stopped");
    Ok(())
}
