use std::sync::Arc;

use anyhow::Result;
use domain::services::sms::{MockSmsGateway, SmsGateway};
use tracing::info;

mod app;
mod config;
mod error;
mod jobs;
mod middleware;
mod routes;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    info!("Starting ReachOut API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize metrics recorder before anything records a metric
    middleware::init_metrics()?;

    // Create database pool
    let pool = persistence::db::create_pool(&config.database.pool_config()).await?;

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    // Pick the SMS gateway: the real HTTP client when configured, the mock
    // (accept-everything) gateway otherwise
    let sms: Arc<dyn SmsGateway> = if config.sms.enabled {
        info!(base_url = %config.sms.base_url, "Using HTTP SMS gateway");
        Arc::new(services::HttpSmsGateway::new(&config.sms)?)
    } else {
        info!("SMS gateway disabled, using mock gateway");
        Arc::new(MockSmsGateway::new())
    };

    // Background jobs
    let mut scheduler = jobs::JobScheduler::new();
    if config.jobs.batch_match_enabled {
        scheduler.register(jobs::BatchMatchJob::new(
            pool.clone(),
            sms.clone(),
            config.sms.default_country_code.clone(),
            config.jobs.batch_match_interval_minutes,
        ));
    }
    scheduler.start();

    // Build application
    let addr = config.socket_addr()?;
    let app = app::create_app(config, pool, sms);

    // Start server
    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    scheduler.shutdown();
    scheduler
        .wait_for_shutdown(std::time::Duration::from_secs(10))
        .await;

    Ok(())
}
