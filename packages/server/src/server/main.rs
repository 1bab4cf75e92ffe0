// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use community_core::domains::dashboard::DashboardCache;
use community_core::domains::reviews::MajorityPolicy;
use community_core::kernel::{start_scheduler, ServerDeps};
use community_core::server::{auth::JwtService, build_app, HttpOptions};
use community_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,community_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Community Review API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let dashboard_cache = DashboardCache::with_ttl_secs(config.dashboard_cache_ttl_secs);
    let deps = Arc::new(ServerDeps::new(
        pool,
        dashboard_cache.clone(),
        Arc::new(MajorityPolicy),
    ));

    // Keep the handle alive for the lifetime of the server
    let _scheduler = start_scheduler(dashboard_cache)
        .await
        .context("Failed to start scheduled tasks")?;

    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));
    let app = build_app(
        deps,
        jwt_service,
        &HttpOptions {
            allowed_origins: config.allowed_origins.clone(),
            rate_limit_per_second: config.rate_limit_per_second,
        },
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
