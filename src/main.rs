//! FF Arena - Application Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ffarena::{
    config::CONFIG,
    constants::API_BASE_PATH,
    db, handlers,
    scheduler::ReminderScheduler,
    services::{LogNotifier, Notifier, WebhookNotifier},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FF Arena server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;
    db::test_connection(&db_pool).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Initialize Redis connection
    tracing::info!("Connecting to Redis...");
    let redis_client = RedisClient::open(CONFIG.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    // Pick the notification gateway
    let notifier: Arc<dyn Notifier> = match &CONFIG.notification.webhook_url {
        Some(url) => {
            tracing::info!(url = %url, "Using webhook notification delivery");
            Arc::new(WebhookNotifier::new(url.clone(), &CONFIG.notification))
        }
        None => {
            tracing::warn!("NOTIFICATION_WEBHOOK_URL not set, notifications will only be logged");
            Arc::new(LogNotifier)
        }
    };

    // Create application state
    let state = AppState::new(
        db_pool.clone(),
        redis_conn,
        notifier.clone(),
        CONFIG.clone(),
    );

    // Spawn the reminder scheduler
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler_handle = if CONFIG.scheduler.enabled {
        let scheduler = ReminderScheduler::new(
            db_pool,
            notifier,
            CONFIG.scheduler.tick_interval_seconds,
            shutdown_rx,
        );
        Some(tokio::spawn(scheduler.run()))
    } else {
        tracing::warn!("Reminder scheduler disabled; use the admin trigger endpoint");
        None
    };

    // Build the router
    let app = Router::new()
        .nest(API_BASE_PATH, handlers::routes(state.clone()))
        .layer(middleware::from_fn(
            ffarena::middleware::logging_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    // Stop the scheduler and wait for its pass to finish
    let _ = shutdown_tx.send(true);
    if let Some(handle) = scheduler_handle {
        let _ = handle.await;
    }

    tracing::info!("Server stopped");

    Ok(())
}
