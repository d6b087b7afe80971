//! MarketHub server: product catalog backend with real-time notifications.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use markethub_core::config::AppConfig;
use markethub_core::error::AppError;
use markethub_service::notification::push::LivePush;

#[tokio::main]
async fn main() {
    let env = std::env::var("MARKETHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting MarketHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db = markethub_database::DatabasePool::connect(&config.database).await?;
    db.run_migrations().await?;

    // ── Step 2: Initialize cache ─────────────────────────────────
    tracing::info!(
        "Initializing cache (provider: {})...",
        config.cache.provider
    );
    let cache = Arc::new(markethub_cache::CacheManager::new(&config.cache).await?);

    // ── Step 3: Repositories ─────────────────────────────────────
    let pool = db.pool().clone();
    let user_repo = Arc::new(markethub_database::repositories::UserRepository::new(
        pool.clone(),
    ));
    let product_repo = Arc::new(markethub_database::repositories::ProductRepository::new(
        pool.clone(),
    ));
    let review_repo = Arc::new(markethub_database::repositories::ReviewRepository::new(
        pool.clone(),
    ));
    let reaction_repo = Arc::new(markethub_database::repositories::ReactionRepository::new(
        pool.clone(),
    ));
    let save_repo = Arc::new(markethub_database::repositories::SaveRepository::new(
        pool.clone(),
    ));
    let notif_repo = Arc::new(
        markethub_database::repositories::NotificationRepository::new(pool.clone()),
    );
    let security_repo = Arc::new(
        markethub_database::repositories::SecurityEventRepository::new(pool.clone()),
    );

    // ── Step 4: Realtime engine ──────────────────────────────────
    let connections = Arc::new(markethub_realtime::ConnectionManager::new(
        config.realtime.clone(),
    ));

    // ── Step 5: Notification store + dispatcher ──────────────────
    // The dispatcher only knows the LivePush trait; handing it the
    // connection manager here is what breaks the notification/realtime
    // dependency cycle.
    let notifications = Arc::new(markethub_service::NotificationService::new(
        notif_repo.clone(),
        cache.clone(),
    ));
    let push: Arc<dyn LivePush> = connections.clone();
    let dispatcher = Arc::new(markethub_service::notification::EventDispatcher::new(
        notifications.clone(),
        user_repo.clone(),
        push,
    ));

    // ── Step 6: Domain services ──────────────────────────────────
    let moderation = Arc::new(markethub_service::ModerationService::new(
        security_repo.clone(),
        user_repo.clone(),
        dispatcher.clone(),
        config.moderation,
    ));
    let reactions = Arc::new(markethub_service::ReactionService::new(
        reaction_repo.clone(),
        product_repo.clone(),
        review_repo.clone(),
        cache.clone(),
        dispatcher.clone(),
    ));
    let saves = Arc::new(markethub_service::SaveService::new(
        save_repo,
        product_repo.clone(),
        cache.clone(),
        dispatcher.clone(),
    ));
    let reviews = Arc::new(markethub_service::ReviewService::new(
        review_repo,
        product_repo,
        reaction_repo,
        dispatcher.clone(),
    ));
    let admin_users = Arc::new(markethub_service::AdminUserService::new(
        user_repo.clone(),
        dispatcher.clone(),
    ));

    // ── Step 7: Auth ─────────────────────────────────────────────
    let jwt_decoder = Arc::new(markethub_auth::JwtDecoder::new(&config.auth));
    let ws_auth = Arc::new(markethub_realtime::WsAuthenticator::new(
        jwt_decoder.clone(),
        user_repo.clone(),
    ));

    // ── Step 8: Background maintenance ───────────────────────────
    let scheduler = markethub_worker::MaintenanceScheduler::new(
        security_repo,
        notif_repo,
        config.worker.clone(),
    )
    .await?;
    scheduler.register_default_tasks().await?;
    scheduler.start().await?;

    // ── Step 9: HTTP server ──────────────────────────────────────
    let state = markethub_api::AppState {
        db: db.clone(),
        cache,
        jwt_decoder,
        user_repo,
        notifications,
        moderation,
        reactions,
        saves,
        reviews,
        admin_users,
        connections,
        ws_auth,
    };

    let app = markethub_api::build_router(state);
    let addr = config.server.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("MarketHub listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves when Ctrl-C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
