use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use lessonplans_core::cache::{start_eviction_sweeper, LessonPlanCache, DEFAULT_SWEEP_INTERVAL_SECS};
use lessonplans_core::service::LessonPlanService;
use lessonplans_db::PgGateway;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lessonplans_api::config::ServerConfig;
use lessonplans_api::http_client::build_http_client;
use lessonplans_api::router::build_app_router;
use lessonplans_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lessonplans_api=debug,lessonplans_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = lessonplans_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    lessonplans_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    lessonplans_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Cache ---
    let cache = Arc::new(LessonPlanCache::new(config.cache));
    let sweeper_handle = start_eviction_sweeper(
        Arc::clone(&cache),
        Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
    );
    tracing::info!(
        ttl_secs = config.cache.time_to_live.as_secs(),
        max_idle_secs = config.cache.max_idle.as_secs(),
        "Lesson plan cache created"
    );

    // --- Outbound HTTP ---
    let http_client =
        build_http_client(&config.http_client).expect("Failed to build HTTP client");

    // --- App state ---
    let state = AppState {
        service: LessonPlanService::new(Arc::new(PgGateway::new(pool))),
        cache: Arc::clone(&cache),
        config: Arc::new(config.clone()),
        http_client,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweeper_handle.abort();
    cache.clear().await;
    tracing::info!("Lesson plan cache released");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
