//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
    routing::get,
};
use planner::{PlannerConfig, SupabaseTaskRepository, tasks_router};
use platform::config::{ProcessEnv, optional, optional_parsed};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{app_error::AppError, kind::ErrorKind};

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 31113);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,planner=info,telegram=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Required configuration; refuse to start without it
    let config = PlannerConfig::from_env()?;

    tracing::info!(
        bot_id = config.bot_token.bot_id(),
        table = %config.store.table,
        store_timeout_secs = config.store.timeout.as_secs(),
        max_init_data_age_secs = config.max_init_data_age.map(|age| age.as_secs()),
        "Planner configuration loaded"
    );

    let repo = SupabaseTaskRepository::new(&config.store)?;
    tracing::info!(endpoint = %repo.endpoint(), "Using Supabase task store");

    // CORS configuration
    let allow_origin = match optional(&ProcessEnv, "FRONTEND_ORIGINS") {
        Some(origins) => {
            let allowed_origins: Vec<http::HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            AllowOrigin::list(allowed_origins)
        }
        // Telegram webviews load the Mini App from arbitrary hosts
        None => AllowOrigin::any(),
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list([Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]));

    // Build router
    let tasks = tasks_router(repo, config);
    let app = Router::new()
        .route("/health", get(planner::health))
        .nest("/api", tasks.clone())
        .nest("/.netlify/functions", tasks)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = optional_parsed::<SocketAddr, _>(&ProcessEnv, "BIND_ADDR")?
        .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
