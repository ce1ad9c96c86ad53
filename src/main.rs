use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

mod db;
mod error;
mod handlers;
mod middleware;
mod models;

// AppState holds the pooled database client, built once at startup and
// handed to every handler through the router.
pub struct AppState {
    pub db_pool: sqlx::PgPool,
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize production-grade logging
    init_logging().expect("Failed to initialize logging");

    // Create the database connection pool; a missing DATABASE_URL or an
    // unreachable database is fatal before the server binds.
    let db_pool = match db::create_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    // Create the shared state
    let shared_state = Arc::new(AppState { db_pool });

    // Build our application with all routes and shared state
    let app = Router::new()
        .merge(handlers::ui::ui_routes())
        .merge(handlers::scenarios::scenario_routes())
        .merge(handlers::diagnose::diagnose_routes())
        .merge(handlers::results::results_routes())
        .merge(handlers::status::status_routes())
        .layer(axum::middleware::from_fn(middleware::logging::request_logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(Extension(shared_state));

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind server address");
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

// Production-grade logging configuration
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, fmt, Layer};

    // Get log level from environment or default to INFO for production
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug,reasoning_assistant=trace,sqlx=info,hyper=info,tower=info".to_string()
        } else {
            "info,reasoning_assistant=info,sqlx=warn,hyper=warn,tower=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log_level))?;

    // JSON logging for production, human-readable for development
    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("🧠 Reasoning assistant starting up...");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Build mode: {}",
        if cfg!(debug_assertions) { "development" } else { "production" }
    );
    tracing::info!("Log level: {}", log_level);
    tracing::info!(
        "Configuration - Database: {}",
        if std::env::var("DATABASE_URL").is_ok() { "✅" } else { "❌" }
    );

    Ok(())
}
