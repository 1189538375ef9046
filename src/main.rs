// src/main.rs

use exam_server::config::Config;
use exam_server::routes;
use exam_server::state::AppState;
use exam_server::{database, repository, services};
use sqlx::SqlitePool;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (and .env, if present)
    let config = Config::from_env().map_err(|e| format!("JWT_SECRET must be set: {}", e))?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool with Retry
    let mut retry_count = 0;
    let pool = loop {
        match database::connect(&config.database_url).await {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    tracing::error!("Failed to connect to database after 5 retries: {}", e);
                    return Err(e.into());
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    database::migrate(&pool).await?;
    tracing::info!("Migrations applied successfully.");

    if config.seed_demo_exam {
        if let Err(e) = seed_if_empty(&pool).await {
            tracing::error!("Failed to seed demo exam: {:?}", e);
        }
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(pool, config);

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    // Start the server
    axum::serve(listener, app).await?;
    Ok(())
}

async fn seed_if_empty(pool: &SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
    if repository::exams::count(pool).await? == 0 {
        tracing::info!("No exams found, seeding demo exam");
        services::seed::seed_demo_exam(pool).await?;
    }
    Ok(())
}
