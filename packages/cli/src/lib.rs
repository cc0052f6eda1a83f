// ABOUTME: Server entrypoint: config, tracing, database, router, listener

use std::env;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use workforce_console::{DbState, StorageError};

pub mod api;
pub mod config;
pub mod middleware;

use config::Config;

pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!("Starting AI Workforce console server");
    info!("CORS origin: {}", config.cors_origin);

    let db = DbState::init_with_path(&config.db_path, config.upload_dir.clone()).await?;
    seed_admin_user(&db).await?;

    let app = api::create_router(&config, db)?;

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the initial admin account when the users table is empty and
/// WORKFORCE_ADMIN_PASSWORD is set. A no-op on every later start.
async fn seed_admin_user(db: &DbState) -> Result<(), StorageError> {
    let Ok(password) = env::var("WORKFORCE_ADMIN_PASSWORD") else {
        return Ok(());
    };
    if password.is_empty() {
        return Ok(());
    }

    if db.auth.count_users().await? == 0 {
        db.auth
            .create_user("admin", "admin@workforce.local", &password, "admin")
            .await?;
        info!("Seeded initial admin user");
    }

    Ok(())
}
