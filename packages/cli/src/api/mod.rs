// ABOUTME: Router assembly: nests every resource router under /api
// ABOUTME: CORS, body-size limit, and the optional session guard live here

use axum::extract::DefaultBodyLimit;
use axum::http::{header::InvalidHeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use workforce_console::api as console_api;
use workforce_console::files::MAX_UPLOAD_SIZE;
use workforce_console::DbState;

use crate::config::Config;
use crate::middleware::session_guard;

pub mod health;

pub fn create_router(config: &Config, db: DbState) -> Result<Router, InvalidHeaderValue> {
    let cors = build_cors(&config.cors_origin)?;

    let mut router = Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/api/agents", console_api::create_agents_router())
        .nest("/api/tasks", console_api::create_tasks_router())
        .nest("/api/workgroups", console_api::create_workgroups_router())
        .nest("/api/messages", console_api::create_messages_router())
        .nest("/api/settings", console_api::create_settings_router())
        .nest("/api/files", console_api::create_files_router())
        .nest("/api/auth", console_api::create_auth_router())
        .nest("/api/errors", console_api::create_errors_router());

    if config.require_auth {
        router = router.layer(middleware::from_fn_with_state(db.clone(), session_guard));
    }

    // Body limit sits above the upload cap so the size check in the upload
    // handler produces the envelope error, not a bare 413
    Ok(router
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 1024 * 1024))
        .layer(cors)
        .with_state(db))
}

fn build_cors(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::exact(origin.parse()?)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any))
}
