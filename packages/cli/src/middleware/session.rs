// ABOUTME: Session-guard middleware protecting the API when REQUIRE_AUTH is set
// ABOUTME: Validates bearer sessions without sliding expiry; only /auth/verify extends

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::error;

use workforce_console::api::auth::bearer_token;
use workforce_console::api::response::{internal_error, unauthorized};
use workforce_console::DbState;

/// Paths reachable without a session: health probes and the login endpoint
const WHITELISTED_PATHS: &[&str] = &["/api/health", "/api/auth/login"];

pub async fn session_guard(State(state): State<DbState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if WHITELISTED_PATHS.contains(&path) {
        return next.run(request).await;
    }

    let Some(token) = bearer_token(request.headers()) else {
        return unauthorized("Authorization token required");
    };

    match state.auth.validate(&token).await {
        Ok(Some(_)) => next.run(request).await,
        Ok(None) => unauthorized("Invalid or expired session"),
        Err(e) => {
            error!("Session validation failed: {}", e);
            internal_error()
        }
    }
}
