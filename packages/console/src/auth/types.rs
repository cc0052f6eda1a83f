use serde::{Deserialize, Serialize};

/// The user fields exposed to clients; the hash never leaves storage
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// A live session: the user it belongs to and its current expiry
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub user: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    pub expires_at: String,
}

/// Outcome of a login attempt.
///
/// Unknown user and wrong password collapse into `InvalidCredentials` so the
/// two cases are indistinguishable to the caller.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    Success(SessionInfo),
    InvalidCredentials,
    AccountDisabled,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}
