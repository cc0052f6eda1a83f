// ABOUTME: User and session storage using SQLite
// ABOUTME: Bearer-token session lifecycle: issue, verify with sliding expiry, revoke

use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::password::{hash_password, verify_password};
use super::types::{LoginOutcome, SessionInfo, UserSummary};
use crate::storage::{StorageError, StorageResult};
use workforce_core::generate_hex_token;

/// Session lifetime, also the sliding-renewal window
const SESSION_WINDOW: &str = "+24 hours";

pub struct AuthStorage {
    pool: SqlitePool,
}

impl AuthStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user with a hashed password and return its id
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> StorageResult<i64> {
        debug!("Creating user: {}", username);

        let password_hash = hash_password(password)?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(result.last_insert_rowid())
    }

    pub async fn count_users(&self) -> StorageResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;
        Ok(count)
    }

    /// Authenticate by username or email and mint a session token.
    ///
    /// Unknown user and wrong password both come back as
    /// `InvalidCredentials`; only a disabled account is distinguishable.
    /// Every successful login also garbage-collects globally expired
    /// sessions.
    pub async fn login(&self, username: &str, password: &str) -> StorageResult<LoginOutcome> {
        debug!("Login attempt for: {}", username);

        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role, is_active
            FROM users
            WHERE username = ? OR email = ?
            "#,
        )
        .bind(username)
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let Some(row) = row else {
            return Ok(LoginOutcome::InvalidCredentials);
        };

        let is_active: i64 = row.try_get("is_active")?;
        if is_active == 0 {
            return Ok(LoginOutcome::AccountDisabled);
        }

        let password_hash: String = row.try_get("password_hash")?;
        if !verify_password(password, &password_hash) {
            return Ok(LoginOutcome::InvalidCredentials);
        }

        let user = UserSummary {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            role: row.try_get("role")?,
        };

        // 32 random bytes as 64 lowercase hex characters
        let session_token = generate_hex_token(32);

        sqlx::query(
            r#"
            INSERT INTO user_sessions (user_id, session_token, expires_at)
            VALUES (?, ?, datetime('now', ?))
            "#,
        )
        .bind(user.id)
        .bind(&session_token)
        .bind(SESSION_WINDOW)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let expires_at: String =
            sqlx::query_scalar("SELECT expires_at FROM user_sessions WHERE session_token = ?")
                .bind(&session_token)
                .fetch_one(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        // Opportunistic cleanup of expired sessions
        sqlx::query("DELETE FROM user_sessions WHERE expires_at < datetime('now')")
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(LoginOutcome::Success(SessionInfo {
            user,
            session_token: Some(session_token),
            expires_at,
        }))
    }

    /// Verify a bearer token and slide its expiry forward by the session
    /// window. Returns None for unknown, expired, or disabled-user sessions.
    pub async fn verify(&self, session_token: &str) -> StorageResult<Option<SessionInfo>> {
        let Some(user) = self.validate(session_token).await? else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            UPDATE user_sessions
            SET expires_at = datetime('now', ?)
            WHERE session_token = ?
            "#,
        )
        .bind(SESSION_WINDOW)
        .bind(session_token)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let expires_at: String =
            sqlx::query_scalar("SELECT expires_at FROM user_sessions WHERE session_token = ?")
                .bind(session_token)
                .fetch_one(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        Ok(Some(SessionInfo {
            user,
            session_token: None,
            expires_at,
        }))
    }

    /// Check a bearer token without touching its expiry
    pub async fn validate(&self, session_token: &str) -> StorageResult<Option<UserSummary>> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.username, u.email, u.role
            FROM users u
            JOIN user_sessions s ON u.id = s.user_id
            WHERE s.session_token = ?
              AND s.expires_at > datetime('now')
              AND u.is_active = 1
            "#,
        )
        .bind(session_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(UserSummary {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            role: row.try_get("role")?,
        }))
    }

    /// Revoke a session. Idempotent: revoking an unknown token succeeds.
    pub async fn logout(&self, session_token: &str) -> StorageResult<()> {
        debug!("Logging out session");

        sqlx::query("DELETE FROM user_sessions WHERE session_token = ?")
            .bind(session_token)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(())
    }
}
