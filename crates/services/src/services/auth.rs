//! Session-backed authentication for the admin panel.
//!
//! Login verifies the Argon2id hash, mints an opaque random token and
//! stores its SHA-256 digest with an expiry. Handlers receive an explicit
//! [`AuthContext`] rather than reading ambient session state.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use db::models::session::Session;
use db::models::user::User;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

const SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("session expired or unknown")]
    Unauthenticated,
    #[error("crypto error: {0}")]
    Crypto(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The authenticated caller identity, passed into every admin handler.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    /// Raw opaque token, returned to the client and never stored.
    pub token: String,
    pub expires_in: u64,
    pub context: AuthContext,
}

pub struct AuthService;

impl AuthService {
    pub async fn login(
        pool: &SqlitePool,
        email: &str,
        password: &str,
    ) -> Result<LoginOutput, AuthError> {
        let user = User::find_by_email(pool, email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(SESSION_TTL_HOURS);
        Session::create(pool, user.id, &hash_token(&token), expires_at).await?;

        info!(user_id = %user.id, "admin login");

        Ok(LoginOutput {
            token,
            expires_in: (SESSION_TTL_HOURS * 3600) as u64,
            context: AuthContext {
                user_id: user.id,
                email: user.email,
            },
        })
    }

    /// Resolve a raw bearer token to the caller identity.
    pub async fn authenticate(pool: &SqlitePool, token: &str) -> Result<AuthContext, AuthError> {
        let session = Session::find_by_token_hash(pool, &hash_token(token))
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if session.is_expired(Utc::now()) {
            // Expired rows are swept lazily.
            Session::delete_by_token_hash(pool, &session.token_hash).await?;
            return Err(AuthError::Unauthenticated);
        }

        let user = User::find_by_id(pool, session.user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        Ok(AuthContext {
            user_id: user.id,
            email: user.email,
        })
    }

    pub async fn logout(pool: &SqlitePool, token: &str) -> Result<(), AuthError> {
        Session::delete_by_token_hash(pool, &hash_token(token)).await?;
        Ok(())
    }

    /// Create an admin account. Used by the bootstrap path when the users
    /// table is empty.
    pub async fn create_user(
        pool: &SqlitePool,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let hash = hash_password(password)?;
        Ok(User::create(pool, email, &hash).await?)
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Crypto(format!("hash error: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

fn hash_token(token: &str) -> String {
    hex_encode(&Sha256::digest(token.as_bytes()))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_matches() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("pw", "not-a-hash").is_err());
    }

    #[test]
    fn tokens_are_unique_and_hash_deterministically() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert_eq!(hash_token(&a), hash_token(&a));
        assert_ne!(hash_token(&a), hash_token(&b));
    }

    #[tokio::test]
    async fn login_and_authenticate_round_trip() {
        let db = db::DbService::new_in_memory().await.unwrap();
        AuthService::create_user(&db.pool, "admin@example.com", "hunter2")
            .await
            .unwrap();

        let out = AuthService::login(&db.pool, "admin@example.com", "hunter2")
            .await
            .unwrap();
        let ctx = AuthService::authenticate(&db.pool, &out.token)
            .await
            .unwrap();
        assert_eq!(ctx.email, "admin@example.com");

        AuthService::logout(&db.pool, &out.token).await.unwrap();
        assert!(matches!(
            AuthService::authenticate(&db.pool, &out.token).await,
            Err(AuthError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn bad_password_is_invalid_credentials() {
        let db = db::DbService::new_in_memory().await.unwrap();
        AuthService::create_user(&db.pool, "admin@example.com", "hunter2")
            .await
            .unwrap();

        assert!(matches!(
            AuthService::login(&db.pool, "admin@example.com", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
