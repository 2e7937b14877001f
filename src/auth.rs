//! Vendor accounts and session management.
//!
//! Passwords are hashed with argon2id and a per-hash random salt. Sessions
//! are opaque random tokens held in an in-process store and carried by an
//! HttpOnly cookie; a restart logs everyone out.

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use parking_lot::RwLock;
use rand::RngCore;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::db::entities::{vendor, Vendor};
use crate::error::{AppError, Result};

const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// A logged-in vendor
#[derive(Clone, Debug)]
struct Session {
    vendor_id: i32,
    expires_at: SystemTime,
}

impl Session {
    fn is_expired(&self) -> bool {
        SystemTime::now() > self.expires_at
    }
}

/// Account registration, credential checks, and the session-token store
pub struct AuthService {
    db: DatabaseConnection,
    sessions: RwLock<HashMap<String, Session>>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            sessions: RwLock::new(HashMap::new()),
            session_ttl: SESSION_TTL,
        }
    }

    #[cfg(test)]
    fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Create a vendor account. Fails if the username is taken.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        restaurant_name: &str,
    ) -> Result<vendor::Model> {
        let existing = Vendor::find()
            .filter(vendor::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateUsername);
        }

        let model = vendor::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(hash_password(password)?),
            restaurant_name: Set(restaurant_name.to_string()),
            created_at: Set(crate::db::unix_now()),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Verify credentials and open a session. The error is the same for an
    /// unknown username and a wrong password.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let vendor = Vendor::find()
            .filter(vendor::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &vendor.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        let token = generate_token();
        let session = Session {
            vendor_id: vendor.id,
            expires_at: SystemTime::now() + self.session_ttl,
        };
        self.sessions.write().insert(token.clone(), session);
        Ok(token)
    }

    /// Resolve a session token to its vendor id. Expired tokens are dropped
    /// on lookup and behave like absent ones.
    pub fn vendor_id_for(&self, token: &str) -> Option<i32> {
        let sessions = self.sessions.read();
        match sessions.get(token) {
            Some(s) if !s.is_expired() => Some(s.vendor_id),
            Some(_) => {
                drop(sessions);
                self.sessions.write().remove(token);
                None
            }
            None => None,
        }
    }

    /// Revoke a session token.
    pub fn logout(&self, token: &str) {
        self.sessions.write().remove(token);
    }

    /// Drop all expired sessions.
    pub fn cleanup_expired(&self) {
        self.sessions.write().retain(|_, s| !s.is_expired());
    }
}

/// Hash a password with argon2id and a fresh random salt.
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored argon2id hash.
fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Generate an opaque random session token.
fn generate_token() -> String {
    let mut bytes = [0u8; 24];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_service() -> AuthService {
        AuthService::new(crate::db::test_connection().await)
    }

    #[test]
    fn password_hashes_are_salted() {
        let h1 = hash_password("secret").unwrap();
        let h2 = hash_password("secret").unwrap();

        assert_ne!(h1, h2);
        assert!(verify_password("secret", &h1));
        assert!(verify_password("secret", &h2));
        assert!(!verify_password("other", &h1));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let auth = test_service().await;
        auth.register("rosa", "secret", "Rosa's Tacos").await.unwrap();

        let err = auth.register("rosa", "other", "Imposter").await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUsername));
    }

    #[tokio::test]
    async fn login_requires_matching_credentials() {
        let auth = test_service().await;
        let vendor = auth.register("rosa", "secret", "Rosa's Tacos").await.unwrap();

        let token = auth.login("rosa", "secret").await.unwrap();
        assert_eq!(auth.vendor_id_for(&token), Some(vendor.id));

        let wrong = auth.login("rosa", "wrong").await.unwrap_err();
        assert!(matches!(wrong, AppError::InvalidCredentials));

        let unknown = auth.login("nobody", "secret").await.unwrap_err();
        assert!(matches!(unknown, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn logout_revokes_the_session() {
        let auth = test_service().await;
        auth.register("rosa", "secret", "Rosa's Tacos").await.unwrap();

        let token = auth.login("rosa", "secret").await.unwrap();
        auth.logout(&token);
        assert!(auth.vendor_id_for(&token).is_none());
    }

    #[tokio::test]
    async fn expired_sessions_do_not_resolve() {
        let auth = test_service().await.with_session_ttl(Duration::ZERO);
        auth.register("rosa", "secret", "Rosa's Tacos").await.unwrap();

        let token = auth.login("rosa", "secret").await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(auth.vendor_id_for(&token).is_none());

        // The lookup also evicted it from the store
        auth.cleanup_expired();
        assert!(auth.vendor_id_for(&token).is_none());
    }
}
