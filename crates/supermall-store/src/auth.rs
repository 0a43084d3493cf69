// ABOUTME: Mock authentication emulator: credential storage, sign-in/up, and the single session.
// ABOUTME: Sign-in accepts an email or a shop number; passwords are plaintext because this is a mock.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use supermall_core::{Role, UserRecord};
use thiserror::Error;
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::latency::Latency;
use crate::local::{LocalStorage, LocalStorageError};
use crate::logger::Logger;

/// The storage entry holding the credential array. Deliberately separate
/// from the `users` document collection.
const USERS_KEY: &str = "mockUsers";

/// Errors surfaced by the authentication emulator. Invalid credentials are
/// indistinguishable to the caller between "no such user" and "wrong
/// password"; the stored log tells them apart.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email, password, and shop number are required")]
    MissingFields,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Shop Number already registered")]
    ShopNumberAlreadyRegistered,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("storage error: {0}")]
    Storage(#[from] LocalStorageError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Additional fields supplied at sign-up beyond email and password.
#[derive(Debug, Clone, Default)]
pub struct SignUpProfile {
    pub shop_number: String,
    pub name: String,
    pub role: Role,
}

/// The projection of a signed-in user held as the current session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub uid: String,
    pub email: String,
    pub shop_number: String,
    pub role: Role,
    pub name: String,
}

impl From<&UserRecord> for SessionUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            uid: record.uid.clone(),
            email: record.email.clone(),
            shop_number: record.shop_number.clone(),
            role: record.role,
            name: record.name.clone(),
        }
    }
}

/// The mock authentication service. Holds the credential array in memory,
/// persists it wholesale on every change, and keeps exactly one current
/// session for the process. Clones share both.
#[derive(Clone)]
pub struct AuthEmulator {
    storage: LocalStorage,
    users: Arc<RwLock<Vec<UserRecord>>>,
    current: Arc<RwLock<Option<SessionUser>>>,
    latency: Latency,
    logger: Logger,
}

impl AuthEmulator {
    /// Open the emulator over a storage area, loading stored credentials.
    pub fn open(
        storage: LocalStorage,
        latency: Latency,
        logger: Logger,
    ) -> Result<Self, AuthError> {
        let users = match storage.get_item(USERS_KEY) {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };

        Ok(Self {
            storage,
            users: Arc::new(RwLock::new(users)),
            current: Arc::new(RwLock::new(None)),
            latency,
            logger,
        })
    }

    /// Sign in with an email or a shop number plus the plaintext password.
    /// On success the matched user becomes the current session.
    pub async fn sign_in(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<SessionUser, AuthError> {
        self.latency.auth_delay().await;

        let users = self.users.read().await;
        // An identifier containing '@' is treated as an email, anything
        // else as a shop number.
        let found = if identifier.contains('@') {
            users
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(identifier))
        } else {
            users.iter().find(|u| u.shop_number == identifier)
        };

        let Some(user) = found else {
            self.logger
                .error("login failed - user not found", json!({ "identifier": identifier }));
            return Err(AuthError::InvalidCredentials);
        };

        if user.password != password {
            self.logger
                .error("login failed - wrong password", json!({ "identifier": identifier }));
            return Err(AuthError::InvalidCredentials);
        }

        let session = SessionUser::from(user);
        drop(users);

        *self.current.write().await = Some(session.clone());
        self.logger.info(
            "login successful",
            json!({
                "identifier": identifier,
                "email": session.email,
                "shopNumber": session.shop_number,
            }),
        );
        Ok(session)
    }

    /// Register a new account. Email and shop number must both be unused;
    /// on success the new user becomes the current session.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: SignUpProfile,
    ) -> Result<SessionUser, AuthError> {
        self.latency.auth_delay().await;

        if email.is_empty() || password.is_empty() || profile.shop_number.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(AuthError::EmailAlreadyRegistered);
        }
        if users.iter().any(|u| u.shop_number == profile.shop_number) {
            return Err(AuthError::ShopNumberAlreadyRegistered);
        }

        let record = UserRecord {
            uid: format!("user_{}", Ulid::new().to_string().to_lowercase()),
            email: email.to_string(),
            password: password.to_string(),
            shop_number: profile.shop_number,
            name: profile.name,
            role: profile.role,
            created_at: Utc::now(),
            last_login: None,
        };
        let session = SessionUser::from(&record);

        users.push(record);
        self.persist(&users)?;
        drop(users);

        *self.current.write().await = Some(session.clone());
        self.logger.info(
            "user registration successful",
            json!({ "email": session.email, "shopNumber": session.shop_number }),
        );
        Ok(session)
    }

    /// Clear the current session. Always succeeds.
    pub async fn sign_out(&self) {
        *self.current.write().await = None;
        self.logger.info("user signed out", json!({}));
    }

    /// The current session, if any.
    pub async fn current_user(&self) -> Option<SessionUser> {
        self.current.read().await.clone()
    }

    /// One-shot auth-state check: resolves with the current session after
    /// the probe delay, imitating the listener callback of the real client.
    pub async fn auth_state(&self) -> Option<SessionUser> {
        self.latency.probe_delay().await;
        self.current_user().await
    }

    /// Stamp `lastLogin` on a stored record. Unknown uids do nothing.
    pub async fn record_login(&self, uid: &str) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.uid == uid) {
            user.last_login = Some(Utc::now());
            self.persist(&users)?;
        }
        Ok(())
    }

    /// Look up the full stored record behind a session uid.
    pub async fn find_by_uid(&self, uid: &str) -> Option<UserRecord> {
        let users = self.users.read().await;
        users.iter().find(|u| u.uid == uid).cloned()
    }

    /// Insert a record directly if its email is not yet registered, without
    /// touching the session or simulating latency. Used for seeding the
    /// default admin account. Returns whether a record was inserted.
    pub async fn seed_user(&self, record: UserRecord) -> Result<bool, AuthError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&record.email))
        {
            return Ok(false);
        }
        users.push(record);
        self.persist(&users)?;
        Ok(true)
    }

    fn persist(&self, users: &[UserRecord]) -> Result<(), AuthError> {
        let serialized = serde_json::to_string(users)?;
        self.storage.set_item(USERS_KEY, &serialized)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> AuthEmulator {
        let storage = LocalStorage::in_memory();
        let logger = Logger::new(storage.clone());
        AuthEmulator::open(storage, Latency::none(), logger).unwrap()
    }

    fn profile(shop_number: &str, name: &str) -> SignUpProfile {
        SignUpProfile {
            shop_number: shop_number.to_string(),
            name: name.to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_succeeds() {
        let auth = test_auth();
        let session = auth
            .sign_up("a@b.com", "pw", profile("101", "A"))
            .await
            .unwrap();
        assert_eq!(session.email, "a@b.com");
        assert_eq!(session.shop_number, "101");
        assert!(auth.current_user().await.is_some());

        auth.sign_out().await;
        assert!(auth.current_user().await.is_none());

        let session = auth.sign_in("a@b.com", "pw").await.unwrap();
        assert_eq!(session.email, "a@b.com");
        assert!(auth.current_user().await.is_some());
    }

    #[tokio::test]
    async fn sign_in_by_shop_number_works() {
        let auth = test_auth();
        auth.sign_up("a@b.com", "pw", profile("101", "A"))
            .await
            .unwrap();
        auth.sign_out().await;

        let session = auth.sign_in("101", "pw").await.unwrap();
        assert_eq!(session.email, "a@b.com");
    }

    #[tokio::test]
    async fn sign_in_email_match_ignores_case() {
        let auth = test_auth();
        auth.sign_up("a@b.com", "pw", profile("101", "A"))
            .await
            .unwrap();
        auth.sign_out().await;

        assert!(auth.sign_in("A@B.COM", "pw").await.is_ok());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let auth = test_auth();
        auth.sign_up("a@b.com", "pw", profile("101", "A"))
            .await
            .unwrap();
        auth.sign_out().await;

        let wrong_pw = auth.sign_in("a@b.com", "nope").await.unwrap_err();
        let unknown = auth.sign_in("z@z.com", "pw").await.unwrap_err();
        assert_eq!(wrong_pw.to_string(), "Invalid credentials");
        assert_eq!(unknown.to_string(), "Invalid credentials");
        assert!(auth.current_user().await.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_and_nothing_is_persisted() {
        let storage = LocalStorage::in_memory();
        let logger = Logger::new(storage.clone());
        let auth = AuthEmulator::open(storage.clone(), Latency::none(), logger).unwrap();

        auth.sign_up("a@b.com", "pw", profile("101", "A"))
            .await
            .unwrap();
        let err = auth
            .sign_up("a@b.com", "other", profile("202", "B"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailAlreadyRegistered));

        let raw = storage.get_item(USERS_KEY).unwrap();
        let stored: Vec<UserRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_shop_number_is_rejected() {
        let auth = test_auth();
        auth.sign_up("a@b.com", "pw", profile("101", "A"))
            .await
            .unwrap();
        let err = auth
            .sign_up("b@c.com", "pw", profile("101", "B"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::ShopNumberAlreadyRegistered));
    }

    #[tokio::test]
    async fn missing_shop_number_is_rejected() {
        let auth = test_auth();
        let err = auth
            .sign_up("a@b.com", "pw", profile("", "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
    }

    #[tokio::test]
    async fn sign_up_sets_the_current_session() {
        let auth = test_auth();
        auth.sign_up("a@b.com", "pw", profile("101", "A"))
            .await
            .unwrap();
        let session = auth.auth_state().await.expect("session present");
        assert_eq!(session.email, "a@b.com");
    }

    #[tokio::test]
    async fn record_login_stamps_last_login() {
        let auth = test_auth();
        let session = auth
            .sign_up("a@b.com", "pw", profile("101", "A"))
            .await
            .unwrap();
        assert!(auth.find_by_uid(&session.uid).await.unwrap().last_login.is_none());

        auth.record_login(&session.uid).await.unwrap();
        assert!(auth.find_by_uid(&session.uid).await.unwrap().last_login.is_some());
    }

    #[tokio::test]
    async fn credentials_survive_reopen() {
        let storage = LocalStorage::in_memory();
        let logger = Logger::new(storage.clone());
        let auth = AuthEmulator::open(storage.clone(), Latency::none(), logger.clone()).unwrap();
        auth.sign_up("a@b.com", "pw", profile("101", "A"))
            .await
            .unwrap();
        drop(auth);

        let reopened = AuthEmulator::open(storage, Latency::none(), logger).unwrap();
        // Session is per-process and does not survive
        assert!(reopened.current_user().await.is_none());
        assert!(reopened.sign_in("a@b.com", "pw").await.is_ok());
    }

    #[tokio::test]
    async fn seed_user_inserts_once() {
        let auth = test_auth();
        let record = UserRecord {
            uid: "admin_001".to_string(),
            email: "admin@supermall.com".to_string(),
            password: "admin123".to_string(),
            shop_number: "ADMIN".to_string(),
            name: "Super Admin".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
            last_login: None,
        };

        assert!(auth.seed_user(record.clone()).await.unwrap());
        assert!(!auth.seed_user(record).await.unwrap());
        // Seeding never signs anyone in
        assert!(auth.current_user().await.is_none());
    }
}
