//! Session authenticator - admin login, logout and cookie token resolution.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::{Admin, AdminIdentity, StoredSession, Viewer};
use crate::error::RepoError;
use crate::ports::{AdminRepository, AuthError, PasswordService, SessionTokenService};

/// Default lifetime of an admin session (and its cookie), in days.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

/// A freshly issued session. `token` goes into the client cookie and is not
/// stored anywhere server-side.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub admin: AdminIdentity,
    pub expires_at: DateTime<Utc>,
}

/// Each admin holds at most one session; logging in again replaces it.
pub struct SessionAuthenticator {
    admins: Arc<dyn AdminRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn SessionTokenService>,
    session_ttl: TimeDelta,
    dummy_hash: OnceLock<String>,
}

impl SessionAuthenticator {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn SessionTokenService>,
    ) -> Self {
        Self {
            admins,
            passwords,
            tokens,
            session_ttl: TimeDelta::days(DEFAULT_SESSION_TTL_DAYS),
            dummy_hash: OnceLock::new(),
        }
    }

    pub fn with_session_ttl(mut self, ttl: TimeDelta) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn session_ttl(&self) -> TimeDelta {
        self.session_ttl
    }

    /// Check credentials and start a new session, replacing any previous one.
    pub async fn login(&self, username: &str, secret: &str) -> Result<IssuedSession, AuthError> {
        if username.is_empty() || secret.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let Some(admin) = self.admins.find_by_username(username).await? else {
            // Keep the timing of unknown usernames close to a failed verify.
            self.burn_verification(secret);
            tracing::warn!(username = %mask(username), "Login rejected: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.passwords.verify(secret, &admin.password_hash)? {
            tracing::warn!(username = %mask(username), "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.generate();
        let expires_at = Utc::now() + self.session_ttl;
        let session = StoredSession {
            token_digest: self.tokens.digest(&token),
            expires_at,
        };
        self.admins.set_session(admin.id, Some(session)).await?;

        tracing::info!(admin_id = %admin.id, %expires_at, "Admin session started");

        Ok(IssuedSession {
            token,
            admin: admin.identity(),
            expires_at,
        })
    }

    /// End the session carried by `token`. Unknown or absent tokens are a no-op.
    pub async fn logout(&self, token: Option<&str>) -> Result<(), AuthError> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(());
        };

        let cleared = self
            .admins
            .clear_session_by_digest(&self.tokens.digest(token))
            .await?;
        if cleared > 0 {
            tracing::info!("Admin session ended");
        }

        Ok(())
    }

    /// Map a cookie token back to the admin who owns it.
    pub async fn resolve(&self, token: &str) -> Result<Option<AdminIdentity>, AuthError> {
        if token.is_empty() {
            return Ok(None);
        }

        let digest = self.tokens.digest(token);
        let Some(admin) = self.admins.find_by_session_digest(&digest).await? else {
            return Ok(None);
        };

        match &admin.session {
            Some(session) if !session.is_expired(Utc::now()) => Ok(Some(admin.identity())),
            _ => {
                // Clear by digest so a session issued since the lookup survives.
                tracing::debug!(admin_id = %admin.id, "Clearing expired admin session");
                self.admins.clear_session_by_digest(&digest).await?;
                Ok(None)
            }
        }
    }

    /// Resolve an optional cookie token into the request's viewer.
    pub async fn viewer(&self, token: Option<&str>) -> Result<Viewer, AuthError> {
        match token {
            Some(token) => Ok(self.resolve(token).await?.into()),
            None => Ok(Viewer::Anonymous),
        }
    }

    /// Create an admin account with a hashed password.
    pub async fn provision_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminIdentity, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if self.admins.find_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let hash = self.passwords.hash(password)?;
        let admin = self
            .admins
            .insert(Admin::new(username.to_string(), hash))
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => AuthError::UsernameTaken(username.to_string()),
                other => other.into(),
            })?;

        tracing::info!(admin_id = %admin.id, username = %mask(username), "Admin provisioned");
        Ok(admin.identity())
    }

    fn burn_verification(&self, secret: &str) {
        let hash = match self.dummy_hash.get() {
            Some(hash) => hash,
            None => match self.passwords.hash("inkpost-dummy-password") {
                Ok(hash) => self.dummy_hash.get_or_init(|| hash),
                Err(_) => return,
            },
        };
        let _ = self.passwords.verify(secret, hash);
    }
}

/// Mask usernames for logging.
fn mask(username: &str) -> String {
    match username.chars().next() {
        Some(first) if username.chars().count() > 1 => format!("{first}***"),
        _ => "***".to_string(),
    }
}
