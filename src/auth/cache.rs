//! Durable token cache.
//!
//! A refreshed token outlives the process so a subsequent run can reuse it
//! without re-authenticating. The persistence seam is a trait, making
//! file-backed and in-memory stores interchangeable behind the
//! [`TokenManager`](crate::auth::TokenManager) contract.

use crate::error::AuthError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

/// A bearer token with its absolute expiry.
///
/// The expiry already has the refresh safety margin folded in, so the token
/// is usable exactly while `now < expires_at`.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    /// Whether the token is still usable.
    pub fn is_fresh(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

impl std::fmt::Debug for StoredToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredToken")
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Storage seam for cross-run token reuse.
pub trait CredentialCache: Send + Sync {
    /// Load the persisted token, if any.
    fn load(&self) -> Result<Option<StoredToken>, AuthError>;

    /// Persist a token, overwriting any previous one.
    fn save(&self, token: &StoredToken) -> Result<(), AuthError>;
}

/// File-backed cache storing the token as TOML.
pub struct FileCredentialCache {
    path: PathBuf,
}

impl FileCredentialCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialCache for FileCredentialCache {
    fn load(&self) -> Result<Option<StoredToken>, AuthError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AuthError::CacheLoad(e.to_string())),
        };

        let token = toml::from_str(&raw).map_err(|e| AuthError::CacheLoad(e.to_string()))?;
        Ok(Some(token))
    }

    fn save(&self, token: &StoredToken) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AuthError::CacheStore(e.to_string()))?;
        }
        let raw = toml::to_string(token).map_err(|e| AuthError::CacheStore(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| AuthError::CacheStore(e.to_string()))
    }
}

/// In-memory cache for tests and embedding.
#[derive(Default)]
pub struct InMemoryCredentialCache {
    token: Mutex<Option<StoredToken>>,
}

impl InMemoryCredentialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the cache with a token, as if a previous run had persisted it.
    pub fn with_token(token: StoredToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl CredentialCache for InMemoryCredentialCache {
    fn load(&self) -> Result<Option<StoredToken>, AuthError> {
        Ok(self
            .token
            .lock()
            .map_err(|e| AuthError::CacheLoad(e.to_string()))?
            .clone())
    }

    fn save(&self, token: &StoredToken) -> Result<(), AuthError> {
        *self
            .token
            .lock()
            .map_err(|e| AuthError::CacheStore(e.to_string()))? = Some(token.clone());
        Ok(())
    }
}
