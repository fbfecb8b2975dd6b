//! Token lifecycle management with expiry-aware caching.

use crate::auth::cache::{CredentialCache, StoredToken};
use crate::auth::oauth::OAuth2Client;
use crate::error::AuthError;
use chrono::{Duration, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Seconds subtracted from the provider-reported lifetime so a token is
/// replaced before the remote side expires it.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Owns the current token and the credential exchange that replaces it.
///
/// The cached token is process-wide state: every network-facing component
/// reads it through [`auth_headers`](Self::auth_headers), and only this type
/// mutates it. Refresh is single-flight, so concurrent callers share one
/// credential exchange.
pub struct TokenManager {
    oauth_client: OAuth2Client,
    cache: Arc<dyn CredentialCache>,
    current: RwLock<Option<StoredToken>>,
}

impl TokenManager {
    /// Create a token manager, priming the in-memory token from the durable
    /// cache so a still-fresh token from a previous run skips the exchange.
    pub fn new(oauth_client: OAuth2Client, cache: Arc<dyn CredentialCache>) -> Self {
        let current = match cache.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Ignoring unreadable token cache: {}", e);
                None
            }
        };

        Self {
            oauth_client,
            cache,
            current: RwLock::new(current),
        }
    }

    /// Authenticated headers for governance API calls.
    ///
    /// Returns headers built from the cached token while it is fresh,
    /// issuing no network call. Otherwise performs exactly one credential
    /// exchange, persists the replacement token, and returns headers built
    /// from it.
    pub async fn auth_headers(&self) -> Result<HeaderMap, AuthError> {
        {
            let current = self.current.read().await;
            if let Some(token) = current.as_ref() {
                if token.is_fresh() {
                    return build_headers(&token.access_token);
                }
            }
        }

        // The write guard is held across the exchange so concurrent callers
        // await this refresh instead of issuing their own.
        let mut current = self.current.write().await;
        if let Some(token) = current.as_ref() {
            if token.is_fresh() {
                return build_headers(&token.access_token);
            }
        }

        info!("Cached token missing or expired, requesting a new one");
        let response = self.oauth_client.client_credentials().await?;
        let expires_at =
            Utc::now() + Duration::seconds(response.expires_in as i64 - EXPIRY_MARGIN_SECS);
        let token = StoredToken {
            access_token: response.access_token,
            expires_at,
        };

        if let Err(e) = self.cache.save(&token) {
            warn!("Failed to persist refreshed token: {}", e);
        }
        info!("New access token obtained, expires at {}", token.expires_at);

        let headers = build_headers(&token.access_token);
        *current = Some(token);
        headers
    }
}

/// Bearer authorization plus the content negotiation the API requires.
fn build_headers(access_token: &str) -> Result<HeaderMap, AuthError> {
    let mut headers = HeaderMap::new();

    let bearer = HeaderValue::from_str(&format!("Bearer {access_token}"))
        .map_err(|_| AuthError::InvalidResponse("token is not a valid header value".into()))?;
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Ok(headers)
}
