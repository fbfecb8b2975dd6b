//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use rolecert::auth::{InMemoryCredentialCache, OAuth2Client, StoredToken, TokenManager};
use rolecert::config::{
    ActivationConfig, ApiConfig, CampaignConfig, Config, LoggingConfig, OAuthConfig, TokenConfig,
};
use rolecert::governance::GovernanceClient;

/// Bearer token the seeded token manager hands out.
pub const TEST_TOKEN: &str = "test-token-123";

/// Configuration pointing at a mock server.
pub fn test_config(base_url: &str) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            page_size: 100,
        },
        oauth: OAuthConfig {
            client_id: "test-client".into(),
            client_secret: "test-secret".into(),
            trust_anchor: String::new(),
        },
        campaign: CampaignConfig {
            owner_id: "admin-1".into(),
            owner_name: "Admin Owner".into(),
            deadline: "2026-12-31".into(),
            creation_spacing_secs: 1,
        },
        activation: ActivationConfig {
            poll_interval_secs: 30,
            max_poll_attempts: 120,
        },
        token: TokenConfig {
            cache_file: String::new(),
        },
        logging: LoggingConfig {
            level: "info".into(),
        },
    }
}

/// A token that stays fresh for the duration of a test.
pub fn fresh_token() -> StoredToken {
    StoredToken {
        access_token: TEST_TOKEN.into(),
        expires_at: Utc::now() + Duration::hours(1),
    }
}

/// A token whose expiry has already passed.
pub fn expired_token() -> StoredToken {
    StoredToken {
        access_token: "stale-token".into(),
        expires_at: Utc::now() - Duration::seconds(5),
    }
}

/// Token manager seeded with a fresh token so API tests skip the exchange.
pub fn seeded_token_manager(config: &Config) -> Arc<TokenManager> {
    let cache = InMemoryCredentialCache::with_token(fresh_token());
    Arc::new(TokenManager::new(
        OAuth2Client::new(config).unwrap(),
        Arc::new(cache),
    ))
}

/// Governance client backed by a seeded token manager.
pub fn governance_client(config: &Config) -> Arc<GovernanceClient> {
    let tokens = seeded_token_manager(config);
    Arc::new(GovernanceClient::new(
        reqwest::Client::new(),
        config.api.base_url.clone(),
        tokens,
    ))
}
