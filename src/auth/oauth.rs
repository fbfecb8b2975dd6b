//! OAuth2 client-credentials exchange against the governance token endpoint.

use crate::config::Config;
use crate::error::AuthError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use zeroize::Zeroizing;

/// HTTP request timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// HTTP connection timeout.
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth2 client for the client-credentials grant.
pub struct OAuth2Client {
    client_id: String,
    client_secret: Zeroizing<String>,
    token_url: String,
    http_client: reqwest::Client,
}

impl OAuth2Client {
    /// Create a new OAuth2 client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = build_http_client(&config.oauth.trust_anchor)
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client_id: config.oauth.client_id.clone(),
            client_secret: Zeroizing::new(config.oauth.client_secret.clone()),
            token_url: config.token_url(),
            http_client,
        })
    }

    /// Exchange client credentials for an access token.
    ///
    /// Credentials are sent as form fields, which is what the governance
    /// token endpoint expects. There is no retry here; a failed exchange is
    /// fatal to the calling pipeline.
    pub async fn client_credentials(&self) -> Result<TokenResponse, AuthError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::ExchangeTransport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!("Token exchange failed: HTTP {} - {}", status, error_body);
            return Err(AuthError::ExchangeFailed {
                status: status.as_u16(),
            });
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        Ok(token_response)
    }
}

impl std::fmt::Debug for OAuth2Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Client")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("token_url", &self.token_url)
            .finish()
    }
}

/// Build an HTTP client with the standard timeouts, trusting the configured
/// PEM bundle when one is set.
pub fn build_http_client(trust_anchor: &str) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .connect_timeout(HTTP_CONNECT_TIMEOUT);

    if !trust_anchor.is_empty() {
        let pem = std::fs::read(trust_anchor)
            .with_context(|| format!("Failed to read trust anchor {trust_anchor}"))?;
        let cert =
            reqwest::Certificate::from_pem(&pem).context("Trust anchor is not valid PEM")?;
        builder = builder.add_root_certificate(cert);
    }

    builder.build().context("Failed to build HTTP client")
}

/// Token response from the credential exchange.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub scope: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let config = crate::config::Config {
            api: crate::config::ApiConfig {
                base_url: "https://govern.example.com".into(),
                page_size: 100,
            },
            oauth: crate::config::OAuthConfig {
                client_id: "client".into(),
                client_secret: "very-secret".into(),
                trust_anchor: String::new(),
            },
            campaign: crate::config::CampaignConfig {
                owner_id: "o".into(),
                owner_name: "O".into(),
                deadline: "2026-12-31".into(),
                creation_spacing_secs: 1,
            },
            activation: crate::config::ActivationConfig {
                poll_interval_secs: 30,
                max_poll_attempts: 120,
            },
            token: crate::config::TokenConfig {
                cache_file: String::new(),
            },
            logging: crate::config::LoggingConfig {
                level: "info".into(),
            },
        };

        let client = OAuth2Client::new(&config).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_token_response_parsing() {
        let json = r#"{"access_token":"abc","token_type":"bearer","expires_in":3600}"#;
        let parsed: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "abc");
        assert_eq!(parsed.expires_in, 3600);
        assert_eq!(parsed.scope, "");
    }
}
