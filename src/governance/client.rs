//! Governance API client for role discovery and campaign management.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::auth::TokenManager;
use crate::error::ApiError;
use crate::governance::models::{Campaign, CampaignPayload, Role};

/// Outcome of a full paginated role fetch.
#[derive(Debug)]
pub struct RoleFetch {
    pub roles: Vec<Role>,
    /// False when a failed page request truncated the result.
    pub complete: bool,
    /// Page requests issued, the terminating one included.
    pub pages: u32,
}

/// Result of an accepted campaign-creation request.
#[derive(Debug)]
pub struct CampaignCreated {
    pub status: u16,
    /// The created campaign when the response body could be parsed.
    pub campaign: Option<Campaign>,
}

/// Response to an activation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationAck {
    /// The remote side reported the campaign already active (HTTP 200).
    AlreadyActive,
    /// Activation accepted and in progress (HTTP 202).
    Accepted,
}

/// HTTP client for the governance REST API.
///
/// Every request carries headers from the shared [`TokenManager`]; requests
/// are issued strictly sequentially by the calling pipelines.
pub struct GovernanceClient {
    http_client: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenManager>,
}

impl GovernanceClient {
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        tokens: Arc<TokenManager>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
            tokens,
        }
    }

    /// Fetch one page of roles.
    pub async fn list_roles_page(&self, offset: u32, limit: u32) -> Result<Vec<Role>, ApiError> {
        let url = format!(
            "{}/v3/roles?offset={}&limit={}",
            self.base_url, offset, limit
        );
        let headers = self.tokens.auth_headers().await?;

        debug!("Fetching roles page at offset {}", offset);

        let response = self.http_client.get(&url).headers(headers).send().await?;
        let status = response.status();
        match status.as_u16() {
            200 => response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string())),
            code => {
                let body = response.text().await.unwrap_or_default();
                error!("Failed to fetch roles page: HTTP {} - {}", status, body);
                Err(ApiError::from_status(code))
            }
        }
    }

    /// Fetch the complete role collection page by page, starting at offset 0.
    ///
    /// Stops at the first empty page. A failed page request truncates the
    /// result instead of failing the fetch; callers observe this through
    /// [`RoleFetch::complete`]. Authentication failure is the exception: it
    /// is fatal to the whole pipeline.
    pub async fn fetch_all_roles(&self, page_size: u32) -> Result<RoleFetch, ApiError> {
        let mut roles: Vec<Role> = Vec::new();
        let mut offset = 0;
        let mut pages = 0;

        loop {
            pages += 1;
            match self.list_roles_page(offset, page_size).await {
                Ok(batch) => {
                    if batch.is_empty() {
                        break;
                    }
                    roles.extend(batch);
                    offset += page_size;
                }
                Err(e @ ApiError::Auth(_)) => return Err(e),
                Err(e) => {
                    warn!("Role fetch truncated after {} roles: {}", roles.len(), e);
                    return Ok(RoleFetch {
                        roles,
                        complete: false,
                        pages,
                    });
                }
            }
        }

        info!("Fetched {} roles across {} pages", roles.len(), pages);
        Ok(RoleFetch {
            roles,
            complete: true,
            pages,
        })
    }

    /// List all campaigns.
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiError> {
        let url = format!("{}/v3/campaigns", self.base_url);
        let headers = self.tokens.auth_headers().await?;

        let response = self.http_client.get(&url).headers(headers).send().await?;
        let status = response.status();
        match status.as_u16() {
            200 => response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string())),
            code => {
                let body = response.text().await.unwrap_or_default();
                error!("Failed to list campaigns: HTTP {} - {}", status, body);
                Err(ApiError::from_status(code))
            }
        }
    }

    /// Submit one campaign-creation request. 200 and 201 count as success.
    pub async fn create_campaign(
        &self,
        payload: &CampaignPayload,
    ) -> Result<CampaignCreated, ApiError> {
        let url = format!("{}/v3/campaigns", self.base_url);
        let headers = self.tokens.auth_headers().await?;

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(payload)
            .send()
            .await?;
        let status = response.status().as_u16();
        match status {
            200 | 201 => {
                let campaign = response.json().await.ok();
                Ok(CampaignCreated { status, campaign })
            }
            code => {
                let body = response.text().await.unwrap_or_default();
                error!("Campaign creation failed: HTTP {} - {}", code, body);
                Err(ApiError::from_status(code))
            }
        }
    }

    /// Request activation of a staged campaign.
    pub async fn activate_campaign(&self, id: &str) -> Result<ActivationAck, ApiError> {
        let url = format!("{}/v3/campaigns/{}/activate", self.base_url, id);
        let headers = self.tokens.auth_headers().await?;

        let response = self.http_client.post(&url).headers(headers).send().await?;
        let status = response.status();
        match status.as_u16() {
            200 => Ok(ActivationAck::AlreadyActive),
            202 => Ok(ActivationAck::Accepted),
            code => {
                let body = response.text().await.unwrap_or_default();
                error!(
                    "Activation request for campaign {} failed: HTTP {} - {}",
                    id, status, body
                );
                Err(ApiError::from_status(code))
            }
        }
    }

    /// Fetch a single campaign's current state.
    pub async fn get_campaign(&self, id: &str) -> Result<Campaign, ApiError> {
        let url = format!("{}/v3/campaigns/{}", self.base_url, id);
        let headers = self.tokens.auth_headers().await?;

        let response = self.http_client.get(&url).headers(headers).send().await?;
        let status = response.status();
        match status.as_u16() {
            200 => response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string())),
            code => {
                let body = response.text().await.unwrap_or_default();
                error!(
                    "Failed to fetch campaign {}: HTTP {} - {}",
                    id, status, body
                );
                Err(ApiError::from_status(code))
            }
        }
    }
}
