//! Campaign creation pipeline: role discovery, grouping, and rate-limited
//! bulk creation.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::governance::client::GovernanceClient;
use crate::governance::grouping::{group_roles, RoleGroup};
use crate::governance::models::{CampaignPayload, IdentityRef, RoleCompositionInfo};
use crate::governance::report::{CreationOutcome, CreationReport};

/// Campaign type submitted for every group.
const CAMPAIGN_TYPE: &str = "ROLE_COMPOSITION";

/// Reviewers are not required to comment on their decisions.
const COMMENT_REQUIREMENT: &str = "NO_DECISIONS";

/// Creation settings derived from configuration.
#[derive(Debug, Clone)]
pub struct CreatorSettings {
    /// Remediator identity attached to every created campaign.
    pub remediator: IdentityRef,
    /// Certification deadline; the leading four characters are the year.
    pub deadline: String,
    /// Minimum spacing between consecutive creation requests.
    pub spacing: Duration,
    /// Page size for role discovery.
    pub page_size: u32,
}

impl CreatorSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            remediator: IdentityRef::identity(
                &config.campaign.owner_id,
                &config.campaign.owner_name,
            ),
            deadline: config.campaign.deadline.clone(),
            spacing: Duration::from_secs(config.campaign.creation_spacing_secs),
            page_size: config.api.page_size,
        }
    }

    fn year(&self) -> &str {
        // Config validation guarantees a four-digit prefix.
        self.deadline.get(..4).unwrap_or_default()
    }
}

/// Build the creation payload for one role group.
///
/// Pure: the payload depends only on the settings and the group.
pub fn build_payload(settings: &CreatorSettings, group: &RoleGroup) -> CampaignPayload {
    let role_names: Vec<&str> = group.roles.iter().map(|r| r.name.as_str()).collect();
    let role_ids: Vec<String> = group.roles.iter().map(|r| r.id.clone()).collect();

    let name = format!(
        "{} Role Certification's for {} {}",
        group.key.area,
        group.key.owner_name,
        settings.year()
    );
    let description = format!(
        "Certification campaign for roles in {} owned by {}. Roles: {}",
        group.key.area,
        group.key.owner_name,
        role_names.join(", ")
    );

    CampaignPayload {
        name,
        description,
        campaign_type: CAMPAIGN_TYPE,
        email_notification_enabled: false,
        deadline: settings.deadline.clone(),
        role_composition_campaign_info: RoleCompositionInfo {
            remediator_ref: settings.remediator.clone(),
            reviewer_id: group.key.owner_id.clone(),
            reviewer: IdentityRef::identity(&group.key.owner_id, &group.key.owner_name),
            role_ids,
        },
        mandatory_comment_requirement: COMMENT_REQUIREMENT,
    }
}

/// Creates one certification campaign per role group.
pub struct CampaignCreator {
    client: Arc<GovernanceClient>,
    settings: CreatorSettings,
}

impl CampaignCreator {
    pub fn new(client: Arc<GovernanceClient>, settings: CreatorSettings) -> Self {
        Self { client, settings }
    }

    /// Submit one creation request per group.
    ///
    /// Each group is independent: a failed creation is recorded and the
    /// batch continues. The configured spacing is slept after every
    /// submission regardless of outcome. Authentication failure aborts the
    /// batch.
    pub async fn create_all(
        &self,
        groups: &[RoleGroup],
    ) -> Result<Vec<CreationOutcome>, ApiError> {
        let mut outcomes = Vec::with_capacity(groups.len());

        for group in groups {
            let payload = build_payload(&self.settings, group);
            let name = payload.name.clone();
            let body = serde_json::to_string(&payload).unwrap_or_default();

            let result = match self.client.create_campaign(&payload).await {
                Err(e @ ApiError::Auth(_)) => return Err(e),
                other => other,
            };

            // Client-side rate limiting, applied after each submission.
            sleep(self.settings.spacing).await;

            match result {
                Ok(created) => {
                    info!(
                        campaign = %name,
                        status = created.status,
                        body = %body,
                        "Campaign created"
                    );
                    println!("{name} created successfully.");
                    outcomes.push(CreationOutcome::Created {
                        campaign_id: created.campaign.map(|c| c.id),
                        name,
                    });
                }
                Err(e) => {
                    error!(
                        campaign = %name,
                        status = ?e.status(),
                        body = %body,
                        "Campaign creation failed: {}",
                        e
                    );
                    println!("Failed to create {name}. {e}");
                    outcomes.push(CreationOutcome::Failed {
                        status: e.status(),
                        reason: e.to_string(),
                        name,
                    });
                }
            }
        }

        Ok(outcomes)
    }

    /// Full discovery → grouping → creation pipeline.
    pub async fn run(&self) -> Result<CreationReport, ApiError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("create_campaigns", %run_id);

        async {
            let fetch = self.client.fetch_all_roles(self.settings.page_size).await?;
            let groups = group_roles(&fetch.roles);
            info!(
                "Grouped {} roles into {} campaigns",
                fetch.roles.len(),
                groups.len()
            );

            let outcomes = self.create_all(&groups).await?;
            Ok(CreationReport {
                outcomes,
                fetch_complete: fetch.complete,
            })
        }
        .instrument(span)
        .await
    }
}
