//! Campaign activation pipeline: activation requests plus the polling state
//! machine that confirms each campaign reached ACTIVE.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::governance::client::{ActivationAck, GovernanceClient};
use crate::governance::models::{Campaign, CampaignStatus};
use crate::governance::report::{ActivationOutcome, ActivationRecord, ActivationReport};

/// Activation settings derived from configuration.
#[derive(Debug, Clone)]
pub struct ActivatorSettings {
    /// Fixed interval between status polls.
    pub poll_interval: Duration,
    /// Poll budget per campaign before the outcome becomes `TimedOut`.
    pub max_poll_attempts: u32,
}

impl ActivatorSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            poll_interval: Duration::from_secs(config.activation.poll_interval_secs),
            max_poll_attempts: config.activation.max_poll_attempts,
        }
    }
}

/// Drives staged campaigns to the active state.
pub struct CampaignActivator {
    client: Arc<GovernanceClient>,
    settings: ActivatorSettings,
}

impl CampaignActivator {
    pub fn new(client: Arc<GovernanceClient>, settings: ActivatorSettings) -> Self {
        Self { client, settings }
    }

    /// Request activation for one campaign.
    ///
    /// `Ok(None)` means the request was accepted and the campaign needs
    /// polling; `Ok(Some(outcome))` is terminal. Authentication failure is
    /// fatal to the pipeline.
    async fn activate(&self, campaign: &Campaign) -> Result<Option<ActivationOutcome>, ApiError> {
        match self.client.activate_campaign(&campaign.id).await {
            Ok(ActivationAck::AlreadyActive) => {
                info!("Campaign {} is already active", campaign.name);
                Ok(Some(ActivationOutcome::AlreadyActive))
            }
            Ok(ActivationAck::Accepted) => {
                info!("Activation accepted for campaign {}", campaign.name);
                Ok(None)
            }
            Err(e @ ApiError::Auth(_)) => Err(e),
            Err(e) => {
                error!("Abandoning campaign {}: {}", campaign.name, e);
                Ok(Some(match e.status() {
                    Some(status) => ActivationOutcome::Failed { status },
                    None => ActivationOutcome::Indeterminate {
                        reason: e.to_string(),
                    },
                }))
            }
        }
    }

    /// Poll one campaign until it reports ACTIVE, the poll budget runs out,
    /// or a status fetch fails.
    ///
    /// A fetch failure ends the loop without success: the remote state is
    /// unknown and the campaign is no longer tracked (fail-open, not an
    /// error).
    pub async fn await_active(&self, campaign_id: &str) -> ActivationOutcome {
        let mut last_status: Option<CampaignStatus> = None;

        for attempt in 1..=self.settings.max_poll_attempts {
            match self.client.get_campaign(campaign_id).await {
                Ok(campaign) => {
                    if campaign.status == CampaignStatus::Active {
                        info!("Campaign {} is active", campaign_id);
                        return ActivationOutcome::Activated { polls: attempt };
                    }
                    info!(
                        "Campaign {} not active yet (status {}), next check in {:?}",
                        campaign_id, campaign.status, self.settings.poll_interval
                    );
                    last_status = Some(campaign.status);
                }
                Err(e) => {
                    warn!("Status poll for campaign {} failed: {}", campaign_id, e);
                    return ActivationOutcome::Indeterminate {
                        reason: e.to_string(),
                    };
                }
            }

            sleep(self.settings.poll_interval).await;
        }

        let last_status = last_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string());
        warn!(
            "Campaign {} still not active after {} polls (last status {})",
            campaign_id, self.settings.max_poll_attempts, last_status
        );
        ActivationOutcome::TimedOut { last_status }
    }

    /// Activate every campaign in the batch, then confirm each in sequence.
    ///
    /// All activation requests are issued before the first poll, giving the
    /// remote side as long as possible to make progress; polls then run one
    /// campaign at a time, in activation order.
    pub async fn activate_all(
        &self,
        campaigns: &[Campaign],
    ) -> Result<ActivationReport, ApiError> {
        let mut records = Vec::with_capacity(campaigns.len());
        let mut pending: Vec<&Campaign> = Vec::new();

        for campaign in campaigns {
            match self.activate(campaign).await? {
                Some(outcome) => records.push(ActivationRecord {
                    campaign_id: campaign.id.clone(),
                    name: campaign.name.clone(),
                    outcome,
                }),
                None => pending.push(campaign),
            }
        }

        for campaign in pending {
            let outcome = self.await_active(&campaign.id).await;
            records.push(ActivationRecord {
                campaign_id: campaign.id.clone(),
                name: campaign.name.clone(),
                outcome,
            });
        }

        Ok(ActivationReport { records })
    }

    /// Full pipeline: find staged campaigns and drive them to active.
    pub async fn run(&self) -> Result<ActivationReport, ApiError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("activate_campaigns", %run_id);

        async {
            let campaigns = self.client.list_campaigns().await?;
            let staged: Vec<Campaign> = campaigns
                .into_iter()
                .filter(|c| c.status == CampaignStatus::Staged)
                .collect();
            info!("Found {} staged campaigns", staged.len());

            self.activate_all(&staged).await
        }
        .instrument(span)
        .await
    }
}
