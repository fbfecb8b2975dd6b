//! Wire types for the governance API.

use serde::{Deserialize, Serialize};

/// A governed role as returned by `/v3/roles`.
#[derive(Debug, Clone, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Owning identity. Absent or partially populated owners deserialize
    /// fine and are dropped during grouping.
    #[serde(default)]
    pub owner: Option<OwnerRef>,
}

/// Owning-identity reference attached to a role.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerRef {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

/// A certification campaign as returned by `/v3/campaigns`.
#[derive(Debug, Clone, Deserialize)]
pub struct Campaign {
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub status: CampaignStatus,
}

/// Campaign lifecycle status.
///
/// The remote system owns this state machine; values it defines beyond the
/// known set are preserved verbatim instead of rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignStatus {
    Staged,
    Pending,
    Active,
    Completed,
    Other(String),
}

impl CampaignStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Staged => "STAGED",
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for CampaignStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "STAGED" => Self::Staged,
            "PENDING" => Self::Pending,
            "ACTIVE" => Self::Active,
            "COMPLETED" => Self::Completed,
            _ => Self::Other(raw),
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CampaignStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(String::deserialize(deserializer)?.into())
    }
}

impl Serialize for CampaignStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Identity reference used in campaign payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRef {
    #[serde(rename = "type")]
    pub ref_type: String,
    pub id: String,
    pub name: String,
}

impl IdentityRef {
    pub fn identity(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ref_type: "IDENTITY".to_string(),
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Creation payload for a role-composition campaign.
///
/// Field names follow the remote API exactly; see the serde renames.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPayload {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub campaign_type: &'static str,
    pub email_notification_enabled: bool,
    pub deadline: String,
    pub role_composition_campaign_info: RoleCompositionInfo,
    pub mandatory_comment_requirement: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCompositionInfo {
    pub remediator_ref: IdentityRef,
    pub reviewer_id: String,
    pub reviewer: IdentityRef,
    pub role_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_status_roundtrip() {
        for (raw, status) in [
            ("STAGED", CampaignStatus::Staged),
            ("PENDING", CampaignStatus::Pending),
            ("ACTIVE", CampaignStatus::Active),
            ("COMPLETED", CampaignStatus::Completed),
        ] {
            assert_eq!(CampaignStatus::from(raw.to_string()), status);
            assert_eq!(status.as_str(), raw);
        }
    }

    #[test]
    fn test_campaign_status_preserves_unknown_values() {
        let status = CampaignStatus::from("CANCELING".to_string());
        assert_eq!(status, CampaignStatus::Other("CANCELING".to_string()));
        assert_eq!(status.to_string(), "CANCELING");
    }

    #[test]
    fn test_role_tolerates_null_owner() {
        let role: Role = serde_json::from_str(r#"{"id":"r1","name":"Finance - Analyst","owner":null}"#).unwrap();
        assert!(role.owner.is_none());

        let role: Role = serde_json::from_str(r#"{"id":"r2","name":"Ops","owner":{"id":"o1"}}"#).unwrap();
        let owner = role.owner.unwrap();
        assert_eq!(owner.id.as_deref(), Some("o1"));
        assert!(owner.name.is_none());
    }

    #[test]
    fn test_campaign_parsing() {
        let campaign: Campaign =
            serde_json::from_str(r#"{"id":"c1","name":"Finance 2026","status":"STAGED"}"#).unwrap();
        assert_eq!(campaign.status, CampaignStatus::Staged);
    }

    #[test]
    fn test_payload_serializes_with_api_field_names() {
        let payload = CampaignPayload {
            name: "Finance Role Certification's for A 2026".into(),
            description: "Certification campaign for roles in Finance owned by A. Roles: Analyst".into(),
            campaign_type: "ROLE_COMPOSITION",
            email_notification_enabled: false,
            deadline: "2026-12-31".into(),
            role_composition_campaign_info: RoleCompositionInfo {
                remediator_ref: IdentityRef::identity("admin-1", "Admin"),
                reviewer_id: "o1".into(),
                reviewer: IdentityRef::identity("o1", "A"),
                role_ids: vec!["r1".into()],
            },
            mandatory_comment_requirement: "NO_DECISIONS",
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "ROLE_COMPOSITION");
        assert_eq!(value["emailNotificationEnabled"], false);
        assert_eq!(value["mandatoryCommentRequirement"], "NO_DECISIONS");
        assert_eq!(
            value["roleCompositionCampaignInfo"]["remediatorRef"]["type"],
            "IDENTITY"
        );
        assert_eq!(value["roleCompositionCampaignInfo"]["reviewerId"], "o1");
        assert_eq!(
            value["roleCompositionCampaignInfo"]["roleIds"],
            serde_json::json!(["r1"])
        );
    }
}
