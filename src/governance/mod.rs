//! Certification campaign management against the governance API.
//!
//! This module provides:
//! - Paged role discovery with best-effort partial results
//! - Deterministic grouping of roles by area and owner
//! - Rate-limited bulk campaign creation
//! - The polling state machine that drives staged campaigns to active

pub mod activator;
pub mod client;
pub mod creator;
pub mod grouping;
pub mod models;
pub mod report;

pub use activator::{ActivatorSettings, CampaignActivator};
pub use client::{ActivationAck, CampaignCreated, GovernanceClient, RoleFetch};
pub use creator::{build_payload, CampaignCreator, CreatorSettings};
pub use grouping::{derive_area, group_roles, RoleGroup, RoleGroupKey, RoleRef};
pub use models::{
    Campaign, CampaignPayload, CampaignStatus, IdentityRef, OwnerRef, Role, RoleCompositionInfo,
};
pub use report::{
    ActivationOutcome, ActivationRecord, ActivationReport, CreationOutcome, CreationReport,
};
