//! Bulk role-certification campaign management for identity governance APIs.
//!
//! Two pipelines share one [`auth::TokenManager`]: discovery → creation
//! ([`governance::CampaignCreator`]) fetches every role, groups them by
//! certification area and owner, and creates one campaign per group;
//! activation → confirmation ([`governance::CampaignActivator`]) moves
//! staged campaigns to the active state and polls until each one gets there.

#![deny(clippy::all)]

pub mod auth;
pub mod config;
pub mod error;
pub mod governance;
