//! Governance API authentication.
//!
//! Provides the OAuth2 client-credentials exchange, durable token caching,
//! and authenticated-header construction used by every network-facing
//! component.

pub mod cache;
pub mod oauth;
pub mod token_manager;

pub use cache::{CredentialCache, FileCredentialCache, InMemoryCredentialCache, StoredToken};
pub use oauth::{build_http_client, OAuth2Client, TokenResponse};
pub use token_manager::TokenManager;
