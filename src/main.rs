//! rolecert: certification campaign automation CLI.

#![deny(clippy::all)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rolecert::auth::{build_http_client, FileCredentialCache, OAuth2Client, TokenManager};
use rolecert::config::Config;
use rolecert::governance::{
    ActivatorSettings, CampaignActivator, CampaignCreator, CreatorSettings, GovernanceClient,
};

#[derive(Parser)]
#[command(name = "rolecert")]
#[command(version, about = "Bulk role certification campaign management", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover roles and create one campaign per (area, owner) group
    Create,
    /// Activate staged campaigns and poll each until active
    Activate,
    /// Create, then activate
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (if present) before anything else
    if let Err(e) = dotenvy::dotenv() {
        // .env file is optional - only log if it's not a "file not found" error
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    init_logging();

    info!("Starting rolecert v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(c) => {
            info!("Configuration loaded successfully");
            c
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Configuration error: {}", e);
            eprintln!("\nPlease set the following environment variables:");
            eprintln!("  BASE_URL=<governance API base URL>");
            eprintln!("  CLIENT_ID=<OAuth client identifier>");
            eprintln!("  CLIENT_SECRET=<OAuth client secret>");
            eprintln!("  OWNER=<remediator display name>");
            eprintln!("  OWNER_ID=<remediator identity id>");
            eprintln!("  DEADLINE=<campaign deadline, YYYY-MM-DD>");
            std::process::exit(1);
        }
    };

    let oauth_client = OAuth2Client::new(&config).context("Failed to create OAuth client")?;
    let cache = Arc::new(FileCredentialCache::new(config.token_cache_path()));
    let tokens = Arc::new(TokenManager::new(oauth_client, cache));

    let http_client =
        build_http_client(&config.oauth.trust_anchor).context("Failed to create HTTP client")?;
    let client = Arc::new(GovernanceClient::new(
        http_client,
        config.api.base_url.clone(),
        tokens,
    ));

    match cli.command {
        Commands::Create => create(&config, client).await?,
        Commands::Activate => activate(&config, client).await?,
        Commands::Run => {
            create(&config, Arc::clone(&client)).await?;
            activate(&config, client).await?;
        }
    }

    Ok(())
}

/// Discovery → creation pipeline.
async fn create(config: &Config, client: Arc<GovernanceClient>) -> Result<()> {
    let creator = CampaignCreator::new(client, CreatorSettings::from_config(config));
    let report = creator
        .run()
        .await
        .context("Campaign creation pipeline failed")?;
    println!("{}", report.summary());
    Ok(())
}

/// Activation → confirmation pipeline.
async fn activate(config: &Config, client: Arc<GovernanceClient>) -> Result<()> {
    let activator = CampaignActivator::new(client, ActivatorSettings::from_config(config));
    let report = activator
        .run()
        .await
        .context("Campaign activation pipeline failed")?;
    println!("{}", report.summary());
    Ok(())
}

/// Initialize tracing/logging.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .init();
}
