use avalanche_project::config::AvalancheConfig;
use avalanche_project::contracts;
use avalanche_project::deploy::EvmBlueprintRegistry;
use avalanche_project::utils::gas::GasManager;
use avalanche_project::verify::SnowtraceClient;

use anyhow::{Context, Result};
use clap::Parser;
use deploy_core::{setup_logger, ConfigError, DeployError, DeployRunner, VerificationStatus};
use dotenv::dotenv;
use ethers::prelude::*;
use std::env;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "chains/avalanche/config.toml")]
    config: String,
}

#[tokio::main]
async fn main() {
    let log_guard = setup_logger();
    dotenv().ok();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Deployment failed: {:#}", e);
        // Flush the file layer before exiting
        drop(log_guard);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    info!("Loading config from: {}", args.config);
    let config = AvalancheConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    info!("Configuration loaded for chain ID: {}", config.chain_id);

    let key = env::var("PRIVATE_KEY").map_err(|_| ConfigError::MissingField {
        field: "PRIVATE_KEY".to_string(),
    })?;
    let wallet = key
        .parse::<LocalWallet>()
        .map_err(|_| ConfigError::InvalidValue {
            field: "PRIVATE_KEY".to_string(),
            reason: "expected a hex-encoded private key".to_string(),
        })?
        .with_chain_id(config.chain_id);

    let provider = Provider::<Http>::try_from(config.rpc_url.as_str()).map_err(|_| {
        ConfigError::InvalidRpcUrl {
            url: config.rpc_url.clone(),
        }
    })?;
    let client = Arc::new(SignerMiddleware::new(provider.clone(), wallet));

    let gas_manager = Arc::new(GasManager::new(Arc::new(provider), config.gas_config()));
    let registry = EvmBlueprintRegistry::new(client, gas_manager);

    // The verifier resubmits the artifact's source bundle, so it is wired
    // with the same blueprint the run deploys.
    let artifact = contracts::artifact(&config.blueprint).ok_or_else(|| {
        DeployError::BlueprintNotFound {
            name: config.blueprint.clone(),
        }
    })?;
    let deploy_config = config.to_deploy_config(env::var("SNOWTRACE_KEY").ok());
    let verifier = SnowtraceClient::new(
        config.verify_api_url.clone(),
        deploy_config.verification_key.clone().unwrap_or_default(),
        artifact,
    );

    let runner = DeployRunner::new(&registry, &verifier, deploy_config);
    let outcome = runner.run(&config.blueprint).await?;

    let verification = match &outcome.verification {
        VerificationStatus::Verified => "verified",
        VerificationStatus::Skipped => "verification skipped",
        VerificationStatus::Failed { .. } => "not verified",
    };
    info!(
        "Run complete: {} at {} ({}), tx {}",
        outcome.blueprint, outcome.address, verification, outcome.tx_hash
    );

    Ok(())
}
