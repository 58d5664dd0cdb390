use anyhow::Result;
use config::{Config, File};
use deploy_core::{DeployConfig, GasConfig, GasConfigToml};
use serde::Deserialize;

pub const AVALANCHE_MAINNET_CHAIN_ID: u64 = 43114;

#[derive(Debug, Deserialize, Clone)]
pub struct AvalancheConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    /// Chain on which explorer verification is attempted.
    #[serde(default = "default_target_chain_id")]
    pub target_chain_id: u64,
    #[serde(default = "default_blueprint")]
    pub blueprint: String,
    #[serde(default = "default_verify_api_url")]
    pub verify_api_url: String,
    pub gas: Option<GasConfigToml>,
}

fn default_target_chain_id() -> u64 {
    AVALANCHE_MAINNET_CHAIN_ID
}

fn default_blueprint() -> String {
    crate::contracts::CROWDFUNDING.to_string()
}

fn default_verify_api_url() -> String {
    crate::verify::SNOWTRACE_API_URL.to_string()
}

impl AvalancheConfig {
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path))
            .build()?;

        settings.try_deserialize().map_err(|e| anyhow::anyhow!(e))
    }

    /// Assemble the run context. The verification key is read by `main` and
    /// handed in here so nothing below the boundary touches the environment.
    pub fn to_deploy_config(&self, verification_key: Option<String>) -> DeployConfig {
        DeployConfig {
            chain_id: self.chain_id,
            target_chain_id: self.target_chain_id,
            verification_key: verification_key.filter(|key| !key.is_empty()),
        }
    }

    pub fn gas_config(&self) -> GasConfig {
        self.gas.clone().map(GasConfig::from).unwrap_or_default()
    }
}
