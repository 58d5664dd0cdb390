use anyhow::Result;
use deploy_core::GasConfig;
use ethers::prelude::*;
use ethers::utils::parse_units;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct GasManager {
    config: GasConfig,
    provider: Arc<Provider<Http>>,
}

impl GasManager {
    pub fn new(provider: Arc<Provider<Http>>, config: GasConfig) -> Self {
        Self { config, provider }
    }

    pub fn limit_deploy(&self) -> u64 {
        self.config.limit_deploy()
    }

    pub async fn get_fees(&self) -> Result<(U256, U256)> {
        // 1. Get Base Fee from latest block for calculation
        let block = self
            .provider
            .get_block(BlockNumber::Latest)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to get latest block"))?;

        let base_fee = block
            .base_fee_per_gas
            .ok_or_else(|| anyhow::anyhow!("Base fee missing in block"))?;

        // 2. Try to estimate fees from oracle (checks history aka "last block")
        let (mut est_max, mut est_prio) = match self.provider.estimate_eip1559_fees(None).await {
            Ok(fees) => fees,
            Err(_) => {
                // Fallback to config if estimation fails
                let prio = parse_units(self.config.priority_gwei(), "gwei")?.into();
                (base_fee + prio, prio)
            }
        };

        // 3. Clamp values to User Config
        let config_max: U256 = parse_units(self.config.max_gwei(), "gwei")?.into();

        // Enforce Max Cap
        if est_max > config_max {
            est_max = config_max;
        }

        // Priority above max is a logic error
        if est_prio > est_max {
            est_prio = est_max;
        }

        Ok((est_max, est_prio))
    }
}
