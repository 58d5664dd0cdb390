//! ethers-rs implementations of the deployment collaborators.

use crate::contracts::{self, Artifact};
use crate::utils::gas::GasManager;
use async_trait::async_trait;
use deploy_core::{
    BlueprintRegistry, ContractFactory, DeployError, DeploymentRecord, PendingDeployment,
};
use ethers::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type DeployClient = SignerMiddleware<Provider<Http>, LocalWallet>;

const POLL_INTERVAL: Duration = Duration::from_secs(3);
const POLL_LIMIT: u32 = 120;

/// Resolves embedded artifacts into deployable factories.
pub struct EvmBlueprintRegistry {
    client: Arc<DeployClient>,
    gas_manager: Arc<GasManager>,
}

impl EvmBlueprintRegistry {
    pub fn new(client: Arc<DeployClient>, gas_manager: Arc<GasManager>) -> Self {
        Self {
            client,
            gas_manager,
        }
    }
}

impl BlueprintRegistry for EvmBlueprintRegistry {
    fn resolve(&self, name: &str) -> Result<Box<dyn ContractFactory>, DeployError> {
        let artifact = contracts::artifact(name).ok_or_else(|| DeployError::BlueprintNotFound {
            name: name.to_string(),
        })?;
        Ok(Box::new(EvmContractFactory {
            artifact,
            client: self.client.clone(),
            gas_manager: self.gas_manager.clone(),
        }))
    }
}

pub struct EvmContractFactory {
    artifact: Artifact,
    client: Arc<DeployClient>,
    gas_manager: Arc<GasManager>,
}

#[async_trait]
impl ContractFactory for EvmContractFactory {
    async fn deploy(
        &self,
        constructor_args: &[String],
    ) -> Result<Box<dyn PendingDeployment>, DeployError> {
        if !constructor_args.is_empty() {
            return Err(DeployError::Submission {
                reason: format!("{} takes no constructor arguments", self.artifact.name),
            });
        }

        let bytecode = ethers::utils::hex::decode(self.artifact.bytecode).map_err(|e| {
            DeployError::Submission {
                reason: format!("invalid creation bytecode: {e}"),
            }
        })?;

        let from = self.client.signer().address();
        let balance = self
            .client
            .get_balance(from, None)
            .await
            .map_err(|e| DeployError::Submission {
                reason: e.to_string(),
            })?;
        let (max_fee, priority_fee) =
            self.gas_manager
                .get_fees()
                .await
                .map_err(|e| DeployError::Submission {
                    reason: e.to_string(),
                })?;

        let gas_limit = U256::from(self.gas_manager.limit_deploy());
        let required = gas_limit * max_fee;
        if balance < required {
            return Err(DeployError::Submission {
                reason: format!(
                    "Insufficient funds: have {} wei, want {} wei",
                    balance, required
                ),
            });
        }

        let tx = Eip1559TransactionRequest::new()
            .from(from)
            .data(Bytes::from(bytecode))
            .gas(gas_limit)
            .max_fee_per_gas(max_fee)
            .max_priority_fee_per_gas(priority_fee);

        let pending_tx =
            self.client
                .send_transaction(tx, None)
                .await
                .map_err(|e| DeployError::Submission {
                    reason: e.to_string(),
                })?;
        let tx_hash = *pending_tx;
        debug!("Deployment transaction {:?} broadcast", tx_hash);

        Ok(Box::new(EvmPendingDeployment {
            client: self.client.clone(),
            tx_hash,
        }))
    }
}

/// A broadcast deployment transaction, identified by hash. Confirmation
/// waits poll the receipt and then the chain head; both are bounded so a
/// dropped transaction surfaces as an error instead of hanging forever.
pub struct EvmPendingDeployment {
    client: Arc<DeployClient>,
    tx_hash: TxHash,
}

#[async_trait]
impl PendingDeployment for EvmPendingDeployment {
    async fn confirmed(&self, depth: u64) -> Result<DeploymentRecord, DeployError> {
        let receipt = self.wait_for_receipt(depth).await?;

        if receipt.status != Some(U64::from(1)) {
            return Err(DeployError::Confirmation {
                depth,
                reason: format!("transaction {:?} reverted", self.tx_hash),
            });
        }
        let included_in = receipt
            .block_number
            .ok_or_else(|| DeployError::Confirmation {
                depth,
                reason: "receipt missing block number".to_string(),
            })?;
        if depth > 1 {
            self.wait_for_depth(included_in, depth).await?;
        }

        let contract_address =
            receipt
                .contract_address
                .ok_or_else(|| DeployError::Confirmation {
                    depth,
                    reason: "No contract address in receipt".to_string(),
                })?;

        Ok(DeploymentRecord {
            address: format!("{:?}", contract_address),
            deployer: format!("{:?}", receipt.from),
            tx_hash: format!("{:?}", self.tx_hash),
        })
    }
}

impl EvmPendingDeployment {
    async fn wait_for_receipt(&self, depth: u64) -> Result<TransactionReceipt, DeployError> {
        for _ in 0..POLL_LIMIT {
            match self.client.get_transaction_receipt(self.tx_hash).await {
                Ok(Some(receipt)) => return Ok(receipt),
                Ok(None) => tokio::time::sleep(POLL_INTERVAL).await,
                Err(e) => {
                    return Err(DeployError::Confirmation {
                        depth,
                        reason: e.to_string(),
                    })
                }
            }
        }
        Err(DeployError::Confirmation {
            depth,
            reason: format!(
                "transaction {:?} dropped or not mined within the poll budget",
                self.tx_hash
            ),
        })
    }

    async fn wait_for_depth(&self, included_in: U64, depth: u64) -> Result<(), DeployError> {
        let target = included_in + U64::from(depth - 1);
        for _ in 0..POLL_LIMIT {
            let current =
                self.client
                    .get_block_number()
                    .await
                    .map_err(|e| DeployError::Confirmation {
                        depth,
                        reason: e.to_string(),
                    })?;
            if current >= target {
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
        Err(DeployError::Confirmation {
            depth,
            reason: format!("depth {} not reached within the poll budget", depth),
        })
    }
}
