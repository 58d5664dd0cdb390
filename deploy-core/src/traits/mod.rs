use crate::error::DeployError;
use async_trait::async_trait;

/// Observable attributes of a confirmed deployment.
#[derive(Debug, Clone)]
pub struct DeploymentRecord {
    /// Address the contract was created at.
    pub address: String,
    /// Sender of the deployment transaction.
    pub deployer: String,
    /// Hash of the deployment transaction.
    pub tx_hash: String,
}

/// Lookup of compiled contract blueprints by name.
///
/// Resolution is local; it must fail before any network traffic when the
/// name is unknown.
pub trait BlueprintRegistry: Send + Sync {
    fn resolve(&self, name: &str) -> Result<Box<dyn ContractFactory>, DeployError>;
}

/// Produces a deployment transaction for one resolved blueprint.
#[async_trait]
pub trait ContractFactory: Send + Sync {
    /// Broadcast the deployment with the given constructor arguments.
    async fn deploy(
        &self,
        constructor_args: &[String],
    ) -> Result<Box<dyn PendingDeployment>, DeployError>;
}

/// An in-flight deployment transaction.
#[async_trait]
pub trait PendingDeployment: Send + Sync {
    /// Suspend until the creating transaction is buried under `depth`
    /// blocks. May be called again with a deeper depth once confirmed.
    async fn confirmed(&self, depth: u64) -> Result<DeploymentRecord, DeployError>;
}

/// Block-explorer source verification.
#[async_trait]
pub trait VerificationClient: Send + Sync {
    async fn verify(
        &self,
        address: &str,
        constructor_args: &[String],
    ) -> Result<(), DeployError>;
}
