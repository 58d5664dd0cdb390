use serde::{Deserialize, Serialize};

/// Network context for a single deployment run.
///
/// Assembled once at the process boundary (config file + environment) and
/// passed into the runner, so the runner itself performs no ambient reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Chain the run targets.
    pub chain_id: u64,
    /// Chain on which explorer verification is attempted.
    pub target_chain_id: u64,
    /// Explorer API key. Verification is skipped when absent or empty.
    pub verification_key: Option<String>,
}

impl DeployConfig {
    /// Verification runs only on the target chain and only with a key.
    pub fn verification_enabled(&self) -> bool {
        self.chain_id == self.target_chain_id
            && self
                .verification_key
                .as_deref()
                .is_some_and(|key| !key.is_empty())
    }
}
