//! Generic gas configuration. This module provides configuration only;
//! chain-specific implementations handle the actual fee estimation.

use serde::Deserialize;

/// Fee ceilings and the deployment gas limit.
#[derive(Debug, Clone)]
pub struct GasConfig {
    pub max_gwei: f64,
    pub priority_gwei: f64,
    pub limit_deploy: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            max_gwei: 50.0,
            priority_gwei: 1.5,
            limit_deploy: 1_200_000,
        }
    }
}

impl GasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_fee(mut self, max_gwei: f64) -> Self {
        self.max_gwei = max_gwei;
        self
    }

    pub fn with_priority_fee(mut self, priority_gwei: f64) -> Self {
        self.priority_gwei = priority_gwei;
        self
    }

    pub fn max_gwei(&self) -> f64 {
        self.max_gwei
    }

    pub fn priority_gwei(&self) -> f64 {
        self.priority_gwei
    }

    pub fn limit_deploy(&self) -> u64 {
        self.limit_deploy
    }
}

/// Deserialize helper for GasConfig from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct GasConfigToml {
    pub max_gwei: Option<f64>,
    pub priority_gwei: Option<f64>,
    pub limit_deploy: Option<u64>,
}

impl From<GasConfigToml> for GasConfig {
    fn from(toml: GasConfigToml) -> Self {
        let defaults = GasConfig::default();
        Self {
            max_gwei: toml.max_gwei.unwrap_or(defaults.max_gwei),
            priority_gwei: toml.priority_gwei.unwrap_or(defaults.priority_gwei),
            limit_deploy: toml.limit_deploy.unwrap_or(defaults.limit_deploy),
        }
    }
}
