//! Snowtrace (Etherscan-compatible) source verification client.
//!
//! Verification is a two-step API: a `verifysourcecode` submission returns a
//! GUID, and `checkverifystatus` is polled until the explorer finishes
//! compiling the submitted source.

use crate::contracts::Artifact;
use async_trait::async_trait;
use deploy_core::{DeployError, VerificationClient};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

pub const SNOWTRACE_API_URL: &str = "https://api.snowtrace.io/api";

const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(5);
const STATUS_POLL_LIMIT: u32 = 12;

/// Response envelope shared by all Etherscan-compatible endpoints.
#[derive(Debug, Deserialize)]
pub struct ExplorerResponse {
    pub status: String,
    pub message: String,
    pub result: String,
}

impl ExplorerResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }
}

pub struct SnowtraceClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    artifact: Artifact,
}

impl SnowtraceClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        artifact: Artifact,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            artifact,
        }
    }

    fn error(&self, address: &str, reason: impl Into<String>) -> DeployError {
        DeployError::Verification {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    async fn submit(&self, address: &str, constructor_args: &str) -> Result<String, DeployError> {
        let form = [
            ("module", "contract"),
            ("action", "verifysourcecode"),
            ("apikey", self.api_key.as_str()),
            ("contractaddress", address),
            ("sourceCode", self.artifact.source),
            ("codeformat", "solidity-single-file"),
            ("contractname", self.artifact.name),
            ("compilerversion", self.artifact.compiler_version),
            ("optimizationUsed", "0"),
            // The API expects this exact misspelling
            ("constructorArguements", constructor_args),
        ];

        let response = self
            .http
            .post(&self.api_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| self.error(address, e.to_string()))?;
        let body: ExplorerResponse = response
            .json()
            .await
            .map_err(|e| self.error(address, format!("invalid explorer response: {e}")))?;

        if !body.is_ok() {
            return Err(self.error(address, format!("{}: {}", body.message, body.result)));
        }
        Ok(body.result)
    }

    async fn poll_status(&self, address: &str, guid: &str) -> Result<(), DeployError> {
        for _ in 0..STATUS_POLL_LIMIT {
            tokio::time::sleep(STATUS_POLL_INTERVAL).await;

            let response = self
                .http
                .get(&self.api_url)
                .query(&[
                    ("module", "contract"),
                    ("action", "checkverifystatus"),
                    ("apikey", self.api_key.as_str()),
                    ("guid", guid),
                ])
                .send()
                .await
                .map_err(|e| self.error(address, e.to_string()))?;
            let body: ExplorerResponse = response
                .json()
                .await
                .map_err(|e| self.error(address, format!("invalid explorer response: {e}")))?;

            if body.is_ok() {
                return Ok(());
            }
            if body.result.contains("Pending") {
                debug!("Verification of {} still pending", address);
                continue;
            }
            return Err(self.error(address, format!("{}: {}", body.message, body.result)));
        }
        Err(self.error(address, "verification still pending after poll budget"))
    }
}

#[async_trait]
impl VerificationClient for SnowtraceClient {
    async fn verify(
        &self,
        address: &str,
        constructor_args: &[String],
    ) -> Result<(), DeployError> {
        // ABI-encoded hex fragments, concatenated; empty list encodes to ""
        let encoded_args = constructor_args.concat();

        info!("Submitting source verification for {}", address);
        let guid = self.submit(address, &encoded_args).await?;
        debug!("Verification submitted, guid {}", guid);
        self.poll_status(address, &guid).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explorer_response_ok() {
        let body: ExplorerResponse = serde_json::from_str(
            r#"{"status":"1","message":"OK","result":"guid-1234"}"#,
        )
        .unwrap();
        assert!(body.is_ok());
        assert_eq!(body.result, "guid-1234");
    }

    #[test]
    fn test_explorer_response_rejection() {
        let body: ExplorerResponse = serde_json::from_str(
            r#"{"status":"0","message":"NOTOK","result":"Contract source code already verified"}"#,
        )
        .unwrap();
        assert!(!body.is_ok());
        assert!(body.result.contains("already verified"));
    }

    #[test]
    fn test_explorer_response_pending() {
        let body: ExplorerResponse = serde_json::from_str(
            r#"{"status":"0","message":"NOTOK","result":"Pending in queue"}"#,
        )
        .unwrap();
        assert!(!body.is_ok());
        assert!(body.result.contains("Pending"));
    }
}
