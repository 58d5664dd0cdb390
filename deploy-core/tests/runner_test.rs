use async_trait::async_trait;
use deploy_core::{
    BlueprintRegistry, ContractFactory, DeployConfig, DeployError, DeployRunner,
    DeploymentRecord, PendingDeployment, VerificationClient, VerificationStatus,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const ADDRESS: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
const DEPLOYER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
const TX_HASH: &str = "0x88e96d4537bea4d9c05d12549907b32561d3bf31f45aae734cdc119f13406cb6";

#[derive(Default)]
struct CallLog {
    deploys: AtomicUsize,
    deploy_arg_counts: Mutex<Vec<usize>>,
    confirm_depths: Mutex<Vec<u64>>,
    verifies: AtomicUsize,
    verify_calls: Mutex<Vec<(String, usize)>>,
}

struct MockRegistry {
    log: Arc<CallLog>,
    known: &'static str,
    confirm_error: Option<String>,
}

impl MockRegistry {
    fn new(log: Arc<CallLog>) -> Self {
        Self {
            log,
            known: "Crowdfunding",
            confirm_error: None,
        }
    }

    fn failing_confirmation(log: Arc<CallLog>, reason: &str) -> Self {
        Self {
            log,
            known: "Crowdfunding",
            confirm_error: Some(reason.to_string()),
        }
    }
}

impl BlueprintRegistry for MockRegistry {
    fn resolve(&self, name: &str) -> Result<Box<dyn ContractFactory>, DeployError> {
        if name != self.known {
            return Err(DeployError::BlueprintNotFound {
                name: name.to_string(),
            });
        }
        Ok(Box::new(MockFactory {
            log: self.log.clone(),
            confirm_error: self.confirm_error.clone(),
        }))
    }
}

struct MockFactory {
    log: Arc<CallLog>,
    confirm_error: Option<String>,
}

#[async_trait]
impl ContractFactory for MockFactory {
    async fn deploy(
        &self,
        constructor_args: &[String],
    ) -> Result<Box<dyn PendingDeployment>, DeployError> {
        self.log.deploys.fetch_add(1, Ordering::SeqCst);
        self.log
            .deploy_arg_counts
            .lock()
            .unwrap()
            .push(constructor_args.len());
        Ok(Box::new(MockPending {
            log: self.log.clone(),
            confirm_error: self.confirm_error.clone(),
        }))
    }
}

struct MockPending {
    log: Arc<CallLog>,
    confirm_error: Option<String>,
}

#[async_trait]
impl PendingDeployment for MockPending {
    async fn confirmed(&self, depth: u64) -> Result<DeploymentRecord, DeployError> {
        self.log.confirm_depths.lock().unwrap().push(depth);
        if let Some(reason) = &self.confirm_error {
            return Err(DeployError::Confirmation {
                depth,
                reason: reason.clone(),
            });
        }
        Ok(DeploymentRecord {
            address: ADDRESS.to_string(),
            deployer: DEPLOYER.to_string(),
            tx_hash: TX_HASH.to_string(),
        })
    }
}

struct MockVerifier {
    log: Arc<CallLog>,
    fail_with: Option<String>,
}

impl MockVerifier {
    fn new(log: Arc<CallLog>) -> Self {
        Self {
            log,
            fail_with: None,
        }
    }

    fn failing(log: Arc<CallLog>, reason: &str) -> Self {
        Self {
            log,
            fail_with: Some(reason.to_string()),
        }
    }
}

#[async_trait]
impl VerificationClient for MockVerifier {
    async fn verify(
        &self,
        address: &str,
        constructor_args: &[String],
    ) -> Result<(), DeployError> {
        self.log.verifies.fetch_add(1, Ordering::SeqCst);
        self.log
            .verify_calls
            .lock()
            .unwrap()
            .push((address.to_string(), constructor_args.len()));
        match &self.fail_with {
            Some(reason) => Err(DeployError::Verification {
                address: address.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn config_for(chain_id: u64, key: Option<&str>) -> DeployConfig {
    DeployConfig {
        chain_id,
        target_chain_id: 43114,
        verification_key: key.map(str::to_string),
    }
}

#[tokio::test]
async fn test_happy_path_single_deploy_no_args() {
    let log = Arc::new(CallLog::default());
    let registry = MockRegistry::new(log.clone());
    let verifier = MockVerifier::new(log.clone());
    let runner = DeployRunner::new(&registry, &verifier, config_for(1, None));

    let outcome = runner.run("Crowdfunding").await.unwrap();

    assert_eq!(log.deploys.load(Ordering::SeqCst), 1);
    assert_eq!(*log.deploy_arg_counts.lock().unwrap(), vec![0]);
    assert_eq!(*log.confirm_depths.lock().unwrap(), vec![1]);
    assert_eq!(outcome.address, ADDRESS);
    assert_eq!(outcome.deployer, DEPLOYER);
    assert_eq!(outcome.tx_hash, TX_HASH);
    assert_eq!(outcome.verification, VerificationStatus::Skipped);
}

#[tokio::test]
async fn test_verification_runs_on_target_chain_with_key() {
    let log = Arc::new(CallLog::default());
    let registry = MockRegistry::new(log.clone());
    let verifier = MockVerifier::new(log.clone());
    let runner = DeployRunner::new(&registry, &verifier, config_for(43114, Some("snowtrace-key")));

    let outcome = runner.run("Crowdfunding").await.unwrap();

    assert_eq!(*log.confirm_depths.lock().unwrap(), vec![1, 6]);
    assert_eq!(log.verifies.load(Ordering::SeqCst), 1);
    assert_eq!(
        *log.verify_calls.lock().unwrap(),
        vec![(ADDRESS.to_string(), 0)]
    );
    assert_eq!(outcome.verification, VerificationStatus::Verified);
}

#[tokio::test]
async fn test_verification_skipped_on_other_chain() {
    let log = Arc::new(CallLog::default());
    let registry = MockRegistry::new(log.clone());
    let verifier = MockVerifier::new(log.clone());
    let runner = DeployRunner::new(&registry, &verifier, config_for(1, Some("snowtrace-key")));

    let outcome = runner.run("Crowdfunding").await.unwrap();

    assert_eq!(log.verifies.load(Ordering::SeqCst), 0);
    assert_eq!(*log.confirm_depths.lock().unwrap(), vec![1]);
    assert_eq!(outcome.verification, VerificationStatus::Skipped);
}

#[tokio::test]
async fn test_verification_skipped_without_key() {
    for key in [None, Some("")] {
        let log = Arc::new(CallLog::default());
        let registry = MockRegistry::new(log.clone());
        let verifier = MockVerifier::new(log.clone());
        let runner = DeployRunner::new(&registry, &verifier, config_for(43114, key));

        let outcome = runner.run("Crowdfunding").await.unwrap();

        assert_eq!(log.verifies.load(Ordering::SeqCst), 0);
        assert_eq!(outcome.verification, VerificationStatus::Skipped);
    }
}

#[tokio::test]
async fn test_unknown_blueprint_fails_before_any_network_call() {
    let log = Arc::new(CallLog::default());
    let registry = MockRegistry::new(log.clone());
    let verifier = MockVerifier::new(log.clone());
    let runner = DeployRunner::new(&registry, &verifier, config_for(43114, Some("snowtrace-key")));

    let err = runner.run("Voting").await.unwrap_err();

    assert!(matches!(err, DeployError::BlueprintNotFound { .. }));
    assert!(err.is_pre_submission());
    assert!(err.to_string().contains("Voting"));
    assert_eq!(log.deploys.load(Ordering::SeqCst), 0);
    assert!(log.confirm_depths.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_confirmation_failure_stops_the_run() {
    let log = Arc::new(CallLog::default());
    let registry = MockRegistry::failing_confirmation(log.clone(), "transaction dropped");
    let verifier = MockVerifier::new(log.clone());
    let runner = DeployRunner::new(&registry, &verifier, config_for(43114, Some("snowtrace-key")));

    let err = runner.run("Crowdfunding").await.unwrap_err();

    assert!(matches!(err, DeployError::Confirmation { .. }));
    assert!(err.to_string().contains("transaction dropped"));
    assert!(!err.is_pre_submission());
    // The report and verify steps are never reached
    assert_eq!(log.verifies.load(Ordering::SeqCst), 0);
    assert_eq!(*log.confirm_depths.lock().unwrap(), vec![1]);
}

#[tokio::test]
async fn test_verification_failure_reports_deployed_but_unverified() {
    let log = Arc::new(CallLog::default());
    let registry = MockRegistry::new(log.clone());
    let verifier = MockVerifier::failing(log.clone(), "already verified");
    let runner = DeployRunner::new(&registry, &verifier, config_for(43114, Some("snowtrace-key")));

    let outcome = runner.run("Crowdfunding").await.unwrap();

    assert_eq!(outcome.address, ADDRESS);
    match outcome.verification {
        VerificationStatus::Failed { reason } => {
            assert!(reason.contains("already verified"));
        }
        other => panic!("Expected Failed status, got {:?}", other),
    }
}
