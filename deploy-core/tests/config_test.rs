use deploy_core::DeployConfig;

fn config(chain_id: u64, verification_key: Option<&str>) -> DeployConfig {
    DeployConfig {
        chain_id,
        target_chain_id: 43114,
        verification_key: verification_key.map(str::to_string),
    }
}

#[test]
fn test_verification_enabled_on_target_chain_with_key() {
    assert!(config(43114, Some("key")).verification_enabled());
}

#[test]
fn test_verification_disabled_off_target_chain() {
    assert!(!config(1, Some("key")).verification_enabled());
    assert!(!config(43113, Some("key")).verification_enabled());
}

#[test]
fn test_verification_disabled_without_key() {
    assert!(!config(43114, None).verification_enabled());
}

#[test]
fn test_verification_disabled_with_empty_key() {
    assert!(!config(43114, Some("")).verification_enabled());
}

#[test]
fn test_config_clone_preserves_fields() {
    let original = config(43114, Some("key"));
    let cloned = original.clone();

    assert_eq!(cloned.chain_id, original.chain_id);
    assert_eq!(cloned.target_chain_id, original.target_chain_id);
    assert_eq!(cloned.verification_key, original.verification_key);
}
