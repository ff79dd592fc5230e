// Config loading and validation tests

use ifstate_check::config::AppConfig;
use std::time::Duration;

const VALID_CONFIG: &str = r#"
[snmp]
port = 1161
request_timeout_ms = 500
retries = 2
deadline_secs = 30

[filter]
prefixes = ["xe-", "et-", "ae"]
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.snmp.port, 1161);
    assert_eq!(config.snmp.request_timeout_ms, 500);
    assert_eq!(config.snmp.retries, 2);
    assert_eq!(config.snmp.deadline_secs, 30);
    assert_eq!(config.filter.prefixes, vec!["xe-", "et-", "ae"]);
}

#[test]
fn test_config_defaults_when_empty() {
    let config = AppConfig::load_from_str("").expect("empty config");
    assert_eq!(config.snmp.port, 161);
    assert_eq!(config.snmp.request_timeout_ms, 1000);
    assert_eq!(config.snmp.retries, 5);
    assert_eq!(config.snmp.deadline_secs, 90);
    assert!(config.interface_filter().accepts("qnode1:xe-0/0/0"));
}

#[test]
fn test_config_partial_section_keeps_other_defaults() {
    let config = AppConfig::load_from_str("[snmp]\nretries = 0\n").expect("partial");
    assert_eq!(config.snmp.retries, 0);
    assert_eq!(config.snmp.port, 161);
    assert_eq!(config.snmp.deadline_secs, 90);
}

#[test]
fn test_config_snmp_settings() {
    let settings = AppConfig::load_from_str(VALID_CONFIG).unwrap().snmp_settings();
    assert_eq!(settings.request_timeout, Duration::from_millis(500));
    assert_eq!(settings.retries, 2);
    assert_eq!(settings.deadline, Duration::from_secs(30));
}

#[test]
fn test_config_interface_filter_uses_prefixes() {
    let filter = AppConfig::load_from_str(VALID_CONFIG).unwrap().interface_filter();
    assert!(filter.accepts("et-0/0/0"));
    assert!(!filter.accepts("ge-0/0/0"));
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 1161", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("snmp.port"));
}

#[test]
fn test_config_validation_rejects_request_timeout_zero() {
    let bad = VALID_CONFIG.replace("request_timeout_ms = 500", "request_timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("request_timeout_ms"));
}

#[test]
fn test_config_validation_rejects_deadline_zero() {
    let bad = VALID_CONFIG.replace("deadline_secs = 30", "deadline_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("deadline_secs"));
}

#[test]
fn test_config_validation_rejects_empty_prefix_list() {
    let bad = VALID_CONFIG.replace(r#"prefixes = ["xe-", "et-", "ae"]"#, "prefixes = []");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("filter.prefixes"));
}

#[test]
fn test_config_validation_rejects_empty_prefix() {
    let bad = VALID_CONFIG.replace(r#"prefixes = ["xe-", "et-", "ae"]"#, r#"prefixes = ["xe-", ""]"#);
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("empty prefix"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_explicit_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("ifstate.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    let config = AppConfig::load(Some(path.as_path())).expect("load from path");
    assert_eq!(config.snmp.port, 1161);
}

#[test]
fn test_config_load_missing_explicit_path_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = AppConfig::load(Some(path.as_path())).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load(None);
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.snmp.port, 1161);
    assert_eq!(config.snmp.retries, 2);
}
