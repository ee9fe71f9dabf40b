use arpscope_domain::{CliOverrides, Config, ConfigError, TimestampSource};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.capture.snaplen, 1600);
    assert!(config.capture.promiscuous);
    assert!(config.capture.interface.is_none());
    assert_eq!(config.capture.timestamp_source, TimestampSource::Wall);
    assert_eq!(config.capture.icmp_max_ttl, 64);
    assert_eq!(config.display.ui_refresh_ms, 1000);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config = Config::from_toml(
        r#"
[capture]
interface = "eth0"
target_cidrs = ["192.168.1.0/24", "10.0.0.0/8"]
timestamp_source = "capture"

[cache]
host_ttl_secs = 60
"#,
    )
    .unwrap();

    assert_eq!(config.capture.interface.as_deref(), Some("eth0"));
    assert_eq!(config.capture.target_cidrs.len(), 2);
    assert_eq!(config.capture.timestamp_source, TimestampSource::Capture);
    assert_eq!(config.capture.arp_timeout_ms, 2000);
    assert_eq!(config.cache.host_ttl_secs, 60);
    assert_eq!(config.cache.expiry_interval_secs, 30);
    assert!(config.display.enabled);
}

#[test]
fn test_invalid_cidr_is_parse_error() {
    let result = Config::from_toml(
        r#"
[capture]
target_cidrs = ["not-a-cidr"]
"#,
    );

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_cli_overrides_win() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[capture]\ninterface = \"eth0\"\n[logging]\nlevel = \"warn\"\n")
        .unwrap();
    file.flush().unwrap();

    let overrides = CliOverrides {
        interface: Some("wlan0".to_string()),
        target_cidrs: Some(vec!["172.16.0.0/12".parse().unwrap()]),
        icmp_max_ttl: Some(30),
        capture_icmp: true,
        no_display: true,
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    let config = Config::load(file.path().to_str(), overrides).unwrap();

    assert_eq!(config.capture.interface.as_deref(), Some("wlan0"));
    assert_eq!(config.capture.target_cidrs.len(), 1);
    assert_eq!(config.capture.icmp_max_ttl, 30);
    assert!(config.capture.capture_icmp);
    assert!(!config.display.enabled);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_missing_file_is_read_error() {
    let result = Config::load(Some("/nonexistent/arpscope.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_validate_rejects_zero_values() {
    let mut config = Config::default();
    config.capture.icmp_max_ttl = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

    let mut config = Config::default();
    config.cache.expiry_interval_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.capture.interface = Some("  ".to_string());
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.cache.max_events = Some(0);
    assert!(config.validate().is_err());
}
