//! 配置加载测试

use std::fs;

use tempfile::TempDir;
use ttlinker::config::StaticConfig;
use ttlinker::storage::DEFAULT_SWEEP_INTERVAL;

fn path_str(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().into_owned()
}

#[test]
fn test_load_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = StaticConfig::load(&path_str(&dir, "absent.toml")).unwrap();

    assert_eq!(config.links.default_ttl, 120);
    assert_eq!(config.links.alias_length, 6);
    assert_eq!(config.links.history_capacity, 10);
    assert_eq!(config.sweeper.interval_ms, 1000);
    assert_eq!(
        config.sweeper.interval_ms,
        DEFAULT_SWEEP_INTERVAL.as_millis() as u64
    );
}

#[test]
fn test_load_partial_toml() {
    let dir = TempDir::new().unwrap();
    let path = path_str(&dir, "config.toml");
    fs::write(
        &path,
        r#"
[server]
port = 9090

[links]
base_url = "https://sho.rt/"
default_ttl = 300

[sweeper]
interval_ms = 250
"#,
    )
    .unwrap();

    let config = StaticConfig::load(&path).unwrap();
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.links.base_url, "https://sho.rt/");
    assert_eq!(config.links.default_ttl, 300);
    assert_eq!(config.links.alias_length, 6);
    assert_eq!(config.sweeper.interval_ms, 250);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_rejects_wrong_types() {
    let dir = TempDir::new().unwrap();
    let path = path_str(&dir, "config.toml");
    fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();

    assert!(StaticConfig::load(&path).is_err());
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = path_str(&dir, "nested/out.toml");

    let mut config = StaticConfig::default();
    config.server.cpu_count = 2;
    config.links.default_ttl = 42;
    config.logging.file = Some("logs/ttlinker.log".to_string());
    config.save_to_file(&path).unwrap();

    let loaded = StaticConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_sample_config_parses() {
    let sample = StaticConfig::generate_sample_config();
    assert!(sample.contains("[links]"));
    assert!(sample.contains("default_ttl"));

    let parsed: StaticConfig = toml::from_str(&sample).unwrap();
    assert_eq!(parsed.links, StaticConfig::default().links);
}
