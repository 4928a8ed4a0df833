use jargo_core::config::GlobalConfig;

#[test]
fn test_global_config_defaults() {
    let config = GlobalConfig::default();
    assert_eq!(config.network.timeout_secs, 120);
    assert_eq!(config.network.retries, 3);
    assert!(config.repositories.is_empty());
    assert!(config.resolver.graph_file.is_none());
}

#[test]
fn test_global_config_empty_toml_uses_defaults() {
    let config: GlobalConfig = toml::from_str("").unwrap();
    assert_eq!(config.network.retries, 3);
}

#[test]
fn test_global_config_overrides() {
    let config: GlobalConfig = toml::from_str(
        r#"
[repositories]
mirror = "https://mirror.example.com/maven2"

[network]
timeout-secs = 10
retries = 0

[resolver]
graph-file = "build/deps.json"
"#,
    )
    .unwrap();
    assert_eq!(config.network.timeout_secs, 10);
    assert_eq!(config.network.retries, 0);
    assert_eq!(config.resolver.graph_file.as_deref(), Some("build/deps.json"));
    assert_eq!(config.repositories.len(), 1);
}

#[test]
fn test_load_from_missing_file_returns_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let config = GlobalConfig::load_from(&tmp.path().join("config.toml")).unwrap();
    assert_eq!(config.network.timeout_secs, 120);
}

#[test]
fn test_load_from_malformed_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[network\n").unwrap();
    let err = GlobalConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid global config"), "got: {err}");
}
