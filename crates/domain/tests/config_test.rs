use relay53_domain::config::LogFormat;
use relay53_domain::{CliOverrides, Config, ConfigError};
use std::io::Write;
use std::net::IpAddr;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.server.bind_address, "127.0.0.1");
    assert_eq!(config.server.port, 2053);
    assert_eq!(config.server.max_datagram_size, 512);
    assert!(config.server.concurrent);
    assert!(config.upstream.resolver.is_none());
    assert_eq!(config.upstream.timeout_ms, 5_000);
    assert_eq!(config.upstream.timeout().as_secs(), 5);
    assert!(!config.upstream.parallel_subqueries);
    assert_eq!(config.local_answer.ttl, 60);
    assert_eq!(config.local_answer.rdata(), vec![8, 8, 8, 8]);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Text);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_from_partial_toml_keeps_defaults() {
    let config = Config::from_toml(
        r#"
        [upstream]
        resolver = "1.1.1.1:53"
        "#,
    )
    .unwrap();

    assert_eq!(config.upstream.resolver.as_deref(), Some("1.1.1.1:53"));
    assert_eq!(config.upstream.timeout_ms, 5_000);
    assert_eq!(config.server.port, 2053);
}

#[test]
fn test_config_from_full_toml() {
    let config = Config::from_toml(
        r#"
        [server]
        bind_address = "0.0.0.0"
        port = 5353
        max_datagram_size = 1232
        concurrent = false

        [upstream]
        resolver = "dns.example.net:53"
        timeout_ms = 1500
        parallel_subqueries = true

        [local_answer]
        ttl = 300
        address = "2001:db8::1"

        [logging]
        level = "debug"
        format = "json"
        "#,
    )
    .unwrap();

    assert_eq!(config.server.listen_addr(), "0.0.0.0:5353");
    assert_eq!(config.server.max_datagram_size, 1232);
    assert!(!config.server.concurrent);
    assert_eq!(config.upstream.timeout().as_millis(), 1500);
    assert!(config.upstream.parallel_subqueries);
    assert_eq!(
        config.local_answer.address,
        "2001:db8::1".parse::<IpAddr>().unwrap()
    );
    assert_eq!(config.local_answer.rdata().len(), 16);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_rejects_unknown_log_format() {
    let result = Config::from_toml(
        r#"
        [logging]
        format = "xml"
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_validate_rejects_zero_port() {
    let mut config = Config::default();
    config.server.port = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let mut config = Config::default();
    config.upstream.timeout_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_tiny_datagram_buffer() {
    let mut config = Config::default();
    config.server.max_datagram_size = 11;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_resolver_without_port() {
    let mut config = Config::default();
    config.upstream.resolver = Some("8.8.8.8".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_listen_addr_brackets_ipv6() {
    let mut config = Config::default();
    config.server.bind_address = "::1".to_string();
    assert_eq!(config.server.listen_addr(), "[::1]:2053");
}

#[test]
fn test_load_from_file_applies_cli_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [server]
        port = 6000

        [upstream]
        resolver = "9.9.9.9:53"
        "#
    )
    .unwrap();

    let overrides = CliOverrides {
        port: Some(7000),
        resolver: Some("8.8.4.4:53".to_string()),
        log_level: Some("trace".to_string()),
        sequential: true,
        ..Default::default()
    };

    let config = Config::load(file.path().to_str(), overrides).unwrap();

    assert_eq!(config.server.port, 7000);
    assert_eq!(config.upstream.resolver.as_deref(), Some("8.8.4.4:53"));
    assert_eq!(config.logging.level, "trace");
    assert!(!config.server.concurrent);
}

#[test]
fn test_load_missing_file_fails() {
    let result = Config::load(Some("/nonexistent/relay53.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}
