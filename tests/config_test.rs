use rask_log_bridge::app::{BridgeConfig, ConfigError, LogFormat, LogLevel};
use serial_test::serial;
use std::io::Write;
use std::{env, time::Duration};
use tempfile::NamedTempFile;

// Helper function to clean all environment variables before and after tests
fn clean_all_env_vars() {
    let env_vars = [
        "BRIDGE_QUEUE_CAPACITY",
        "BRIDGE_WORKERS",
        "BRIDGE_DISPATCH_TIMEOUT_SECS",
        "BRIDGE_DRAIN_TIMEOUT_MS",
        "BRIDGE_CONFIG_FILE",
        "BRIDGE_LOG_DIRECTIVES",
        "LOG_LEVEL",
        "LOG_FORMAT",
    ];

    unsafe {
        for var in &env_vars {
            env::remove_var(var);
        }
    }
}

#[test]
#[serial]
fn test_config_from_args() {
    clean_all_env_vars();

    let config = BridgeConfig::from_args([
        "rask-log-bridge",
        "--queue-capacity",
        "512",
        "--workers",
        "2",
        "--dispatch-timeout-secs",
        "10",
        "--drain-timeout-ms",
        "1500",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .unwrap();

    assert_eq!(config.queue_capacity, 512);
    assert_eq!(config.workers, 2);
    assert_eq!(config.dispatch_timeout, Duration::from_secs(10));
    assert_eq!(config.drain_timeout, Duration::from_millis(1500));
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_format, LogFormat::Json);

    let dispatch = config.dispatch_config();
    assert_eq!(dispatch.queue_capacity, 512);
    assert_eq!(dispatch.dispatch_timeout, Duration::from_secs(10));
}

#[test]
#[serial]
fn test_config_defaults_from_empty_args() {
    clean_all_env_vars();

    let config = BridgeConfig::from_args(["rask-log-bridge"]).unwrap();
    assert_eq!(config.queue_capacity, 10_000);
    assert_eq!(config.workers, 4);
    assert_eq!(config.dispatch_timeout, Duration::from_secs(30));
    assert_eq!(config.drain_timeout, Duration::from_millis(4000));
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.log_format, LogFormat::Compact);
}

#[test]
#[serial]
fn test_config_log_directives_from_args() {
    clean_all_env_vars();

    let config = BridgeConfig::from_args([
        "rask-log-bridge",
        "--log-directive",
        "hyper=debug",
        "--log-directive",
        "tower=warn,h2=error",
    ])
    .unwrap();

    assert_eq!(
        config.log_directives,
        vec!["hyper=debug", "tower=warn", "h2=error"]
    );

    let defaults = BridgeConfig::from_args(["rask-log-bridge"]).unwrap();
    assert!(defaults.log_directives.is_empty());
}

#[test]
#[serial]
fn test_config_rejects_zero_workers() {
    clean_all_env_vars();

    let result = BridgeConfig::from_args(["rask-log-bridge", "--workers", "0"]);
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
#[serial]
fn test_config_from_env() {
    clean_all_env_vars();
    unsafe {
        env::set_var("BRIDGE_WORKERS", "8");
        env::set_var("BRIDGE_DISPATCH_TIMEOUT_SECS", "5");
        env::set_var("LOG_LEVEL", "WARN");
        env::set_var("LOG_FORMAT", "json");
        env::set_var("BRIDGE_LOG_DIRECTIVES", "hyper=debug, tower=warn");
    }

    let config = BridgeConfig::from_env().unwrap();
    assert_eq!(config.log_directives, vec!["hyper=debug", "tower=warn"]);
    assert_eq!(config.workers, 8);
    assert_eq!(config.dispatch_timeout, Duration::from_secs(5));
    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.log_format, LogFormat::Json);

    clean_all_env_vars();
}

#[test]
#[serial]
fn test_config_from_env_invalid_value() {
    clean_all_env_vars();
    unsafe {
        env::set_var("BRIDGE_QUEUE_CAPACITY", "lots");
    }

    let result = BridgeConfig::from_env();
    assert!(matches!(result, Err(ConfigError::EnvError(_))));

    clean_all_env_vars();
}

#[test]
#[serial]
fn test_config_from_file() {
    clean_all_env_vars();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
queue_capacity = 256
workers = 3
dispatch_timeout_secs = 2
log_level = "trace"
log_directives = ["hyper=debug"]
"#
    )
    .unwrap();

    let config = BridgeConfig::from_file(file.path()).unwrap();
    assert_eq!(config.queue_capacity, 256);
    assert_eq!(config.workers, 3);
    assert_eq!(config.dispatch_timeout, Duration::from_secs(2));
    assert_eq!(config.log_level, LogLevel::Trace);
    assert_eq!(config.log_directives, vec!["hyper=debug"]);
    // Unspecified keys keep their defaults
    assert_eq!(config.drain_timeout, Duration::from_millis(4000));
    assert_eq!(config.log_format, LogFormat::Compact);
}

#[test]
#[serial]
fn test_config_file_via_args() {
    clean_all_env_vars();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "workers = 6").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let config = BridgeConfig::from_args(["rask-log-bridge", "--config-file", path.as_str()]).unwrap();
    assert_eq!(config.workers, 6);
    assert_eq!(config.config_file.as_deref(), Some(file.path()));
}

#[test]
#[serial]
fn test_config_file_parse_error() {
    clean_all_env_vars();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "workers = \"many\"").unwrap();

    let result = BridgeConfig::from_file(file.path());
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_missing_config_file() {
    let result = BridgeConfig::from_file("/nonexistent/rask-log-bridge.toml");
    assert!(matches!(result, Err(ConfigError::FileError(_))));
}
