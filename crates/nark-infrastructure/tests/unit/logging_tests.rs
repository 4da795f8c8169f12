//! Logging Tests

use nark_infrastructure::config::LoggingConfig;
use nark_infrastructure::logging::{LogHandle, build_env_filter, init_logging, parse_log_level};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("critical").unwrap(), Level::ERROR);
    assert!(parse_log_level("loud").is_err());
}

#[test]
fn test_env_filter_uses_parsed_level() {
    let filter_for = |level: &str| {
        let config = LoggingConfig {
            level: level.to_string(),
            ..LoggingConfig::default()
        };
        build_env_filter(&config).unwrap().max_level_hint()
    };

    assert_eq!(filter_for("critical"), Some(LevelFilter::ERROR));
    assert_eq!(filter_for("warning"), Some(LevelFilter::WARN));
    assert_eq!(filter_for("DEBUG"), Some(LevelFilter::DEBUG));
}

#[test]
fn test_env_filter_rejects_bad_level() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };

    assert!(build_env_filter(&config).is_err());
}

#[test]
fn test_init_logging_rejects_bad_level() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };

    assert!(init_logging(&config).is_err());
}

#[test]
fn test_init_logging_only_once() {
    let config = LoggingConfig::default();

    let first = init_logging(&config);
    let second = init_logging(&config);
    assert!(first.is_ok());
    assert!(second.is_err());
}

#[test]
fn test_log_handle_name() {
    let handle = LogHandle::new("printer");
    assert_eq!(handle.name(), "printer");
    handle.debug("debug message");
    handle.info("info message");
    handle.warn("warn message");
    handle.error("error message");

    assert_eq!(handle.in_scope(|| 4), 4);
}

#[test]
fn test_disabled_handle() {
    let handle = LogHandle::disabled();

    assert!(handle.span().is_disabled());
    handle.info("dropped");
}
