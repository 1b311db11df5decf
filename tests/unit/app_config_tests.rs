/*!
 * Tests for configuration loading and validation.
 */

use std::io::Write;

use nyayasetu::app_config::{Config, LogLevel};

#[test]
fn test_default_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.pipeline.score_threshold, 0.1);
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_fromFile_withPartialConfig_shouldFillDefaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{ "server": { "port": 9000 }, "log_level": "debug" }"#)
        .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.pipeline.score_threshold, 0.1);
}

#[test]
fn test_fromFile_withInvalidJson_shouldFail() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"not json").unwrap();
    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_fromFileOrDefault_withMissingFile_shouldUseDefaults() {
    let config = Config::from_file_or_default("/nonexistent/conf.json").unwrap();
    assert_eq!(config.server.port, 8000);
}

#[test]
fn test_validate_withBadEndpoint_shouldFail() {
    let mut config = Config::default();
    config.detector.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    config = Config::default();
    config.classifier.endpoint = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withThresholdOutOfRange_shouldFail() {
    let mut config = Config::default();
    config.pipeline.score_threshold = 1.5;
    assert!(config.validate().is_err());

    config.pipeline.score_threshold = -0.1;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withZeroRequestTimeout_shouldFail() {
    let mut config = Config::default();
    config.server.request_timeout_secs = 0;
    assert!(config.validate().is_err());
}
