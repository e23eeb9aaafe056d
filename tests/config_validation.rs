use dominion::{ConfigError, DominationConfig, LogLevel};

#[test]
fn defaults_are_valid() {
    let config = DominationConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.stay_of_execution_hours, 24);
    assert!(!config.dry_run);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn parses_a_full_blob() {
    let config = DominationConfig::from_json(
        r#"{"stay_of_execution_hours": 48, "dry_run": true, "log_level": "debug"}"#,
    )
    .unwrap();
    assert_eq!(config.stay_of_execution_hours, 48);
    assert_eq!(config.stay_of_execution_ms(), 48 * 3_600_000);
    assert!(config.dry_run);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn empty_blob_falls_back_to_defaults() {
    let config = DominationConfig::from_json("{}").unwrap();
    assert_eq!(config.stay_of_execution_hours, 24);
}

#[test]
fn rejects_unknown_knobs() {
    let err = DominationConfig::from_json(r#"{"retention_days": 3}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn rejects_out_of_range_stay_of_execution() {
    let err = DominationConfig::from_json(r#"{"stay_of_execution_hours": 0}"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::StayOfExecutionOutOfRange { value: 0, .. }
    ));
}

#[test]
fn rejects_malformed_json() {
    assert!(matches!(
        DominationConfig::from_json("not json"),
        Err(ConfigError::Parse(_))
    ));
}
