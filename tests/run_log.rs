use dominion::{
    DominationConfig, Dominator, JsonLineLogger, LogLevel, LogRotationPolicy, ManualClock,
    MemoryStore, Pocket, PublicationId, SourcePublication, SourceReleaseId,
};
use serde_json::Value;

#[test]
fn json_logger_serializes_entries() {
    let policy = LogRotationPolicy {
        max_bytes: 256,
        max_files: 2,
    };
    let mut logger = JsonLineLogger::new(policy);
    logger
        .log(100, LogLevel::Info, "dominion::test", "foo", "first entry")
        .unwrap();
    let lines: Vec<_> = logger
        .files()
        .flat_map(|file| file.lines().iter())
        .collect();
    assert_eq!(lines.len(), 1);
    let parsed: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(parsed["level"], "INFO");
    assert_eq!(parsed["module"], "dominion::test");
    assert_eq!(parsed["package"], "foo");
    assert_eq!(parsed["ts"], 100);
}

#[test]
fn loglevel_override_filters_entries() {
    let policy = LogRotationPolicy {
        max_bytes: 512,
        max_files: 1,
    };
    let mut logger = JsonLineLogger::new(policy);
    logger.set_level(LogLevel::Warn);
    logger
        .log(0, LogLevel::Info, "dominion", "foo", "info suppressed")
        .unwrap();
    logger
        .log(1, LogLevel::Warn, "dominion", "foo", "warn visible")
        .unwrap();
    let lines: Vec<_> = logger
        .files()
        .flat_map(|file| file.lines().iter())
        .collect();
    assert_eq!(lines.len(), 1);
    let parsed: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(parsed["level"], "WARN");
    assert_eq!(parsed["message"], "warn visible");
}

#[test]
fn rotation_discards_old_segments() {
    let policy = LogRotationPolicy {
        max_bytes: 64,
        max_files: 2,
    };
    let mut logger = JsonLineLogger::new(policy);
    for idx in 0..10 {
        logger
            .log(idx, LogLevel::Info, "module", "foo", "payload")
            .unwrap();
    }
    // Every record overflows the tiny budget, so each lands in its own
    // segment and only max_files + the active segment survive.
    let lines: Vec<_> = logger
        .files()
        .flat_map(|file| file.lines().iter())
        .collect();
    assert_eq!(lines.len(), 3);
    let parsed: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(parsed["ts"], 7);
}

#[test]
fn judge_logs_run_progress_and_decisions() {
    let mut store = MemoryStore::new("primary");
    store.add_series("breezy", &["i386"]);
    store.insert_source(
        "breezy",
        Pocket::Release,
        SourcePublication::new(
            PublicationId(1),
            SourceReleaseId(100),
            "foo",
            "1.0".parse().unwrap(),
            10,
        ),
    );
    store.insert_source(
        "breezy",
        Pocket::Release,
        SourcePublication::new(
            PublicationId(2),
            SourceReleaseId(101),
            "foo",
            "1.1".parse().unwrap(),
            20,
        ),
    );

    let config = DominationConfig::from_json(r#"{"log_level": "debug"}"#).unwrap();
    let mut dominator = Dominator::new(&mut store, &config, ManualClock::at(42));
    dominator
        .judge_and_dominate("breezy", Pocket::Release)
        .unwrap();

    let lines: Vec<String> = dominator
        .logger()
        .files()
        .flat_map(|file| file.lines().iter().cloned())
        .collect();
    assert!(lines.iter().any(|line| line.contains("pass 1")));
    assert!(lines.iter().any(|line| line.contains("pass 2")));
    assert!(lines
        .iter()
        .any(|line| line.contains("superseding source publication 1")));
    let first: Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(first["package"], "-");
    assert_eq!(first["ts"], 42);
}
