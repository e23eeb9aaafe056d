use dominion::app::run_with_args;
use dominion::store::SourceRow;
use dominion::{ArchiveSnapshot, Pocket, PublicationId, SourcePublication, SourceReleaseId};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dominion-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample_snapshot() -> ArchiveSnapshot {
    let mut snapshot = ArchiveSnapshot {
        archive: "primary".to_string(),
        ..ArchiveSnapshot::default()
    };
    snapshot
        .architectures
        .insert("breezy".to_string(), vec!["i386".to_string()]);
    for (id, release, version, created_ms) in [(1, 100, "1.0", 10), (2, 101, "1.1", 20)] {
        snapshot.sources.push(SourceRow {
            series: "breezy".to_string(),
            pocket: Pocket::Release,
            publication: SourcePublication::new(
                PublicationId(id),
                SourceReleaseId(release),
                "foo",
                version.parse().unwrap(),
                created_ms,
            ),
        });
    }
    snapshot
}

#[test]
fn dominates_a_snapshot_end_to_end() {
    let dir = scratch_dir("e2e");
    let config_path = dir.join("config.json");
    let snapshot_path = dir.join("snapshot.json");
    fs::write(&config_path, r#"{"log_level": "debug"}"#).unwrap();
    fs::write(
        &snapshot_path,
        serde_json::to_string(&sample_snapshot()).unwrap(),
    )
    .unwrap();

    let args: Vec<String> = vec![
        config_path.to_string_lossy().into_owned(),
        snapshot_path.to_string_lossy().into_owned(),
        "breezy".to_string(),
        "release".to_string(),
    ];
    let mut output = Vec::new();
    run_with_args(&args, &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("superseding source publication 1"));
    assert!(output.contains("\"sources_superseded\":1"));
}

#[test]
fn wrong_argument_count_reports_usage() {
    let mut output = Vec::new();
    let err = run_with_args(&["only-one".to_string()], &mut output).unwrap_err();
    assert!(err.to_string().contains("usage"));
}

#[test]
fn unknown_pocket_is_rejected() {
    let dir = scratch_dir("pocket");
    let config_path = dir.join("config.json");
    let snapshot_path = dir.join("snapshot.json");
    fs::write(&config_path, "{}").unwrap();
    fs::write(
        &snapshot_path,
        serde_json::to_string(&sample_snapshot()).unwrap(),
    )
    .unwrap();

    let args: Vec<String> = vec![
        config_path.to_string_lossy().into_owned(),
        snapshot_path.to_string_lossy().into_owned(),
        "breezy".to_string(),
        "attic".to_string(),
    ];
    let mut output = Vec::new();
    let err = run_with_args(&args, &mut output).unwrap_err();
    assert!(err.to_string().contains("unknown pocket"));
}
