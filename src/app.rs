use crate::clock::SystemClock;
use crate::config::DominationConfig;
use crate::dominate::Dominator;
use crate::model::Pocket;
use crate::store::{ArchiveSnapshot, MemoryStore};
use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::io::Write;

/// Batch entrypoint: load configuration and an archive snapshot, dominate
/// the requested scope, print the run log and summary counters.
pub fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut stdout = std::io::stdout();
    run_with_args(&args, &mut stdout)
}

/// Runs the batch job against explicit arguments and an output sink.
pub fn run_with_args(args: &[String], out: &mut dyn Write) -> Result<()> {
    let [config_path, snapshot_path, series, pocket] = args else {
        bail!("usage: dominion <config.json> <snapshot.json> <series> <pocket>");
    };
    let config = DominationConfig::from_json(
        &fs::read_to_string(config_path)
            .with_context(|| format!("reading configuration {config_path}"))?,
    )?;
    let snapshot: ArchiveSnapshot = serde_json::from_str(
        &fs::read_to_string(snapshot_path)
            .with_context(|| format!("reading snapshot {snapshot_path}"))?,
    )
    .context("parsing archive snapshot")?;
    let pocket: Pocket = pocket.parse().map_err(|message: String| anyhow!(message))?;

    let mut store = MemoryStore::from_snapshot(snapshot);
    let mut dominator = Dominator::new(&mut store, &config, SystemClock);
    let stats = dominator.judge_and_dominate(series, pocket)?;

    for file in dominator.logger().files() {
        for line in file.lines() {
            writeln!(out, "{line}")?;
        }
    }
    writeln!(out, "{}", serde_json::to_string(&stats)?)?;
    Ok(())
}
