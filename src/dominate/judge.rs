use crate::clock::Clock;
use crate::config::DominationConfig;
use crate::dominate::arch_cache::ArchSpecificPublicationsCache;
use crate::dominate::error::DominationError;
use crate::dominate::generalization::sort_publications;
use crate::dominate::liveness::{
    find_live_binary_versions_pass1, find_live_binary_versions_pass2, find_live_source_versions,
};
use crate::dominate::plan::{plan_package_domination, DominationPlan};
use crate::model::{
    BinaryPublication, BinaryReleaseId, PackageKey, Pocket, PublicationId, SourcePublication,
    SourceReleaseId,
};
use crate::observability::logging::{JsonLineLogger, LogLevel, LogRotationPolicy};
use crate::store::PublicationStore;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const MODULE: &str = "dominion::judge";

/// Package field used for run-level log entries.
const RUN_SCOPE: &str = "-";

/// Counters accumulated over a domination run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DominationStats {
    pub source_groups_examined: u64,
    pub binary_groups_examined: u64,
    pub publications_kept: u64,
    pub sources_superseded: u64,
    pub sources_deleted: u64,
    pub binaries_superseded: u64,
    pub binaries_deleted: u64,
    pub reprieve_lookups: u64,
    pub reprieve_memo_hits: u64,
}

/// The two cooperating binary passes. The first settles arch-specific
/// publications per architecture; the second revisits arch-independent
/// ones once the first pass has recorded which siblings survived.
enum BinaryPass {
    Initial,
    Reprieve,
}

impl BinaryPass {
    fn number(&self) -> u8 {
        match self {
            BinaryPass::Initial => 1,
            BinaryPass::Reprieve => 2,
        }
    }
}

/// Batch driver for one archive's domination runs.
///
/// Owns the run log and counters; borrows the storage collaborator and the
/// run configuration. Single-threaded by design: one process dominates one
/// (series, pocket) scope at a time, and the caller is expected to wrap
/// each [`Dominator::judge_and_dominate`] call in one storage transaction.
pub struct Dominator<'a, C: Clock> {
    store: &'a mut dyn PublicationStore,
    config: &'a DominationConfig,
    clock: C,
    logger: JsonLineLogger,
    stats: DominationStats,
}

impl<'a, C: Clock> Dominator<'a, C> {
    /// Creates a driver over a store, with the log level taken from the
    /// run configuration.
    pub fn new(
        store: &'a mut dyn PublicationStore,
        config: &'a DominationConfig,
        clock: C,
    ) -> Self {
        let mut logger = JsonLineLogger::new(LogRotationPolicy::default());
        logger.set_level(config.log_level);
        Self {
            store,
            config,
            clock,
            logger,
            stats: DominationStats::default(),
        }
    }

    /// The run log accumulated so far.
    pub fn logger(&self) -> &JsonLineLogger {
        &self.logger
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &DominationStats {
        &self.stats
    }

    /// Performs the full domination calculation for one (series, pocket):
    /// binaries first (two passes), then sources. Re-running on an
    /// already-dominated scope is a no-op; dominated rows leave Published
    /// and stop forming groups.
    pub fn judge_and_dominate(
        &mut self,
        series: &str,
        pocket: Pocket,
    ) -> Result<DominationStats, DominationError> {
        self.dominate_binaries(series, pocket)?;
        self.dominate_sources(series, pocket)?;
        let message = format!("domination for {series}/{pocket} finished");
        self.log(LogLevel::Info, RUN_SCOPE, &message)?;
        Ok(self.stats.clone())
    }

    /// Dominates every source package group in the scope.
    pub fn dominate_sources(
        &mut self,
        series: &str,
        pocket: Pocket,
    ) -> Result<(), DominationError> {
        let message = format!("dominating source publications for {series}/{pocket}");
        self.log(LogLevel::Info, RUN_SCOPE, &message)?;
        let groups = self.store.source_groups_for_domination(series, pocket)?;
        for (key, publications) in groups {
            self.dominate_source_group(&key, &publications)?;
        }
        Ok(())
    }

    /// Dominates every binary package group in the scope, across both
    /// passes and all architectures, sharing one reprieve cache.
    pub fn dominate_binaries(
        &mut self,
        series: &str,
        pocket: Pocket,
    ) -> Result<(), DominationError> {
        let mut cache = ArchSpecificPublicationsCache::new();
        for pass in [BinaryPass::Initial, BinaryPass::Reprieve] {
            for architecture in self.store.architectures(series)? {
                let message = format!(
                    "dominating binary publications for {series}/{pocket} ({architecture}), pass {}",
                    pass.number()
                );
                self.log(LogLevel::Info, RUN_SCOPE, &message)?;
                let groups = self
                    .store
                    .binary_groups_for_domination(series, pocket, &architecture)?;
                for (key, publications) in groups {
                    self.dominate_binary_group(series, pocket, &pass, &mut cache, &key, &publications)?;
                }
            }
        }
        self.stats.reprieve_lookups += cache.lookup_total();
        self.stats.reprieve_memo_hits += cache.memo_hits();
        Ok(())
    }

    /// Dominates one source package against an externally supplied live
    /// set (e.g. the versions still referenced by a published index).
    /// Publications newer than every live version are deleted: those
    /// builds raced ahead of what was actually published.
    pub fn dominate_source_versions(
        &mut self,
        series: &str,
        pocket: Pocket,
        package: &str,
        live_versions: &[String],
    ) -> Result<(), DominationError> {
        let publications = self
            .store
            .source_publications_for_package(series, pocket, package)?;
        let mut by_channel: BTreeMap<Option<String>, Vec<SourcePublication>> = BTreeMap::new();
        for publication in publications {
            by_channel
                .entry(publication.channel.clone())
                .or_default()
                .push(publication);
        }
        for (channel, group) in by_channel {
            let key = match channel {
                Some(channel) => PackageKey::new(package).with_channel(channel),
                None => PackageKey::new(package),
            };
            let mut sorted: Vec<&SourcePublication> = group.iter().collect();
            sort_publications(&mut sorted);
            let plan = plan_package_domination(&sorted, live_versions);
            self.apply_source_plan(&key, &plan)?;
        }
        Ok(())
    }

    fn dominate_source_group(
        &mut self,
        key: &PackageKey,
        publications: &[SourcePublication],
    ) -> Result<(), DominationError> {
        if publications.is_empty() {
            return Err(empty_group(key));
        }
        self.stats.source_groups_examined += 1;
        let mut sorted: Vec<&SourcePublication> = publications.iter().collect();
        sort_publications(&mut sorted);
        let newest_first: Vec<&SourcePublication> = sorted.iter().rev().copied().collect();
        let live_versions = find_live_source_versions(&newest_first);
        let message = format!("live version(s): {}", live_versions.join(", "));
        self.log(LogLevel::Debug, key.name(), &message)?;
        let plan = plan_package_domination(&sorted, &live_versions);
        self.apply_source_plan(key, &plan)
    }

    fn dominate_binary_group(
        &mut self,
        series: &str,
        pocket: Pocket,
        pass: &BinaryPass,
        cache: &mut ArchSpecificPublicationsCache,
        key: &PackageKey,
        publications: &[BinaryPublication],
    ) -> Result<(), DominationError> {
        if publications.is_empty() {
            return Err(empty_group(key));
        }
        self.stats.binary_groups_examined += 1;
        let mut sorted: Vec<&BinaryPublication> = publications.iter().collect();
        sort_publications(&mut sorted);
        let newest_first: Vec<&BinaryPublication> = sorted.iter().rev().copied().collect();
        let live_versions = match pass {
            BinaryPass::Initial => find_live_binary_versions_pass1(&newest_first),
            BinaryPass::Reprieve => {
                find_live_binary_versions_pass2(&newest_first, series, pocket, cache, &*self.store)?
            }
        };
        let message = format!("live version(s): {}", live_versions.join(", "));
        self.log(LogLevel::Debug, key.name(), &message)?;
        let plan = plan_package_domination(&sorted, &live_versions);
        self.apply_binary_plan(series, pocket, key, publications, &plan)
    }

    fn apply_source_plan(
        &mut self,
        key: &PackageKey,
        plan: &DominationPlan<SourceReleaseId>,
    ) -> Result<(), DominationError> {
        self.stats.publications_kept += plan.keep.len() as u64;
        let scheduled = self.scheduled_deletion_stamp();
        for (id, dominant) in &plan.supersede {
            if !self.config.dry_run {
                self.store.mark_source_superseded(*id, *dominant, scheduled)?;
            }
            self.stats.sources_superseded += 1;
            let message = format!("superseding source publication {id} with release {dominant}");
            self.log(LogLevel::Debug, key.name(), &message)?;
        }
        for id in &plan.delete {
            if !self.config.dry_run {
                self.store.mark_source_deleted(*id, scheduled)?;
            }
            self.stats.sources_deleted += 1;
            let message = format!("deleting source publication {id}; no successor");
            self.log(LogLevel::Debug, key.name(), &message)?;
        }
        Ok(())
    }

    fn apply_binary_plan(
        &mut self,
        series: &str,
        pocket: Pocket,
        key: &PackageKey,
        group: &[BinaryPublication],
        plan: &DominationPlan<BinaryReleaseId>,
    ) -> Result<(), DominationError> {
        let by_id: HashMap<PublicationId, &BinaryPublication> =
            group.iter().map(|publication| (publication.id, publication)).collect();
        let by_release: HashMap<BinaryReleaseId, &BinaryPublication> =
            group.iter().map(|publication| (publication.release, publication)).collect();
        self.stats.publications_kept += plan.keep.len() as u64;
        let scheduled = self.scheduled_deletion_stamp();
        for (id, dominant) in &plan.supersede {
            if let Some(dominant_publication) = by_release.get(dominant) {
                if dominant_publication.format.is_debug_symbols() {
                    return Err(DominationError::DebugSymbolDominant {
                        dominant: *dominant,
                        dominated: *id,
                    });
                }
            }
            let Some(&publication) = by_id.get(id) else {
                continue;
            };
            self.supersede_binary(series, pocket, key, publication, *dominant, scheduled)?;
        }
        for id in &plan.delete {
            let Some(&publication) = by_id.get(id) else {
                continue;
            };
            self.delete_binary(series, pocket, key, publication, scheduled)?;
        }
        Ok(())
    }

    fn supersede_binary(
        &mut self,
        series: &str,
        pocket: Pocket,
        key: &PackageKey,
        publication: &BinaryPublication,
        dominant: BinaryReleaseId,
        scheduled: u64,
    ) -> Result<(), DominationError> {
        // A dominated row sharing the dominant's release is a duplicate
        // override collapsing onto its newest copy; the release itself
        // stays live, so only this one row goes down.
        let duplicate_collapse = dominant == publication.release;
        // Otherwise arch-all releases go down on every architecture at
        // once; a mixed state would leave some architectures resolving
        // against a dead binary.
        let targets = if publication.arch_independent && !duplicate_collapse {
            self.store
                .published_binaries_of_release(series, pocket, publication.release)?
        } else {
            vec![publication.id]
        };
        for target in targets {
            if !self.config.dry_run {
                self.store
                    .mark_binary_superseded(target, dominant, scheduled)?;
            }
            self.stats.binaries_superseded += 1;
            let message = format!("superseding binary publication {target} with release {dominant}");
            self.log(LogLevel::Debug, key.name(), &message)?;
        }
        if duplicate_collapse {
            return Ok(());
        }
        if let Some(companion) = publication.debug_companion {
            for target in self
                .store
                .published_binaries_of_release(series, pocket, companion)?
            {
                if !self.config.dry_run {
                    self.store
                        .mark_binary_superseded(target, dominant, scheduled)?;
                }
                self.stats.binaries_superseded += 1;
                let message =
                    format!("superseding debug companion publication {target} with release {dominant}");
                self.log(LogLevel::Debug, key.name(), &message)?;
            }
        }
        Ok(())
    }

    fn delete_binary(
        &mut self,
        series: &str,
        pocket: Pocket,
        key: &PackageKey,
        publication: &BinaryPublication,
        scheduled: u64,
    ) -> Result<(), DominationError> {
        let targets = if publication.arch_independent {
            self.store
                .published_binaries_of_release(series, pocket, publication.release)?
        } else {
            vec![publication.id]
        };
        for target in targets {
            if !self.config.dry_run {
                self.store.mark_binary_deleted(target, scheduled)?;
            }
            self.stats.binaries_deleted += 1;
            let message = format!("deleting binary publication {target}; no successor");
            self.log(LogLevel::Debug, key.name(), &message)?;
        }
        if let Some(companion) = publication.debug_companion {
            for target in self
                .store
                .published_binaries_of_release(series, pocket, companion)?
            {
                if !self.config.dry_run {
                    self.store.mark_binary_deleted(target, scheduled)?;
                }
                self.stats.binaries_deleted += 1;
                let message = format!("deleting debug companion publication {target}; no successor");
                self.log(LogLevel::Debug, key.name(), &message)?;
            }
        }
        Ok(())
    }

    fn scheduled_deletion_stamp(&mut self) -> u64 {
        self.clock
            .now_ms()
            .saturating_add(self.config.stay_of_execution_ms())
    }

    fn log(&mut self, level: LogLevel, package: &str, message: &str) -> Result<(), DominationError> {
        let now = self.clock.now_ms();
        self.logger.log(now, level, MODULE, package, message)?;
        Ok(())
    }
}

fn empty_group(key: &PackageKey) -> DominationError {
    DominationError::EmptyPackageGroup {
        package: key.name().to_string(),
        channel: key.channel().map(str::to_string),
    }
}
