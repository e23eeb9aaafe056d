use crate::model::{BinaryPublication, Pocket, SourceReleaseId};
use crate::store::{PublicationStore, StoreError};
use std::collections::HashMap;

/// Memoization key for the reprieve existence question: does this source
/// release still have a Published arch-specific binary in this scope?
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReprieveKey {
    source_release: SourceReleaseId,
    series: String,
    pocket: Pocket,
    channel: Option<String>,
}

/// Per-run cache for arch-specific existence queries.
///
/// Scoped to exactly one `judge_and_dominate` invocation: construct it,
/// pass it through the second binary pass, drop it. Entries are computed
/// lazily at first consultation and never invalidated afterwards, so every
/// arch-independent publication sharing a key shares one store query and
/// one answer for the rest of the run.
#[derive(Debug, Default)]
pub struct ArchSpecificPublicationsCache {
    entries: HashMap<ReprieveKey, bool>,
    lookup_total: u64,
    memo_hits: u64,
}

impl ArchSpecificPublicationsCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the memoization key for one arch-independent publication.
    pub fn key_for(series: &str, pocket: Pocket, publication: &BinaryPublication) -> ReprieveKey {
        ReprieveKey {
            source_release: publication.source_release,
            series: series.to_string(),
            pocket,
            channel: publication.channel.clone(),
        }
    }

    /// Answers the reprieve question for `publication`, consulting the
    /// store at most once per key.
    pub fn has_arch_specific_publications(
        &mut self,
        series: &str,
        pocket: Pocket,
        publication: &BinaryPublication,
        store: &dyn PublicationStore,
    ) -> Result<bool, StoreError> {
        self.lookup_total += 1;
        let key = Self::key_for(series, pocket, publication);
        if let Some(&answer) = self.entries.get(&key) {
            self.memo_hits += 1;
            return Ok(answer);
        }
        let answer = store.has_published_arch_specific_binaries(
            series,
            pocket,
            publication.channel.as_deref(),
            publication.source_release,
        )?;
        self.entries.insert(key, answer);
        Ok(answer)
    }

    /// Total reprieve questions asked.
    pub fn lookup_total(&self) -> u64 {
        self.lookup_total
    }

    /// Questions answered from memo without touching the store.
    pub fn memo_hits(&self) -> u64 {
        self.memo_hits
    }
}
