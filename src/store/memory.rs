use crate::model::{
    BinaryPublication, BinaryReleaseId, PackageKey, Pocket, PublicationId, PublicationStatus,
    SourcePublication, SourceReleaseId,
};
use crate::store::{PublicationStore, StoreError};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;

/// A source publication row bound to its publishing scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRow {
    pub series: String,
    pub pocket: Pocket,
    #[serde(flatten)]
    pub publication: SourcePublication,
}

/// A binary publication row bound to its publishing scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryRow {
    pub series: String,
    pub pocket: Pocket,
    #[serde(flatten)]
    pub publication: BinaryPublication,
}

/// Serialized archive state consumed by the batch driver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveSnapshot {
    pub archive: String,
    /// Series name to enabled architecture tags.
    pub architectures: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub sources: Vec<SourceRow>,
    #[serde(default)]
    pub binaries: Vec<BinaryRow>,
}

/// In-memory [`PublicationStore`] backing the batch driver and the test
/// suites. Counts reprieve existence queries so the one-query-per-key
/// contract of the cache is observable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    archive: String,
    architectures: BTreeMap<String, Vec<String>>,
    sources: Vec<SourceRow>,
    binaries: Vec<BinaryRow>,
    existence_queries: Cell<u64>,
}

impl MemoryStore {
    /// Creates an empty store for one archive.
    pub fn new(archive: impl Into<String>) -> Self {
        Self {
            archive: archive.into(),
            ..Self::default()
        }
    }

    /// Builds a store from a serialized snapshot.
    pub fn from_snapshot(snapshot: ArchiveSnapshot) -> Self {
        Self {
            archive: snapshot.archive,
            architectures: snapshot.architectures,
            sources: snapshot.sources,
            binaries: snapshot.binaries,
            existence_queries: Cell::new(0),
        }
    }

    /// The archive this store holds publications for.
    pub fn archive(&self) -> &str {
        &self.archive
    }

    /// Registers a series and its enabled architectures.
    pub fn add_series(&mut self, series: impl Into<String>, architectures: &[&str]) {
        self.architectures.insert(
            series.into(),
            architectures.iter().map(|a| (*a).to_string()).collect(),
        );
    }

    /// Inserts a source publication into a scope.
    pub fn insert_source(
        &mut self,
        series: impl Into<String>,
        pocket: Pocket,
        publication: SourcePublication,
    ) {
        self.sources.push(SourceRow {
            series: series.into(),
            pocket,
            publication,
        });
    }

    /// Inserts a binary publication into a scope.
    pub fn insert_binary(
        &mut self,
        series: impl Into<String>,
        pocket: Pocket,
        publication: BinaryPublication,
    ) {
        self.binaries.push(BinaryRow {
            series: series.into(),
            pocket,
            publication,
        });
    }

    /// Looks up a source publication by id.
    pub fn source(&self, id: PublicationId) -> Option<&SourcePublication> {
        self.sources
            .iter()
            .map(|row| &row.publication)
            .find(|publication| publication.id == id)
    }

    /// Looks up a binary publication by id.
    pub fn binary(&self, id: PublicationId) -> Option<&BinaryPublication> {
        self.binaries
            .iter()
            .map(|row| &row.publication)
            .find(|publication| publication.id == id)
    }

    /// Number of reprieve existence queries served so far.
    pub fn existence_queries(&self) -> u64 {
        self.existence_queries.get()
    }

    fn source_mut(&mut self, id: PublicationId) -> Result<&mut SourcePublication, StoreError> {
        self.sources
            .iter_mut()
            .map(|row| &mut row.publication)
            .find(|publication| publication.id == id)
            .ok_or(StoreError::PublicationNotFound { id })
    }

    fn binary_mut(&mut self, id: PublicationId) -> Result<&mut BinaryPublication, StoreError> {
        self.binaries
            .iter_mut()
            .map(|row| &mut row.publication)
            .find(|publication| publication.id == id)
            .ok_or(StoreError::PublicationNotFound { id })
    }
}

impl PublicationStore for MemoryStore {
    fn architectures(&self, series: &str) -> Result<Vec<String>, StoreError> {
        self.architectures
            .get(series)
            .cloned()
            .ok_or_else(|| StoreError::UnknownSeries {
                series: series.to_string(),
            })
    }

    fn source_groups_for_domination(
        &self,
        series: &str,
        pocket: Pocket,
    ) -> Result<Vec<(PackageKey, Vec<SourcePublication>)>, StoreError> {
        let mut groups: BTreeMap<PackageKey, Vec<SourcePublication>> = BTreeMap::new();
        for row in &self.sources {
            if row.series == series && row.pocket == pocket && row.publication.status.is_published()
            {
                groups
                    .entry(row.publication.package_key())
                    .or_default()
                    .push(row.publication.clone());
            }
        }
        Ok(groups
            .into_iter()
            .filter(|(_, publications)| publications.len() > 1)
            .collect())
    }

    fn source_publications_for_package(
        &self,
        series: &str,
        pocket: Pocket,
        package: &str,
    ) -> Result<Vec<SourcePublication>, StoreError> {
        Ok(self
            .sources
            .iter()
            .filter(|row| {
                row.series == series
                    && row.pocket == pocket
                    && row.publication.package == package
                    && row.publication.status.is_published()
            })
            .map(|row| row.publication.clone())
            .collect())
    }

    fn binary_groups_for_domination(
        &self,
        series: &str,
        pocket: Pocket,
        architecture: &str,
    ) -> Result<Vec<(PackageKey, Vec<BinaryPublication>)>, StoreError> {
        let mut groups: BTreeMap<PackageKey, Vec<BinaryPublication>> = BTreeMap::new();
        for row in &self.binaries {
            if row.series == series
                && row.pocket == pocket
                && row.publication.architecture == architecture
                && row.publication.status.is_published()
                && !row.publication.format.is_debug_symbols()
            {
                groups
                    .entry(row.publication.package_key())
                    .or_default()
                    .push(row.publication.clone());
            }
        }
        Ok(groups
            .into_iter()
            .filter(|(_, publications)| publications.len() > 1)
            .collect())
    }

    fn has_published_arch_specific_binaries(
        &self,
        series: &str,
        pocket: Pocket,
        channel: Option<&str>,
        source_release: SourceReleaseId,
    ) -> Result<bool, StoreError> {
        self.existence_queries.set(self.existence_queries.get() + 1);
        Ok(self.binaries.iter().any(|row| {
            row.series == series
                && row.pocket == pocket
                && row.publication.channel.as_deref() == channel
                && row.publication.source_release == source_release
                && !row.publication.arch_independent
                && row.publication.status.is_published()
        }))
    }

    fn published_binaries_of_release(
        &self,
        series: &str,
        pocket: Pocket,
        release: BinaryReleaseId,
    ) -> Result<Vec<PublicationId>, StoreError> {
        Ok(self
            .binaries
            .iter()
            .filter(|row| {
                row.series == series
                    && row.pocket == pocket
                    && row.publication.release == release
                    && row.publication.status.is_published()
            })
            .map(|row| row.publication.id)
            .collect())
    }

    fn mark_source_superseded(
        &mut self,
        id: PublicationId,
        dominant: SourceReleaseId,
        scheduled_deletion_ms: u64,
    ) -> Result<(), StoreError> {
        let publication = self.source_mut(id)?;
        publication.status = PublicationStatus::Superseded;
        publication.superseded_by = Some(dominant);
        publication.scheduled_deletion_ms = Some(scheduled_deletion_ms);
        Ok(())
    }

    fn mark_source_deleted(
        &mut self,
        id: PublicationId,
        scheduled_deletion_ms: u64,
    ) -> Result<(), StoreError> {
        let publication = self.source_mut(id)?;
        publication.status = PublicationStatus::Deleted;
        publication.scheduled_deletion_ms = Some(scheduled_deletion_ms);
        Ok(())
    }

    fn mark_binary_superseded(
        &mut self,
        id: PublicationId,
        dominant: BinaryReleaseId,
        scheduled_deletion_ms: u64,
    ) -> Result<(), StoreError> {
        let publication = self.binary_mut(id)?;
        publication.status = PublicationStatus::Superseded;
        publication.superseded_by = Some(dominant);
        publication.scheduled_deletion_ms = Some(scheduled_deletion_ms);
        Ok(())
    }

    fn mark_binary_deleted(
        &mut self,
        id: PublicationId,
        scheduled_deletion_ms: u64,
    ) -> Result<(), StoreError> {
        let publication = self.binary_mut(id)?;
        publication.status = PublicationStatus::Deleted;
        publication.scheduled_deletion_ms = Some(scheduled_deletion_ms);
        Ok(())
    }
}
