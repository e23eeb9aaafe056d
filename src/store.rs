//! Storage collaborator contract.
//!
//! The engine itself is pure, sequential, in-memory computation; everything
//! it needs from persistent storage goes through [`PublicationStore`]. The
//! contract is shaped for bulk access: group fetches return whole package
//! groups pre-joined with release data, and the per-group planning loop
//! issues no further reads.

pub mod memory;

use crate::model::{
    BinaryPublication, BinaryReleaseId, PackageKey, Pocket, PublicationId, SourcePublication,
    SourceReleaseId,
};
use thiserror::Error;

pub use memory::{ArchiveSnapshot, BinaryRow, MemoryStore, SourceRow};

/// Storage operations the domination engine depends on.
pub trait PublicationStore {
    /// Architecture tags enabled for a series.
    fn architectures(&self, series: &str) -> Result<Vec<String>, StoreError>;

    /// Published source groups with more than one publication in the scope,
    /// keyed by package name and channel. Single-publication groups are
    /// filtered out store-side; there is nothing to dominate in them.
    fn source_groups_for_domination(
        &self,
        series: &str,
        pocket: Pocket,
    ) -> Result<Vec<(PackageKey, Vec<SourcePublication>)>, StoreError>;

    /// Every Published source publication of one package in the scope,
    /// regardless of group size. Used for externally-driven version
    /// domination, where even a single row may need deleting.
    fn source_publications_for_package(
        &self,
        series: &str,
        pocket: Pocket,
        package: &str,
    ) -> Result<Vec<SourcePublication>, StoreError>;

    /// Published binary groups for one architecture, same >1 filter.
    /// Debug-symbols publications are excluded; they are dominated through
    /// their companion, never on their own.
    fn binary_groups_for_domination(
        &self,
        series: &str,
        pocket: Pocket,
        architecture: &str,
    ) -> Result<Vec<(PackageKey, Vec<BinaryPublication>)>, StoreError>;

    /// Does the scope still hold a Published architecture-specific binary
    /// built from `source_release`? This is the reprieve existence query;
    /// callers memoize it through the reprieve cache.
    fn has_published_arch_specific_binaries(
        &self,
        series: &str,
        pocket: Pocket,
        channel: Option<&str>,
        source_release: SourceReleaseId,
    ) -> Result<bool, StoreError>;

    /// Published publications of one binary release across all
    /// architectures of the scope. Used to supersede arch-independent
    /// releases atomically and to drag debug companions along.
    fn published_binaries_of_release(
        &self,
        series: &str,
        pocket: Pocket,
        release: BinaryReleaseId,
    ) -> Result<Vec<PublicationId>, StoreError>;

    /// Transitions a source publication to Superseded.
    fn mark_source_superseded(
        &mut self,
        id: PublicationId,
        dominant: SourceReleaseId,
        scheduled_deletion_ms: u64,
    ) -> Result<(), StoreError>;

    /// Transitions a source publication to Deleted.
    fn mark_source_deleted(
        &mut self,
        id: PublicationId,
        scheduled_deletion_ms: u64,
    ) -> Result<(), StoreError>;

    /// Transitions a binary publication to Superseded.
    fn mark_binary_superseded(
        &mut self,
        id: PublicationId,
        dominant: BinaryReleaseId,
        scheduled_deletion_ms: u64,
    ) -> Result<(), StoreError>;

    /// Transitions a binary publication to Deleted.
    fn mark_binary_deleted(
        &mut self,
        id: PublicationId,
        scheduled_deletion_ms: u64,
    ) -> Result<(), StoreError>;
}

/// Failures surfaced by a storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown series {series:?}")]
    UnknownSeries { series: String },
    #[error("publication {id} not found")]
    PublicationNotFound { id: PublicationId },
    #[error("storage backend error: {message}")]
    Backend { message: String },
}
