use crate::model::{BinaryReleaseId, PublicationId};
use crate::observability::logging::LoggingError;
use crate::store::StoreError;
use thiserror::Error;

/// Fatal conditions raised by the domination engine.
///
/// The first two variants are invariant violations: they mean grouping or
/// filtering upstream is broken, never a transient runtime condition, and
/// the whole (series, pocket) batch must be aborted.
#[derive(Debug, Error)]
pub enum DominationError {
    /// An empty package group reached the orchestration layer. Group
    /// queries are required to return non-empty groups by construction.
    #[error("empty publication group for package {package:?} (channel {channel:?})")]
    EmptyPackageGroup {
        package: String,
        channel: Option<String>,
    },

    /// A debug-symbols release was about to supersede another publication.
    #[error("debug symbols release {dominant} may not supersede publication {dominated}")]
    DebugSymbolDominant {
        dominant: BinaryReleaseId,
        dominated: PublicationId,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Log(#[from] LoggingError),
}
