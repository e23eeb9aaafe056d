//! Domination engine for Debian-style package archives.
//!
//! Given the Published rows for every package in one (series, pocket)
//! scope, the engine partitions them into live, superseded, and deleted
//! publications. Debian version ordering picks the winners; a two-pass
//! binary calculation keeps architecture-independent packages installable
//! while any architecture-specific sibling from the same source still
//! needs them; transitions are applied atomically per release. Storage
//! stays behind the [`PublicationStore`] seam, so the engine itself is
//! sequential, in-memory computation suitable for an unattended batch job.

pub mod app;
pub mod clock;
pub mod config;
pub mod dominate;
pub mod model;
pub mod observability;
pub mod store;
pub mod version;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, DominationConfig};
pub use dominate::{
    compare, find_live_binary_versions_pass1, find_live_binary_versions_pass2,
    find_live_source_versions, plan_package_domination, sort_publications,
    ArchSpecificPublicationsCache, DominationError, DominationPlan, DominationStats, Dominator,
    Publication,
};
pub use model::{
    BinaryFormat, BinaryPublication, BinaryReleaseId, PackageKey, Pocket, PublicationId,
    PublicationStatus, SourcePublication, SourceReleaseId,
};
pub use observability::{JsonLineLogger, LogFile, LogLevel, LogRotationPolicy, LoggingError};
pub use store::{ArchiveSnapshot, MemoryStore, PublicationStore, StoreError};
pub use version::{DebianVersion, VersionError};
