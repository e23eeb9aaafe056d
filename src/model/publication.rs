use crate::model::{PackageKey, PublicationStatus};
use crate::version::DebianVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one publication row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PublicationId(pub u64);

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies an immutable source package release.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SourceReleaseId(pub u64);

impl fmt::Display for SourceReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies an immutable binary package release (one build artifact).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BinaryReleaseId(pub u64);

impl fmt::Display for BinaryReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// On-disk format of a binary release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryFormat {
    Deb,
    Udeb,
    Ddeb,
}

impl BinaryFormat {
    /// Detached debug-symbols packages are never senior to anything: they
    /// follow their companion into supersession and may not dominate.
    pub fn is_debug_symbols(self) -> bool {
        matches!(self, Self::Ddeb)
    }
}

/// One row recording that a source release is available in an archive scope.
///
/// The version is immutable once created; only `status`, `superseded_by`,
/// and `scheduled_deletion_ms` mutate over the row's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePublication {
    pub id: PublicationId,
    pub release: SourceReleaseId,
    pub package: String,
    pub version: DebianVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub status: PublicationStatus,
    /// Creation timestamp (epoch milliseconds); the ordering tie-breaker.
    pub created_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<SourceReleaseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_deletion_ms: Option<u64>,
}

impl SourcePublication {
    /// Creates a Published row, the state uploads land in.
    pub fn new(
        id: PublicationId,
        release: SourceReleaseId,
        package: impl Into<String>,
        version: DebianVersion,
        created_ms: u64,
    ) -> Self {
        Self {
            id,
            release,
            package: package.into(),
            version,
            channel: None,
            status: PublicationStatus::Published,
            created_ms,
            superseded_by: None,
            scheduled_deletion_ms: None,
        }
    }

    /// Attaches a channel.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Overrides the initial status.
    pub fn with_status(mut self, status: PublicationStatus) -> Self {
        self.status = status;
        self
    }

    /// The grouping key this row dominates under.
    pub fn package_key(&self) -> PackageKey {
        match &self.channel {
            Some(channel) => PackageKey::new(&self.package).with_channel(channel),
            None => PackageKey::new(&self.package),
        }
    }
}

/// One row recording that a binary release is available on one architecture
/// of an archive scope.
///
/// Release attributes the engine needs (`arch_independent`, `format`, the
/// originating source release, the debug companion) are carried pre-joined
/// on the row, so planning never reaches back into storage per item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryPublication {
    pub id: PublicationId,
    pub release: BinaryReleaseId,
    pub package: String,
    pub version: DebianVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub status: PublicationStatus,
    pub created_ms: u64,
    /// Build architecture this row targets (e.g. `"amd64"`).
    pub architecture: String,
    /// True for arch-all releases shared across every architecture.
    pub arch_independent: bool,
    pub format: BinaryFormat,
    /// The source release whose build produced this binary.
    pub source_release: SourceReleaseId,
    /// Detached debug-symbols release built alongside this one, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_companion: Option<BinaryReleaseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<BinaryReleaseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_deletion_ms: Option<u64>,
}

impl BinaryPublication {
    /// Creates a Published arch-specific `.deb` row.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PublicationId,
        release: BinaryReleaseId,
        package: impl Into<String>,
        version: DebianVersion,
        architecture: impl Into<String>,
        source_release: SourceReleaseId,
        created_ms: u64,
    ) -> Self {
        Self {
            id,
            release,
            package: package.into(),
            version,
            channel: None,
            status: PublicationStatus::Published,
            created_ms,
            architecture: architecture.into(),
            arch_independent: false,
            format: BinaryFormat::Deb,
            source_release,
            debug_companion: None,
            superseded_by: None,
            scheduled_deletion_ms: None,
        }
    }

    /// Marks the release architecture-independent.
    pub fn arch_independent(mut self) -> Self {
        self.arch_independent = true;
        self
    }

    /// Overrides the binary format.
    pub fn with_format(mut self, format: BinaryFormat) -> Self {
        self.format = format;
        self
    }

    /// Attaches a channel.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Overrides the initial status.
    pub fn with_status(mut self, status: PublicationStatus) -> Self {
        self.status = status;
        self
    }

    /// Links the detached debug-symbols companion release.
    pub fn with_debug_companion(mut self, companion: BinaryReleaseId) -> Self {
        self.debug_companion = Some(companion);
        self
    }

    /// The grouping key this row dominates under.
    pub fn package_key(&self) -> PackageKey {
        match &self.channel {
            Some(channel) => PackageKey::new(&self.package).with_channel(channel),
            None => PackageKey::new(&self.package),
        }
    }
}
