use crate::model::{
    BinaryPublication, BinaryReleaseId, PackageKey, PublicationId, SourcePublication,
    SourceReleaseId,
};
use crate::version::DebianVersion;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

/// Capability surface the engine needs from a publication row, so that
/// sorting and planning are written once for sources and binaries.
///
/// The two implementations are the two record types themselves; callers
/// pick the flavor by the slice they pass in, not by a runtime flag.
pub trait Publication {
    /// Identity type of the release this row publishes.
    type Release: Copy + Eq + Hash + Debug;

    fn id(&self) -> PublicationId;
    fn package_key(&self) -> PackageKey;
    fn version(&self) -> &DebianVersion;
    /// Creation timestamp, the ordering tie-breaker.
    fn created_ms(&self) -> u64;
    fn release(&self) -> Self::Release;
}

impl Publication for SourcePublication {
    type Release = SourceReleaseId;

    fn id(&self) -> PublicationId {
        self.id
    }

    fn package_key(&self) -> PackageKey {
        SourcePublication::package_key(self)
    }

    fn version(&self) -> &DebianVersion {
        &self.version
    }

    fn created_ms(&self) -> u64 {
        self.created_ms
    }

    fn release(&self) -> SourceReleaseId {
        self.release
    }
}

impl Publication for BinaryPublication {
    type Release = BinaryReleaseId;

    fn id(&self) -> PublicationId {
        self.id
    }

    fn package_key(&self) -> PackageKey {
        BinaryPublication::package_key(self)
    }

    fn version(&self) -> &DebianVersion {
        &self.version
    }

    fn created_ms(&self) -> u64 {
        self.created_ms
    }

    fn release(&self) -> BinaryReleaseId {
        self.release
    }
}

/// Orders two publications of the same package: Debian version order first,
/// creation time as the tie-breaker. The same tie-break covers both the
/// identical-release case and distinct releases sharing a version string.
pub fn compare<P: Publication>(a: &P, b: &P) -> Ordering {
    a.version()
        .dpkg_cmp(b.version())
        .then_with(|| a.created_ms().cmp(&b.created_ms()))
}

/// Stable ascending sort: oldest/lowest version first. Equal versions keep
/// creation-time order, which downstream planning relies on.
pub fn sort_publications<P: Publication>(publications: &mut [&P]) {
    publications.sort_by(|a, b| compare(*a, *b));
}
