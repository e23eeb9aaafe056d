use crate::dominate::generalization::Publication;
use crate::model::PublicationId;
use std::collections::HashSet;

/// Partition of one package group into untouched, superseded, and deleted
/// publications. `supersede` pairs each dominated row with the release of
/// the live publication that dominates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DominationPlan<R> {
    pub keep: Vec<PublicationId>,
    pub supersede: Vec<(PublicationId, R)>,
    pub delete: Vec<PublicationId>,
}

impl<R> Default for DominationPlan<R> {
    fn default() -> Self {
        Self {
            keep: Vec::new(),
            supersede: Vec::new(),
            delete: Vec::new(),
        }
    }
}

impl<R> DominationPlan<R> {
    /// True when the plan changes nothing.
    pub fn is_noop(&self) -> bool {
        self.supersede.is_empty() && self.delete.is_empty()
    }
}

/// Decides the fate of every publication in one package group.
///
/// `sorted_asc` must already be in ascending [`compare`] order; that is a
/// precondition, not re-validated here, and an unsorted input silently
/// produces a wrong plan. The scan walks the group newest-first, remembering the
/// most recently seen live publication as the dominant for everything
/// older:
///
/// - a row sharing the dominant's version string is a stale duplicate
///   (e.g. from repeated overrides) and is superseded by it, so only the
///   newest-created row of a live version survives;
/// - a live row becomes the new dominant and is kept;
/// - a non-live row seen before any live one has no successor and is
///   deleted (it raced ahead of everything actually live);
/// - any other non-live row is superseded by the current dominant.
///
/// Linear in the group size, no storage access. Empty input yields an
/// empty plan.
///
/// [`compare`]: crate::dominate::generalization::compare
pub fn plan_package_domination<P: Publication>(
    sorted_asc: &[&P],
    live_versions: &[String],
) -> DominationPlan<P::Release> {
    let live: HashSet<&str> = live_versions.iter().map(String::as_str).collect();
    let mut plan = DominationPlan::default();
    let mut dominant: Option<(&P, &str)> = None;
    for &publication in sorted_asc.iter().rev() {
        let version = publication.version().as_str();
        match dominant {
            Some((current, dominant_version)) if version == dominant_version => {
                plan.supersede.push((publication.id(), current.release()));
            }
            _ if live.contains(version) => {
                plan.keep.push(publication.id());
                dominant = Some((publication, version));
            }
            None => plan.delete.push(publication.id()),
            Some((current, _)) => {
                plan.supersede.push((publication.id(), current.release()));
            }
        }
    }
    plan
}
