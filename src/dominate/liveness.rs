use crate::dominate::arch_cache::ArchSpecificPublicationsCache;
use crate::model::{BinaryPublication, Pocket, SourcePublication};
use crate::store::{PublicationStore, StoreError};
use std::collections::HashSet;

/// Live versions for a source package: exactly the newest one.
///
/// Input is sorted newest-first; an empty input yields an empty live set,
/// not an error.
pub fn find_live_source_versions(newest_first: &[&SourcePublication]) -> Vec<String> {
    newest_first
        .first()
        .map(|publication| vec![publication.version.as_str().to_string()])
        .unwrap_or_default()
}

/// First binary pass: the newest version is live, and every
/// arch-independent publication is provisionally live. Whether an arch-all
/// binary can really be dropped takes cross-architecture knowledge this
/// pass does not have; the second pass settles it.
pub fn find_live_binary_versions_pass1(newest_first: &[&BinaryPublication]) -> Vec<String> {
    let mut picks: Vec<&BinaryPublication> = Vec::new();
    picks.extend(newest_first.first().copied());
    picks.extend(
        newest_first
            .iter()
            .copied()
            .filter(|publication| publication.arch_independent),
    );
    collect_versions(&picks)
}

/// Second binary pass: the newest version is live, every arch-specific
/// publication is live (each row is already judged within its own
/// architecture), and an arch-independent publication is live only while
/// its originating source release still has a Published arch-specific
/// sibling somewhere in the scope: the temporary reprieve.
pub fn find_live_binary_versions_pass2(
    newest_first: &[&BinaryPublication],
    series: &str,
    pocket: Pocket,
    cache: &mut ArchSpecificPublicationsCache,
    store: &dyn PublicationStore,
) -> Result<Vec<String>, StoreError> {
    let mut picks: Vec<&BinaryPublication> = Vec::new();
    picks.extend(newest_first.first().copied());
    for &publication in newest_first {
        if !publication.arch_independent {
            picks.push(publication);
        } else if cache.has_arch_specific_publications(series, pocket, publication, store)? {
            picks.push(publication);
        }
    }
    Ok(collect_versions(&picks))
}

/// Version strings of the picked publications, deduplicated, first
/// occurrence order preserved.
fn collect_versions(picks: &[&BinaryPublication]) -> Vec<String> {
    let mut seen = HashSet::new();
    picks
        .iter()
        .map(|publication| publication.version.as_str())
        .filter(|version| seen.insert(*version))
        .map(str::to_string)
        .collect()
}
