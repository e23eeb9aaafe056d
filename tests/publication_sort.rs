use dominion::{
    compare, sort_publications, PublicationId, SourcePublication, SourceReleaseId,
};
use std::cmp::Ordering;

const DAY_MS: u64 = 86_400_000;

fn source(id: u64, release: u64, version: &str, created_ms: u64) -> SourcePublication {
    SourcePublication::new(
        PublicationId(id),
        SourceReleaseId(release),
        "alioth",
        version.parse().unwrap(),
        created_ms,
    )
}

fn sorted_ids(publications: &[SourcePublication]) -> Vec<u64> {
    let mut refs: Vec<&SourcePublication> = publications.iter().collect();
    sort_publications(&mut refs);
    refs.iter().map(|publication| publication.id.0).collect()
}

#[test]
fn equal_releases_sort_by_creation_time() {
    let p1 = source(1, 7, "1.0", 2 * DAY_MS);
    let p2 = source(2, 7, "1.0", DAY_MS);
    let p3 = source(3, 7, "1.0", 3 * DAY_MS);
    assert_eq!(sorted_ids(&[p1, p2, p3]), vec![2, 1, 3]);
}

#[test]
fn sorts_by_debian_version_order_not_input_order() {
    let a = source(1, 1, "1.10", 0);
    let b = source(2, 2, "1.1.0", 0);
    let c = source(3, 3, "1.1ubuntu0", 0);
    assert_eq!(sorted_ids(&[a, b, c]), vec![3, 2, 1]);
}

#[test]
fn equal_versions_from_distinct_releases_tie_break_on_creation() {
    let older = source(1, 10, "2.0", 500);
    let newer = source(2, 11, "2.0", 900);
    assert_eq!(sorted_ids(&[newer.clone(), older.clone()]), vec![1, 2]);
    assert_eq!(compare(&older, &newer), Ordering::Less);
    assert_eq!(compare(&newer, &older), Ordering::Greater);
}

#[test]
fn version_order_wins_over_creation_time() {
    let newer_version_older_row = source(1, 1, "2.0", 100);
    let older_version_newer_row = source(2, 2, "1.0", 900);
    assert_eq!(
        sorted_ids(&[newer_version_older_row, older_version_newer_row]),
        vec![2, 1]
    );
}
