use dominion::{
    plan_package_domination, sort_publications, DominationPlan, PublicationId, SourcePublication,
    SourceReleaseId,
};

fn source(id: u64, release: u64, version: &str, created_ms: u64) -> SourcePublication {
    SourcePublication::new(
        PublicationId(id),
        SourceReleaseId(release),
        "alioth",
        version.parse().unwrap(),
        created_ms,
    )
}

fn plan(publications: &[SourcePublication], live: &[&str]) -> DominationPlan<SourceReleaseId> {
    let mut sorted: Vec<&SourcePublication> = publications.iter().collect();
    sort_publications(&mut sorted);
    let live: Vec<String> = live.iter().map(|version| (*version).to_string()).collect();
    plan_package_domination(&sorted, &live)
}

#[test]
fn empty_group_yields_empty_plan() {
    let empty = plan_package_domination::<SourcePublication>(&[], &[]);
    assert!(empty.keep.is_empty());
    assert!(empty.supersede.is_empty());
    assert!(empty.delete.is_empty());
    assert!(empty.is_noop());
}

#[test]
fn sole_live_version_is_untouched() {
    let publications = [source(1, 1, "3.1", 0)];
    let decided = plan(&publications, &["3.1"]);
    assert_eq!(decided.keep, vec![PublicationId(1)]);
    assert!(decided.is_noop());
}

#[test]
fn no_live_successor_means_deletion() {
    let publications = [source(1, 1, "1.1", 0)];
    let decided = plan(&publications, &[]);
    assert!(decided.supersede.is_empty());
    assert_eq!(decided.delete, vec![PublicationId(1)]);
}

#[test]
fn oldest_live_version_dominates_whatever_sits_below_it() {
    let publications = [
        source(1, 1, "2.7", 0),
        source(2, 2, "2.8", 1),
        source(3, 3, "2.9", 2),
    ];
    let decided = plan(&publications, &["2.8", "2.9"]);
    assert_eq!(
        decided.supersede,
        vec![(PublicationId(1), SourceReleaseId(2))]
    );
    assert!(decided.delete.is_empty());
}

#[test]
fn every_older_row_is_dominated_by_the_live_version_directly() {
    let publications = [
        source(1, 1, "1.0", 0),
        source(2, 2, "2.0", 1),
        source(3, 3, "3.0", 2),
        source(4, 4, "4.0", 3),
    ];
    let decided = plan(&publications, &["3.0"]);
    // 1.0 is dominated by 3.0 itself, not chained through 2.0; 4.0 raced
    // ahead of the live version and has no successor.
    assert_eq!(
        decided.supersede,
        vec![
            (PublicationId(2), SourceReleaseId(3)),
            (PublicationId(1), SourceReleaseId(3)),
        ]
    );
    assert_eq!(decided.delete, vec![PublicationId(4)]);
    assert_eq!(decided.keep, vec![PublicationId(3)]);
}

#[test]
fn duplicate_rows_of_a_live_version_keep_only_the_newest_created() {
    let publications = [
        source(1, 9, "1.5", 100),
        source(2, 9, "1.5", 200),
        source(3, 9, "1.5", 300),
    ];
    let decided = plan(&publications, &["1.5"]);
    assert_eq!(decided.keep, vec![PublicationId(3)]);
    assert_eq!(
        decided.supersede,
        vec![
            (PublicationId(2), SourceReleaseId(9)),
            (PublicationId(1), SourceReleaseId(9)),
        ]
    );
    assert!(decided.delete.is_empty());
}

#[test]
fn equal_version_strings_from_distinct_releases_collapse_to_one() {
    // Two different releases carrying the same version string: the
    // newest-created row wins and the other is superseded by it.
    let publications = [source(1, 10, "2.0", 100), source(2, 11, "2.0", 200)];
    let decided = plan(&publications, &["2.0"]);
    assert_eq!(decided.keep, vec![PublicationId(2)]);
    assert_eq!(
        decided.supersede,
        vec![(PublicationId(1), SourceReleaseId(11))]
    );
}
