//! Island detection under strict and permissive policies.
use super::common::{Tree, sample};
use crate::classify::{GenerationTag, classify, reachable_from};
use crate::connectivity::{ConnectivityPolicy, find_islands, validate_connectivity};
use crate::special::SpecialCaseRegistry;
use crate::{NumberingEngine, NumberingError};

#[test]
fn single_island_aborts_with_exactly_that_person() {
    let mut t = Tree::new();
    let root = t.person(1, "Root", Some(1950));
    let child = t.person(2, "Child", Some(1980));
    t.person(3, "Stray Person", Some(1900));
    t.family(Some(root), None, &[child]);
    let graph = t.build();

    let err = NumberingEngine::new().run(&graph, root).unwrap_err();
    let report = err.connectivity_report().expect("connectivity failure");
    assert_eq!(report.len(), 1);
    assert_eq!(report.islands[0].xref, "@I3@");
    assert_eq!(report.islands[0].to_string(), "Stray Person 1900- (@I3@)");
    assert_eq!(
        err.to_string(),
        "connectivity check failed: \
         found 1 disconnected individual(s) not linked to the chosen root"
    );
}

#[test]
fn adoptive_parent_is_reached_through_second_family() {
    let mut t = Tree::new();
    let root = t.person(1, "Root", Some(1920));
    let birth = t.person(10, "Birth Father", Some(1890));
    let adoptive = t.person(20, "Adoptive Father", Some(1895));
    t.family(Some(adoptive), None, &[root]);
    let birth_family = t.family(Some(birth), None, &[root]);
    t.pin_parents(root, birth_family);
    let graph = t.build();

    let c = classify(&graph, root);
    assert_eq!(c.tag(birth), GenerationTag::Ancestor(1));
    assert_eq!(c.tag(adoptive), GenerationTag::NonAncestor(0));
    assert!(reachable_from(&graph, root)[adoptive.as_index()]);

    let table = NumberingEngine::new().run(&graph, root).unwrap();
    assert_eq!(table.id_of("@I10@"), Some(1));
    assert_eq!(table.id_of("@I20@"), Some(1000));
    assert!(table.unplaced().is_empty());
}

#[test]
fn every_island_is_reported_oldest_first() {
    let mut t = Tree::new();
    let root = t.person(1, "Root", None);
    t.person(2, "Young", Some(1990));
    t.person(3, "Nameless", None);
    t.person(4, "Old", Some(1850));
    let graph = t.build();

    let c = classify(&graph, root);
    let report = validate_connectivity(&graph, &c, &SpecialCaseRegistry::empty()).unwrap_err();
    let xrefs: Vec<&str> = report.islands.iter().map(|i| i.xref.as_str()).collect();
    assert_eq!(xrefs, ["@I4@", "@I2@", "@I3@"]);
}

#[test]
fn connected_graph_passes() {
    let s = sample();
    let c = classify(&s.graph, s.root);
    assert!(validate_connectivity(&s.graph, &c, &SpecialCaseRegistry::default()).is_ok());
}

#[test]
fn special_persons_are_never_islands() {
    let mut t = Tree::new();
    let root = t.person(1, "Root", None);
    t.person(501665, "Special", None);
    let graph = t.build();

    let c = classify(&graph, root);
    assert!(find_islands(&graph, &c, &SpecialCaseRegistry::default()).is_empty());
    assert_eq!(find_islands(&graph, &c, &SpecialCaseRegistry::empty()).len(), 1);
}

#[test]
fn preview_truncates_long_lists() {
    let mut t = Tree::new();
    let root = t.person(1, "Root", None);
    for n in 0..25 {
        t.person(100 + n, &format!("Stray {n:02}"), None);
    }
    let graph = t.build();

    let c = classify(&graph, root);
    let report = validate_connectivity(&graph, &c, &SpecialCaseRegistry::empty()).unwrap_err();
    let preview = report.preview(20);
    assert_eq!(preview.lines().count(), 21);
    assert!(preview.starts_with("  - Stray 00 (@I100@)\n"));
    assert!(preview.ends_with("  ... and 5 more\n"));
    assert!(!report.preview(25).contains("more"));
}

#[test]
fn permissive_run_leaves_islands_unplaced() {
    let mut t = Tree::new();
    let root = t.person(1, "Root", None);
    let child = t.person(2, "Child", None);
    t.person(3, "Stray", Some(1920));
    t.family(Some(root), None, &[child]);
    let graph = t.build();

    let table = NumberingEngine::new()
        .with_policy(ConnectivityPolicy::Permissive)
        .run(&graph, root)
        .unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.id_of("@I3@"), None);
    assert_eq!(table.unplaced().len(), 1);
    assert_eq!(table.unplaced()[0].xref, "@I3@");
}

#[test]
fn strict_is_the_default_policy() {
    assert_eq!(NumberingEngine::new().policy(), ConnectivityPolicy::Strict);

    let mut t = Tree::new();
    let root = t.person(1, "Root", None);
    t.person(2, "Stray", None);
    let graph = t.build();
    assert!(matches!(
        NumberingEngine::new().run(&graph, root),
        Err(NumberingError::Connectivity(_))
    ));
}
