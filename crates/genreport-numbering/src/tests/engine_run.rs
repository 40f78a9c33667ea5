use genreport_common::PersonIdx;

use super::common::{Tree, sample};
use crate::engine::RunState::{self, *};
use crate::{NumberingEngine, NumberingError};

#[test]
fn successful_run_walks_every_state() {
    let s = sample();
    let (result, trace) = NumberingEngine::new().run_traced(&s.graph, s.root);
    assert!(result.is_ok());
    assert_eq!(
        trace.states(),
        &[
            Loaded,
            Classified,
            AncestorsAssigned,
            NonAncestorsAssigned,
            Validated,
            Finalized
        ]
    );
    assert_eq!(trace.current(), Finalized);
}

#[test]
fn connectivity_failure_aborts_after_validation() {
    let mut t = Tree::new();
    let root = t.person(1, "Root", None);
    t.person(2, "Stray", None);
    let graph = t.build();

    let (result, trace) = NumberingEngine::new().run_traced(&graph, root);
    assert!(matches!(result, Err(NumberingError::Connectivity(_))));
    assert_eq!(&trace.states()[trace.states().len() - 2..], &[Validated, Aborted]);
}

#[test]
fn root_from_another_graph_is_unknown() {
    let s = sample();
    let (result, trace) = NumberingEngine::new().run_traced(&s.graph, PersonIdx::from_index(500));
    assert!(matches!(result, Err(NumberingError::UnknownRoot { .. })));
    assert_eq!(trace.states(), &[Loaded, Aborted]);
}

#[test]
fn transitions_only_move_forward() {
    assert!(Loaded.can_advance_to(Classified));
    assert!(Validated.can_advance_to(Finalized));
    assert!(Validated.can_advance_to(Aborted));
    assert!(Classified.can_advance_to(Aborted));
    assert!(!Loaded.can_advance_to(Validated));
    assert!(!Classified.can_advance_to(Loaded));
    assert!(!Finalized.can_advance_to(Aborted));
    assert!(!Aborted.can_advance_to(Loaded));
    assert!(RunState::Finalized.is_terminal());
}

#[test]
fn repeated_runs_are_identical() {
    let s = sample();
    let engine = NumberingEngine::new();
    let first = engine.run(&s.graph, s.root).unwrap();
    let second = engine.run(&s.graph, s.root).unwrap();
    assert_eq!(first, second);
}

#[test]
fn declaration_order_does_not_change_ids() {
    // Same family declared in two orders.
    let build = |reverse: bool| {
        let mut t = Tree::new();
        let mut specs = vec![
            (1, "Root", 1960),
            (2, "Dad", 1930),
            (3, "Mum", 1931),
            (4, "Sis", 1962),
        ];
        if reverse {
            specs.reverse();
        }
        let idx: Vec<_> = specs
            .iter()
            .map(|&(n, name, year)| (n, t.person(n, name, Some(year))))
            .collect();
        let find = |n: u32| idx.iter().find(|(m, _)| *m == n).map(|(_, i)| *i).unwrap();
        t.couple(find(2), find(3), &[find(4), find(1)]);
        let root = find(1);
        (t.build(), root)
    };

    let (g1, r1) = build(false);
    let (g2, r2) = build(true);
    let engine = NumberingEngine::new();
    let t1 = engine.run(&g1, r1).unwrap();
    let t2 = engine.run(&g2, r2).unwrap();
    let listing = |t: &crate::AssignmentTable| -> Vec<(String, u32)> {
        t.iter().map(|e| (e.xref.clone(), e.id)).collect()
    };
    assert_eq!(listing(&t1), listing(&t2));
}

#[test]
fn table_serializes_for_listing() {
    let s = sample();
    let table = NumberingEngine::new().run(&s.graph, s.root).unwrap();
    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json["threshold"], 1000);
    assert_eq!(json["ancestor_count"], 6);
    let first = &json["entries"][0];
    assert_eq!(first["id"], 0);
    assert_eq!(first["category"], "root");
    assert_eq!(first["generation"]["kind"], "root");
    assert_eq!(json["entries"][1]["generation"]["depth"], 1);
    assert!(first.get("person").is_none());
}
