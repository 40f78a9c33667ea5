//! Ancestor and non-ancestor identifier sequences.
use super::common::{Tree, sample};
use crate::classify::{Classification, GenerationTag};
use crate::numberer::{Slot, non_ancestor_threshold, number_ancestors, number_non_ancestors};
use crate::special::SpecialCaseRegistry;
use crate::table::Category;
use crate::{AssignmentTable, NumberingEngine};

fn ids(table: &AssignmentTable, xrefs: &[&str]) -> Vec<u32> {
    xrefs.iter().map(|x| table.id_of(x).unwrap()).collect()
}

#[test]
fn sample_tree_numbering() {
    let s = sample();
    let table = NumberingEngine::new().run(&s.graph, s.root).unwrap();

    assert_eq!(table.id_of("@I1@"), Some(0));
    assert_eq!(table.ancestor_count(), 6);
    assert_eq!(table.threshold(), 1000);

    // Parents by birth year, then grandparents.
    assert_eq!(ids(&table, &["@I20@", "@I21@"]), vec![1, 2]);
    assert_eq!(
        ids(&table, &["@I10@", "@I11@", "@I12@", "@I13@"]),
        vec![3, 4, 5, 6]
    );
    // Generation 0: Nils, Elsa, Lena, Ida. Generation 1: Jonas, Per.
    assert_eq!(
        ids(&table, &["@I22@", "@I23@", "@I30@", "@I41@"]),
        vec![1000, 1001, 1002, 1003]
    );
    assert_eq!(ids(&table, &["@I31@", "@I40@"]), vec![1004, 1005]);
    assert!(table.unplaced().is_empty());
}

#[test]
fn table_order_is_root_ancestors_non_ancestors() {
    let s = sample();
    let table = NumberingEngine::new().run(&s.graph, s.root).unwrap();

    let categories: Vec<Category> = table.iter().map(|e| e.category).collect();
    assert_eq!(categories[0], Category::Root);
    assert!(categories[1..7].iter().all(|&c| c == Category::Ancestor));
    assert!(categories[7..].iter().all(|&c| c == Category::NonAncestor));

    let listed: Vec<u32> = table.iter().map(|e| e.id).collect();
    let mut sorted = listed.clone();
    sorted.sort_unstable();
    assert_eq!(listed, sorted);
}

#[test]
fn three_and_four_per_generation() {
    let mut t = Tree::new();
    let people: Vec<_> = (0..8).map(|n| t.person(n, &format!("P{n}"), None)).collect();
    let graph = t.build();

    let mut tags = vec![GenerationTag::Root];
    tags.extend([GenerationTag::Ancestor(2); 4]);
    tags.extend([GenerationTag::Ancestor(1); 3]);
    let c = Classification::from_tags(people[0], tags);

    let group = number_ancestors(&graph, &c, &SpecialCaseRegistry::empty());
    assert_eq!(group.count, 7);
    assert_eq!(non_ancestor_threshold(group.count), 1000);

    let by_person: Vec<(u32, u32)> = group
        .slots
        .iter()
        .map(|s| (s.person().as_index() as u32, s.id()))
        .collect();
    // Depth 1 (P5..P7) takes 1..=3, depth 2 (P1..P4) takes 4..=7.
    assert_eq!(
        by_person,
        vec![(5, 1), (6, 2), (7, 3), (1, 4), (2, 5), (3, 6), (4, 7)]
    );
}

#[test]
fn a_thousand_ancestors_push_threshold_to_two_thousand() {
    let mut t = Tree::new();
    let people: Vec<_> = (0..1002).map(|n| t.person(n, "P", Some(1800))).collect();
    let graph = t.build();

    let mut tags = vec![GenerationTag::Root];
    tags.extend(std::iter::repeat_n(GenerationTag::Ancestor(1), 1000));
    tags.push(GenerationTag::NonAncestor(0));
    let c = Classification::from_tags(people[0], tags);

    let registry = SpecialCaseRegistry::empty();
    let ancestors = number_ancestors(&graph, &c, &registry);
    assert_eq!(ancestors.count, 1000);
    assert_eq!(ancestors.slots.last().map(|s| s.id()), Some(1000));

    let threshold = non_ancestor_threshold(ancestors.count);
    let others = number_non_ancestors(&graph, &c, &registry, threshold);
    assert_eq!(
        others.slots,
        vec![Slot::Numbered {
            person: people[1001],
            id: 2000
        }]
    );
}

#[test]
fn equal_birth_years_order_by_name_and_unknown_last() {
    let mut t = Tree::new();
    let father = t.person(1, "Father", Some(1940));
    let root = t.person(2, "Root", Some(1970));
    let cecilia = t.person(3, "Cecilia", Some(1972));
    let bertil = t.person(4, "Bertil", Some(1972));
    let unknown = t.person(5, "Aaron", None);
    t.family(Some(father), None, &[root, cecilia, bertil, unknown]);
    let graph = t.build();

    let table = NumberingEngine::new().run(&graph, root).unwrap();
    assert_eq!(table.id_of("@I4@"), Some(1000));
    assert_eq!(table.id_of("@I3@"), Some(1001));
    assert_eq!(table.id_of("@I5@"), Some(1002));
}

#[test]
fn closer_generations_get_smaller_ids() {
    let s = sample();
    let table = NumberingEngine::new().run(&s.graph, s.root).unwrap();
    let depth_and_id: Vec<(u32, u32)> = table
        .iter()
        .filter_map(|e| e.generation.ancestor_depth().map(|d| (d, e.id)))
        .collect();
    for a in &depth_and_id {
        for b in &depth_and_id {
            if a.0 < b.0 {
                assert!(a.1 < b.1, "{a:?} vs {b:?}");
            }
        }
    }
}

#[test]
fn lone_root_gets_only_zero() {
    let mut t = Tree::new();
    let root = t.person(1, "Solo", None);
    let graph = t.build();

    let table = NumberingEngine::new().run(&graph, root).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.root().map(|e| e.id), Some(0));
    assert_eq!(table.ancestor_count(), 0);
    assert_eq!(table.threshold(), 1000);
}

#[test]
fn lookup_by_bare_number() {
    let s = sample();
    let table = NumberingEngine::new().run(&s.graph, s.root).unwrap();
    assert_eq!(table.id_of_numeric("20"), Some(1));
    assert_eq!(table.id_of_numeric("999"), None);
}
