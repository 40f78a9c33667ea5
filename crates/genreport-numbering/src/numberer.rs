//! Ancestor and non-ancestor identifier allocation.
//!
//! Both numberers share one shape: order the group by generation, then by
//! [`crate::order::compare_persons`], then hand out consecutive identifiers.
//! Special-case persons keep their classified position but consume no
//! identifier from the sequence.

use genreport_common::{FamilyGraph, PersonIdx};
use rustc_hash::FxHashSet;

use crate::classify::Classification;
use crate::order::sort_by_generation;
use crate::special::SpecialCaseRegistry;

/// First non-ancestor identifier: the next full thousand above the ancestor count.
///
/// `999 → 1000`, `1000 → 2000`, `1573 → 2000`.
pub const fn non_ancestor_threshold(ancestor_count: usize) -> u32 {
    ((ancestor_count as u32 / 1000) + 1) * 1000
}

/// One slot of a numbered group, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Numbered { person: PersonIdx, id: u32 },
    /// A special-case person placed by the graph; the id comes from the registry.
    Special { person: PersonIdx, id: u32 },
}

impl Slot {
    pub fn person(self) -> PersonIdx {
        match self {
            Slot::Numbered { person, .. } | Slot::Special { person, .. } => person,
        }
    }

    pub fn id(self) -> u32 {
        match self {
            Slot::Numbered { id, .. } | Slot::Special { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedGroup {
    pub slots: Vec<Slot>,
    /// Identifiers handed out from the sequence (specials excluded).
    pub count: usize,
}

/// Hands out consecutive identifiers, stepping over reserved ones.
struct IdAllocator {
    next: u32,
    reserved: FxHashSet<u32>,
}

impl IdAllocator {
    fn new(start: u32, reserved: FxHashSet<u32>) -> Self {
        Self {
            next: start,
            reserved,
        }
    }

    fn take(&mut self) -> u32 {
        while self.reserved.contains(&self.next) {
            self.next += 1;
        }
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Identifiers `1..=A` for ancestors, nearest generation first.
///
/// Ancestor numbering never skips: a dense `1..=A` with reserved identifiers
/// inside would be a collision, which the table builder reports.
pub fn number_ancestors(
    graph: &FamilyGraph,
    classification: &Classification,
    registry: &SpecialCaseRegistry,
) -> NumberedGroup {
    let mut people = classification.ancestors();
    sort_by_generation(graph, &mut people, |p| {
        classification.tag(p).ancestor_depth().unwrap_or(u32::MAX)
    });
    assign(graph, people, registry, |next| {
        *next += 1;
        *next
    })
}

/// Identifiers from `threshold` upward for non-ancestors, generation 0 first.
///
/// Fixed identifiers of registry persons present in `graph` are skipped;
/// those of absent persons are handed out like any other.
pub fn number_non_ancestors(
    graph: &FamilyGraph,
    classification: &Classification,
    registry: &SpecialCaseRegistry,
    threshold: u32,
) -> NumberedGroup {
    let mut people = classification.non_ancestors();
    sort_by_generation(graph, &mut people, |p| {
        classification
            .tag(p)
            .non_ancestor_generation()
            .unwrap_or(u32::MAX)
    });
    let mut allocator = IdAllocator::new(threshold, registry.reserved_ids(graph));
    assign(graph, people, registry, |_| allocator.take())
}

fn assign(
    graph: &FamilyGraph,
    people: Vec<PersonIdx>,
    registry: &SpecialCaseRegistry,
    mut next_id: impl FnMut(&mut u32) -> u32,
) -> NumberedGroup {
    let mut slots = Vec::with_capacity(people.len());
    let mut cursor = 0u32;
    let mut count = 0usize;
    for person in people {
        match registry.fixed_id(&graph.person(person).xref) {
            Some(id) => slots.push(Slot::Special { person, id }),
            None => {
                let id = next_id(&mut cursor);
                slots.push(Slot::Numbered { person, id });
                count += 1;
            }
        }
    }
    NumberedGroup { slots, count }
}
