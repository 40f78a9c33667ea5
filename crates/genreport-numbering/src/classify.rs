//! Generation classification relative to the root.
//!
//! Two breadth-first passes over index-keyed tables:
//!
//! 1. **Ancestors**: parent edges only, outward from the root. The first time a
//!    person is reached is at their minimum parent-hop depth; any later visit is
//!    a no-op, which also makes impossible parent cycles terminate.
//! 2. **Non-ancestors**: generation 0 is the root plus everyone who is a
//!    spouse, child or other parent (adoptive, step) of the root or of an
//!    ancestor. From a non-ancestor at generation `g`, every untagged spouse,
//!    child, parent, other parent or sibling is generation `g + 1`. Ancestors are
//!    never re-tagged, so pedigree collapse through a cousin marriage keeps the
//!    ancestor tag.
//!
//! Whatever is left is [`GenerationTag::Unclassified`].

use std::collections::VecDeque;
use std::fmt;

use genreport_common::{FamilyGraph, PersonIdx};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "depth", rename_all = "kebab-case")]
pub enum GenerationTag {
    Root,
    /// Parent-hop depth, `>= 1`.
    Ancestor(u32),
    /// Relation-hop distance from generation 0.
    NonAncestor(u32),
    Unclassified,
}

impl GenerationTag {
    pub fn is_classified(self) -> bool {
        !matches!(self, GenerationTag::Unclassified)
    }

    pub fn ancestor_depth(self) -> Option<u32> {
        match self {
            GenerationTag::Ancestor(d) => Some(d),
            _ => None,
        }
    }

    pub fn non_ancestor_generation(self) -> Option<u32> {
        match self {
            GenerationTag::NonAncestor(g) => Some(g),
            _ => None,
        }
    }
}

impl fmt::Display for GenerationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationTag::Root => f.write_str("root"),
            GenerationTag::Ancestor(d) => write!(f, "ancestor({d})"),
            GenerationTag::NonAncestor(g) => write!(f, "non-ancestor({g})"),
            GenerationTag::Unclassified => f.write_str("unclassified"),
        }
    }
}

/// Generation tags for every person of one graph, indexed by [`PersonIdx`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    root: PersonIdx,
    tags: Vec<GenerationTag>,
}

impl Classification {
    /// Hand-made tag table for exercising the numberers on shapes a graph
    /// with at most two parents per person cannot produce.
    #[cfg(test)]
    pub(crate) fn from_tags(root: PersonIdx, tags: Vec<GenerationTag>) -> Self {
        Self { root, tags }
    }

    pub fn root(&self) -> PersonIdx {
        self.root
    }

    pub fn tag(&self, idx: PersonIdx) -> GenerationTag {
        self.tags[idx.as_index()]
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PersonIdx, GenerationTag)> + '_ {
        self.tags
            .iter()
            .enumerate()
            .map(|(i, &t)| (index(i), t))
    }

    /// Ancestors in index order. Callers sort as needed.
    pub fn ancestors(&self) -> Vec<PersonIdx> {
        self.filtered(|t| t.ancestor_depth().is_some())
    }

    pub fn non_ancestors(&self) -> Vec<PersonIdx> {
        self.filtered(|t| t.non_ancestor_generation().is_some())
    }

    pub fn unclassified(&self) -> Vec<PersonIdx> {
        self.filtered(|t| !t.is_classified())
    }

    fn filtered(&self, keep: impl Fn(GenerationTag) -> bool) -> Vec<PersonIdx> {
        self.iter().filter(|&(_, t)| keep(t)).map(|(i, _)| i).collect()
    }
}

/// Classify every person in `graph` relative to `root`.
pub fn classify(graph: &FamilyGraph, root: PersonIdx) -> Classification {
    let mut tags = vec![GenerationTag::Unclassified; graph.len()];
    tags[root.as_index()] = GenerationTag::Root;

    mark_ancestors(graph, root, &mut tags);
    mark_non_ancestors(graph, root, &mut tags);

    Classification { root, tags }
}

fn mark_ancestors(graph: &FamilyGraph, root: PersonIdx, tags: &mut [GenerationTag]) {
    let mut depth: Vec<Option<u32>> = vec![None; graph.len()];
    depth[root.as_index()] = Some(0);
    let mut queue = VecDeque::from([root]);

    while let Some(person) = queue.pop_front() {
        let Some(d) = depth[person.as_index()] else {
            continue;
        };
        for &parent in graph.person(person).parents() {
            match depth[parent.as_index()] {
                Some(seen) if seen <= d + 1 => {}
                _ => {
                    depth[parent.as_index()] = Some(d + 1);
                    queue.push_back(parent);
                }
            }
        }
    }

    for (i, d) in depth.into_iter().enumerate() {
        if let Some(d) = d.filter(|&d| d > 0) {
            tags[i] = GenerationTag::Ancestor(d);
        }
    }
}

fn mark_non_ancestors(graph: &FamilyGraph, root: PersonIdx, tags: &mut [GenerationTag]) {
    let mut queue: VecDeque<(PersonIdx, u32)> = VecDeque::new();

    let seeds: Vec<PersonIdx> = std::iter::once(root)
        .chain(
            tags.iter()
                .enumerate()
                .filter(|(_, t)| t.ancestor_depth().is_some())
                .map(|(i, _)| index(i)),
        )
        .collect();

    for seed in seeds {
        let person = graph.person(seed);
        for &near in person
            .spouses()
            .iter()
            .chain(person.children())
            .chain(person.other_parents())
        {
            visit(tags, &mut queue, near, 0);
        }
    }

    while let Some((person_idx, g)) = queue.pop_front() {
        let person = graph.person(person_idx);
        let related = person
            .spouses()
            .iter()
            .chain(person.children())
            .chain(person.parents())
            .chain(person.other_parents())
            .copied()
            .chain(graph.siblings(person_idx));
        for near in related {
            visit(tags, &mut queue, near, g + 1);
        }
    }
}

#[inline]
fn visit(
    tags: &mut [GenerationTag],
    queue: &mut VecDeque<(PersonIdx, u32)>,
    idx: PersonIdx,
    generation: u32,
) {
    let slot = &mut tags[idx.as_index()];
    if *slot == GenerationTag::Unclassified {
        *slot = GenerationTag::NonAncestor(generation);
        queue.push_back((idx, generation));
    }
}

/// Every person reachable from `root` over undirected parent/child/spouse
/// edges, other parents included, regardless of generation. Indexed by
/// [`PersonIdx`].
pub fn reachable_from(graph: &FamilyGraph, root: PersonIdx) -> Vec<bool> {
    let mut seen = vec![false; graph.len()];
    seen[root.as_index()] = true;
    let mut queue = VecDeque::from([root]);
    while let Some(idx) = queue.pop_front() {
        let person = graph.person(idx);
        for &near in person
            .parents()
            .iter()
            .chain(person.other_parents())
            .chain(person.children())
            .chain(person.spouses())
        {
            if !seen[near.as_index()] {
                seen[near.as_index()] = true;
                queue.push_back(near);
            }
        }
    }
    seen
}

fn index(i: usize) -> PersonIdx {
    // Classification tables are built from `graph.len()`, so `i` is in range.
    PersonIdx::from_index(i)
}
