use std::fmt;

use genreport_common::xref::individual_xref;
use genreport_common::{FamilyGraph, PersonIdx};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::classify::{Classification, GenerationTag};
use crate::connectivity::IslandPerson;
use crate::error::NumberingError;
use crate::numberer::{NumberedGroup, Slot};
use crate::special::SpecialCaseRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Root,
    Ancestor,
    NonAncestor,
    Special,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Root => "root",
            Category::Ancestor => "ancestor",
            Category::NonAncestor => "non-ancestor",
            Category::Special => "special",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentEntry {
    pub id: u32,
    pub category: Category,
    pub xref: String,
    #[serde(skip)]
    pub person: PersonIdx,
    pub generation: GenerationTag,
}

/// Final identifier assignment in document order.
///
/// Order: root, ancestors, non-ancestors, then special-case persons the graph
/// did not place. Built once per run; there is no way to mutate it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentTable {
    entries: Vec<AssignmentEntry>,
    ancestor_count: usize,
    threshold: u32,
    /// Islands tolerated under the permissive policy. Always empty when strict.
    unplaced: Vec<IslandPerson>,
    #[serde(skip)]
    by_xref: FxHashMap<String, usize>,
}

impl AssignmentTable {
    pub fn entries(&self) -> &[AssignmentEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssignmentEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn root(&self) -> Option<&AssignmentEntry> {
        self.entries.first().filter(|e| e.category == Category::Root)
    }

    /// `A`: how many ancestors received a sequential identifier.
    pub fn ancestor_count(&self) -> usize {
        self.ancestor_count
    }

    /// `T`: the first non-ancestor identifier.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn unplaced(&self) -> &[IslandPerson] {
        &self.unplaced
    }

    pub fn get(&self, xref: &str) -> Option<&AssignmentEntry> {
        self.by_xref.get(xref).map(|&i| &self.entries[i])
    }

    pub fn id_of(&self, xref: &str) -> Option<u32> {
        self.get(xref).map(|e| e.id)
    }

    /// Resolve a bare GEDCOM number (`"123"` → `@I123@`).
    pub fn id_of_numeric(&self, number: &str) -> Option<u32> {
        self.id_of(&individual_xref(number))
    }

    pub fn with_category(&self, category: Category) -> impl Iterator<Item = &AssignmentEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }
}

impl<'a> IntoIterator for &'a AssignmentTable {
    type Item = &'a AssignmentEntry;
    type IntoIter = std::slice::Iter<'a, AssignmentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Merges the numbered groups and checks the table post-conditions.
pub(crate) struct TableBuilder<'g> {
    graph: &'g FamilyGraph,
    classification: &'g Classification,
    entries: Vec<AssignmentEntry>,
    ancestor_count: usize,
    threshold: u32,
    unplaced: Vec<IslandPerson>,
}

impl<'g> TableBuilder<'g> {
    pub(crate) fn new(graph: &'g FamilyGraph, classification: &'g Classification) -> Self {
        let root = classification.root();
        let entries = vec![AssignmentEntry {
            id: 0,
            category: Category::Root,
            xref: graph.person(root).xref.clone(),
            person: root,
            generation: GenerationTag::Root,
        }];
        Self {
            graph,
            classification,
            entries,
            ancestor_count: 0,
            threshold: 0,
            unplaced: Vec::new(),
        }
    }

    pub(crate) fn ancestors(&mut self, group: NumberedGroup) -> &mut Self {
        self.ancestor_count = group.count;
        self.push_group(group, Category::Ancestor);
        self
    }

    pub(crate) fn non_ancestors(&mut self, group: NumberedGroup, threshold: u32) -> &mut Self {
        self.threshold = threshold;
        self.push_group(group, Category::NonAncestor);
        self
    }

    pub(crate) fn unplaced(&mut self, islands: Vec<IslandPerson>) -> &mut Self {
        self.unplaced = islands;
        self
    }

    fn push_group(&mut self, group: NumberedGroup, category: Category) {
        for slot in group.slots {
            let category = match slot {
                Slot::Numbered { .. } => category,
                Slot::Special { .. } => Category::Special,
            };
            self.push(slot.person(), slot.id(), category);
        }
    }

    fn push(&mut self, person: PersonIdx, id: u32, category: Category) {
        self.entries.push(AssignmentEntry {
            id,
            category,
            xref: self.graph.person(person).xref.clone(),
            person,
            generation: self.classification.tag(person),
        });
    }

    /// Append registry persons the graph did not place, in registry order.
    pub(crate) fn specials(&mut self, registry: &SpecialCaseRegistry) -> &mut Self {
        let placed: FxHashSet<PersonIdx> = self.entries.iter().map(|e| e.person).collect();
        for (xref, id) in registry.iter() {
            let Some(person) = self.graph.find(xref) else {
                continue;
            };
            if !placed.contains(&person) {
                self.push(person, id, Category::Special);
            }
        }
        self
    }

    pub(crate) fn finish(&mut self) -> Result<AssignmentTable, NumberingError> {
        let entries = std::mem::take(&mut self.entries);

        let mut by_xref = FxHashMap::default();
        let mut ids: FxHashMap<u32, usize> = FxHashMap::default();
        for (i, entry) in entries.iter().enumerate() {
            if let Some(prev) = ids.insert(entry.id, i) {
                return Err(NumberingError::invariant(format!(
                    "identifier {} assigned to both {} and {}",
                    entry.id, entries[prev].xref, entry.xref
                )));
            }
            if by_xref.insert(entry.xref.clone(), i).is_some() {
                return Err(NumberingError::invariant(format!(
                    "{} appears twice in the table",
                    entry.xref
                )));
            }
        }

        let unplaced: FxHashSet<&str> = self.unplaced.iter().map(|i| i.xref.as_str()).collect();
        if let Some((_, missing)) = self
            .graph
            .persons()
            .find(|(_, p)| !by_xref.contains_key(&p.xref) && !unplaced.contains(p.xref.as_str()))
        {
            return Err(NumberingError::invariant(format!(
                "{} received no identifier",
                missing.xref
            )));
        }

        Ok(AssignmentTable {
            entries,
            ancestor_count: self.ancestor_count,
            threshold: self.threshold,
            unplaced: std::mem::take(&mut self.unplaced),
            by_xref,
        })
    }
}
