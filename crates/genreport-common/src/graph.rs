use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::person::{Person, PersonIdx};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("duplicate individual {0}")]
    DuplicateXref(String),
    #[error("person {0} does not exist in this graph")]
    UnknownPerson(PersonIdx),
    #[error("family index {0} does not exist in this graph")]
    UnknownFamily(usize),
}

/// A couple and their children. Either partner may be missing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Family {
    pub xref: String,
    pub husband: Option<PersonIdx>,
    pub wife: Option<PersonIdx>,
    pub children: Vec<PersonIdx>,
}

impl Family {
    pub fn new(xref: impl Into<String>) -> Self {
        Self {
            xref: xref.into(),
            ..Self::default()
        }
    }

    pub fn with_husband(mut self, idx: PersonIdx) -> Self {
        self.husband = Some(idx);
        self
    }

    pub fn with_wife(mut self, idx: PersonIdx) -> Self {
        self.wife = Some(idx);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = PersonIdx>) -> Self {
        self.children.extend(children);
        self
    }

    fn partners(&self) -> impl Iterator<Item = PersonIdx> + '_ {
        self.husband.into_iter().chain(self.wife)
    }
}

/// Immutable person/family graph handed to the numbering engine.
///
/// Links are derived once in [`FamilyGraphBuilder::build`]: a child's parents
/// come from exactly one family (its first `FAMC`), partners of any further
/// family listing the child become its other parents, and spouse and child
/// links accumulate over every family a person belongs to.
#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    persons: Vec<Person>,
    families: Vec<Family>,
    by_xref: FxHashMap<String, PersonIdx>,
}

impl FamilyGraph {
    pub fn builder() -> FamilyGraphBuilder {
        FamilyGraphBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Panics if `idx` came from another graph.
    pub fn person(&self, idx: PersonIdx) -> &Person {
        &self.persons[idx.as_index()]
    }

    pub fn get(&self, idx: PersonIdx) -> Option<&Person> {
        self.persons.get(idx.as_index())
    }

    pub fn find(&self, xref: &str) -> Option<PersonIdx> {
        self.by_xref.get(xref).copied()
    }

    /// Persons in declaration order.
    pub fn persons(&self) -> impl ExactSizeIterator<Item = (PersonIdx, &Person)> {
        self.persons
            .iter()
            .enumerate()
            .map(|(i, p)| (PersonIdx::from_index(i), p))
    }

    pub fn indices(&self) -> impl ExactSizeIterator<Item = PersonIdx> {
        (0..self.persons.len()).map(PersonIdx::from_index)
    }

    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// Everyone sharing at least one parent with `idx`, in ascending index order.
    pub fn siblings(&self, idx: PersonIdx) -> Vec<PersonIdx> {
        let mut out: Vec<PersonIdx> = self
            .person(idx)
            .parents()
            .iter()
            .flat_map(|&p| self.person(p).children().iter().copied())
            .filter(|&c| c != idx)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}

#[derive(Debug, Default)]
pub struct FamilyGraphBuilder {
    persons: Vec<Person>,
    families: Vec<Family>,
    by_xref: FxHashMap<String, PersonIdx>,
    parent_family: FxHashMap<PersonIdx, usize>,
}

impl FamilyGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a person. Any links already present on `person` are discarded.
    pub fn add_person(&mut self, mut person: Person) -> Result<PersonIdx, GraphError> {
        if self.by_xref.contains_key(&person.xref) {
            return Err(GraphError::DuplicateXref(person.xref));
        }
        person.parents.clear();
        person.other_parents.clear();
        person.spouses.clear();
        person.children.clear();
        let idx = PersonIdx::from_index(self.persons.len());
        self.by_xref.insert(person.xref.clone(), idx);
        self.persons.push(person);
        Ok(idx)
    }

    pub fn lookup(&self, xref: &str) -> Option<PersonIdx> {
        self.by_xref.get(xref).copied()
    }

    /// Register a family and return its index.
    pub fn add_family(&mut self, family: Family) -> Result<usize, GraphError> {
        for idx in family.partners().chain(family.children.iter().copied()) {
            if idx.as_index() >= self.persons.len() {
                return Err(GraphError::UnknownPerson(idx));
            }
        }
        self.families.push(family);
        Ok(self.families.len() - 1)
    }

    /// Pin the family whose partners become `child`'s parents.
    ///
    /// Without a pin the first family listing the child wins.
    pub fn set_parent_family(&mut self, child: PersonIdx, family: usize) -> Result<(), GraphError> {
        if child.as_index() >= self.persons.len() {
            return Err(GraphError::UnknownPerson(child));
        }
        if family >= self.families.len() {
            return Err(GraphError::UnknownFamily(family));
        }
        self.parent_family.insert(child, family);
        Ok(())
    }

    pub fn build(self) -> FamilyGraph {
        let FamilyGraphBuilder {
            mut persons,
            families,
            by_xref,
            mut parent_family,
        } = self;

        for (fam_idx, family) in families.iter().enumerate() {
            if let (Some(h), Some(w)) = (family.husband, family.wife) {
                if h != w {
                    push_unique(&mut persons[h.as_index()].spouses, w);
                    push_unique(&mut persons[w.as_index()].spouses, h);
                }
            }
            for &child in &family.children {
                for partner in family.partners() {
                    if partner != child {
                        push_unique(&mut persons[partner.as_index()].children, child);
                    }
                }
                parent_family.entry(child).or_insert(fam_idx);
            }
        }

        // Parents are resolved last so a pinned family wins regardless of order.
        let mut pinned: Vec<(PersonIdx, usize)> = parent_family.into_iter().collect();
        pinned.sort_unstable();
        for (child, fam_idx) in pinned {
            let family = &families[fam_idx];
            let parents = &mut persons[child.as_index()].parents;
            for partner in family.partners() {
                if partner != child && !parents.contains(&partner) {
                    parents.push(partner);
                }
            }
        }

        for family in &families {
            for &child in &family.children {
                let person = &mut persons[child.as_index()];
                for partner in family.partners() {
                    if partner != child && !person.parents.contains(&partner) {
                        push_unique(&mut person.other_parents, partner);
                    }
                }
            }
        }

        FamilyGraph {
            persons,
            families,
            by_xref,
        }
    }
}

fn push_unique(list: &mut Vec<PersonIdx>, idx: PersonIdx) {
    if !list.contains(&idx) {
        list.push(idx);
    }
}
