//! Fixed identifiers for a known disconnected cluster.
//!
//! The registry is plain data injected into the engine. Persons listed here
//! always get their fixed identifier, never count as connectivity failures, and
//! are never re-sorted: the table order is the registry order.

use genreport_common::FamilyGraph;
use rustc_hash::{FxHashMap, FxHashSet};

/// The sibling group that ships without family links to any report root.
pub const DEFAULT_SPECIAL_XREFS: [&str; 7] = [
    "@I501665@",
    "@I501670@",
    "@I501674@",
    "@I501681@",
    "@I501682@",
    "@I501683@",
    "@I501684@",
];

/// First fixed identifier; the rest follow consecutively.
pub const DEFAULT_SPECIAL_START: u32 = 9001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialCaseRegistry {
    entries: Vec<(String, u32)>,
    by_xref: FxHashMap<String, u32>,
}

impl Default for SpecialCaseRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIAL_START, DEFAULT_SPECIAL_XREFS)
    }
}

impl SpecialCaseRegistry {
    /// Assign `start, start + 1, ...` to `xrefs` in the given order.
    ///
    /// Duplicate xrefs keep their first identifier. Configuration validation
    /// rejects duplicates before this point.
    pub fn new<I, S>(start: u32, xrefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        let mut by_xref = FxHashMap::default();
        let mut next = start;
        for xref in xrefs {
            let xref = xref.into();
            if by_xref.contains_key(&xref) {
                continue;
            }
            by_xref.insert(xref.clone(), next);
            entries.push((xref, next));
            next += 1;
        }
        Self { entries, by_xref }
    }

    /// A registry with no exemptions.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            by_xref: FxHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fixed_id(&self, xref: &str) -> Option<u32> {
        self.by_xref.get(xref).copied()
    }

    pub fn contains(&self, xref: &str) -> bool {
        self.by_xref.contains_key(xref)
    }

    /// Fixed identifiers of the registry persons actually present in `graph`.
    ///
    /// Identifiers of absent persons stay free for the regular sequence.
    pub fn reserved_ids(&self, graph: &FamilyGraph) -> FxHashSet<u32> {
        self.entries
            .iter()
            .filter(|(xref, _)| graph.find(xref).is_some())
            .map(|&(_, id)| id)
            .collect()
    }

    /// `(xref, fixed id)` in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries.iter().map(|(x, id)| (x.as_str(), *id))
    }
}
