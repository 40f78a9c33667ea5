//! Connectivity validation.
//!
//! Everyone must be the root, an ancestor, a classified non-ancestor, or listed
//! in the [`SpecialCaseRegistry`]. All offenders are collected in one pass so
//! the caller can report the complete set.

use std::fmt;

use genreport_common::{FamilyGraph, PersonIdx, life_span};
use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::order::sort_people;
use crate::special::SpecialCaseRegistry;

/// What a run does when islands are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityPolicy {
    /// Abort the run.
    #[default]
    Strict,
    /// Log a warning, leave islands unnumbered, and finish.
    Permissive,
}

/// One disconnected individual as it appears in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IslandPerson {
    pub xref: String,
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

impl IslandPerson {
    fn from_graph(graph: &FamilyGraph, idx: PersonIdx) -> Self {
        let p = graph.person(idx);
        Self {
            xref: p.xref.clone(),
            name: p.name.clone(),
            birth_year: p.birth_year,
            death_year: p.death_year,
        }
    }
}

impl fmt::Display for IslandPerson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            self.xref.as_str()
        } else {
            self.name.as_str()
        };
        f.write_str(name)?;
        if let Some(years) = life_span(self.birth_year, self.death_year) {
            write!(f, " {years}")?;
        }
        write!(f, " ({})", self.xref)
    }
}

/// Complete list of disconnected individuals, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectivityReport {
    pub islands: Vec<IslandPerson>,
}

impl ConnectivityReport {
    pub fn len(&self) -> usize {
        self.islands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    /// Multi-line listing of at most `limit` islands plus a remainder line.
    pub fn preview(&self, limit: usize) -> String {
        let mut out = String::new();
        for island in self.islands.iter().take(limit) {
            out.push_str(&format!("  - {island}\n"));
        }
        if self.islands.len() > limit {
            out.push_str(&format!("  ... and {} more\n", self.islands.len() - limit));
        }
        out
    }
}

impl fmt::Display for ConnectivityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found {} disconnected individual(s) not linked to the chosen root",
            self.islands.len()
        )
    }
}

/// Unclassified persons that are not special-cased, oldest first.
pub fn find_islands(
    graph: &FamilyGraph,
    classification: &Classification,
    registry: &SpecialCaseRegistry,
) -> Vec<PersonIdx> {
    let mut islands: Vec<PersonIdx> = classification
        .unclassified()
        .into_iter()
        .filter(|&idx| !registry.contains(&graph.person(idx).xref))
        .collect();
    sort_people(graph, &mut islands);
    islands
}

/// `Ok` when every non-special person is classified.
pub fn validate_connectivity(
    graph: &FamilyGraph,
    classification: &Classification,
    registry: &SpecialCaseRegistry,
) -> Result<(), ConnectivityReport> {
    let islands = find_islands(graph, classification, registry);
    if islands.is_empty() {
        return Ok(());
    }
    Err(report_for(graph, &islands))
}

pub(crate) fn report_for(graph: &FamilyGraph, islands: &[PersonIdx]) -> ConnectivityReport {
    ConnectivityReport {
        islands: islands
            .iter()
            .map(|&idx| IslandPerson::from_graph(graph, idx))
            .collect(),
    }
}
