//! One numbering run: classify, number, validate, assemble.
//!
//! A run is a straight pipeline over an immutable [`FamilyGraph`]. Each stage
//! advances a [`RunState`]; an illegal transition is an invariant violation,
//! and any failure moves the run to [`RunState::Aborted`] without exposing a
//! partial table.

use std::fmt;

use genreport_common::{FamilyGraph, PersonIdx};
use tracing::{debug, info, info_span, warn};

use crate::classify::{Classification, classify, reachable_from};
use crate::config::NumberingConfig;
use crate::connectivity::{ConnectivityPolicy, find_islands, report_for};
use crate::error::NumberingError;
use crate::numberer::{non_ancestor_threshold, number_ancestors, number_non_ancestors};
use crate::root::RootSelector;
use crate::special::SpecialCaseRegistry;
use crate::table::{AssignmentTable, TableBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    Loaded,
    Classified,
    AncestorsAssigned,
    NonAncestorsAssigned,
    Validated,
    Finalized,
    Aborted,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Finalized | RunState::Aborted)
    }

    pub fn can_advance_to(self, next: RunState) -> bool {
        use RunState::*;
        match (self, next) {
            (Loaded, Classified)
            | (Classified, AncestorsAssigned)
            | (AncestorsAssigned, NonAncestorsAssigned)
            | (NonAncestorsAssigned, Validated)
            | (Validated, Finalized) => true,
            (from, Aborted) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// State history of a run, starting at [`RunState::Loaded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTrace {
    states: Vec<RunState>,
}

impl RunTrace {
    fn new() -> Self {
        Self {
            states: vec![RunState::Loaded],
        }
    }

    pub fn states(&self) -> &[RunState] {
        &self.states
    }

    pub fn current(&self) -> RunState {
        // `new` seeds the history, so it is never empty.
        self.states.last().copied().unwrap_or(RunState::Loaded)
    }

    fn advance(&mut self, next: RunState) -> Result<(), NumberingError> {
        let from = self.current();
        if !from.can_advance_to(next) {
            return Err(NumberingError::invariant(format!(
                "illegal run transition {from} -> {next}"
            )));
        }
        debug!(%from, to = %next, "run state");
        self.states.push(next);
        Ok(())
    }

    fn abort(&mut self) {
        if !self.current().is_terminal() {
            self.states.push(RunState::Aborted);
        }
    }
}

/// Assigns report identifiers to every person of a graph.
///
/// The engine holds only configuration; it is cheap to clone and every call to
/// [`NumberingEngine::run`] recomputes from scratch.
#[derive(Debug, Clone)]
pub struct NumberingEngine {
    config: NumberingConfig,
    registry: SpecialCaseRegistry,
}

impl Default for NumberingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberingEngine {
    pub fn new() -> Self {
        let config = NumberingConfig::default();
        let registry = config.registry();
        Self { config, registry }
    }

    pub fn from_config(config: NumberingConfig) -> Result<Self, NumberingError> {
        config.validate()?;
        let registry = config.registry();
        Ok(Self { config, registry })
    }

    /// Replace the special-case registry taken from the configuration.
    pub fn with_registry(mut self, registry: SpecialCaseRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_policy(mut self, policy: ConnectivityPolicy) -> Self {
        self.config.connectivity = policy;
        self
    }

    pub fn config(&self) -> &NumberingConfig {
        &self.config
    }

    pub fn registry(&self) -> &SpecialCaseRegistry {
        &self.registry
    }

    pub fn policy(&self) -> ConnectivityPolicy {
        self.config.connectivity
    }

    pub fn run(
        &self,
        graph: &FamilyGraph,
        root: PersonIdx,
    ) -> Result<AssignmentTable, NumberingError> {
        self.run_traced(graph, root).0
    }

    pub fn run_selector(
        &self,
        graph: &FamilyGraph,
        selector: &RootSelector,
    ) -> Result<AssignmentTable, NumberingError> {
        let root = selector.resolve(graph)?;
        self.run(graph, root)
    }

    /// Like [`run`](Self::run) but also returns the visited states.
    pub fn run_traced(
        &self,
        graph: &FamilyGraph,
        root: PersonIdx,
    ) -> (Result<AssignmentTable, NumberingError>, RunTrace) {
        let mut trace = RunTrace::new();
        let result = self.execute(graph, root, &mut trace);
        if result.is_err() {
            trace.abort();
        }
        (result, trace)
    }

    fn execute(
        &self,
        graph: &FamilyGraph,
        root: PersonIdx,
        trace: &mut RunTrace,
    ) -> Result<AssignmentTable, NumberingError> {
        let Some(root_person) = graph.get(root) else {
            return Err(NumberingError::UnknownRoot {
                selector: root.to_string(),
            });
        };
        let _span =
            info_span!("numbering", root = %root_person.xref, persons = graph.len()).entered();

        let classification = classify(graph, root);
        check_reachability(graph, &classification)?;
        trace.advance(RunState::Classified)?;

        let ancestors = number_ancestors(graph, &classification, &self.registry);
        let ancestor_count = ancestors.count;
        trace.advance(RunState::AncestorsAssigned)?;

        let threshold = non_ancestor_threshold(ancestor_count);
        let non_ancestors = number_non_ancestors(graph, &classification, &self.registry, threshold);
        trace.advance(RunState::NonAncestorsAssigned)?;

        let islands = find_islands(graph, &classification, &self.registry);
        let mut unplaced = Vec::new();
        if !islands.is_empty() {
            let report = report_for(graph, &islands);
            match self.config.connectivity {
                ConnectivityPolicy::Strict => {
                    trace.advance(RunState::Validated)?;
                    return Err(NumberingError::Connectivity(report));
                }
                ConnectivityPolicy::Permissive => {
                    warn!(
                        islands = report.len(),
                        "{report}; continuing without numbering them\n{}",
                        report.preview(self.config.island_preview_limit)
                    );
                    unplaced = report.islands;
                }
            }
        }
        trace.advance(RunState::Validated)?;

        let table = TableBuilder::new(graph, &classification)
            .ancestors(ancestors)
            .non_ancestors(non_ancestors, threshold)
            .specials(&self.registry)
            .unplaced(unplaced)
            .finish()?;
        trace.advance(RunState::Finalized)?;

        info!(
            entries = table.len(),
            ancestors = ancestor_count,
            threshold,
            unplaced = table.unplaced().len(),
            "numbering finished"
        );
        Ok(table)
    }
}

/// Classified persons must be exactly those connected to the root.
fn check_reachability(
    graph: &FamilyGraph,
    classification: &Classification,
) -> Result<(), NumberingError> {
    let reachable = reachable_from(graph, classification.root());
    for (idx, tag) in classification.iter() {
        if tag.is_classified() != reachable[idx.as_index()] {
            return Err(NumberingError::invariant(format!(
                "{} is {tag} but {}reachable from the root",
                graph.person(idx).xref,
                if reachable[idx.as_index()] { "" } else { "not " }
            )));
        }
    }
    Ok(())
}
