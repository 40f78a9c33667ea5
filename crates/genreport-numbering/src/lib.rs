//! Deterministic identifier assignment for genealogy reports.
//!
//! Given a [`FamilyGraph`](genreport_common::FamilyGraph) and a root person the
//! engine produces an [`AssignmentTable`]:
//!
//! - the root is `0`;
//! - ancestors are numbered `1..=A`, nearest generation first;
//! - every other connected person is numbered from the next full thousand above `A`;
//! - a configured set of special-case persons keeps fixed identifiers.
//!
//! Within one generation people are ordered by birth year (unknown last), then
//! name, then xref, so the same input always yields the same table.
//!
//! ```no_run
//! use genreport_common::FamilyGraph;
//! use genreport_numbering::{NumberingEngine, NumberingError, RootSelector};
//! # fn demo(graph: &FamilyGraph) -> Result<(), NumberingError> {
//! let root = RootSelector::parse(Some("@I1@"));
//! let table = NumberingEngine::new().run_selector(graph, &root)?;
//! for entry in &table {
//!     println!("{} {}", entry.id, entry.xref);
//! }
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod config;
pub mod connectivity;
pub mod engine;
pub mod error;
pub mod numberer;
pub mod order;
pub mod root;
pub mod special;
pub mod table;

#[cfg(test)]
mod tests;

pub use classify::{Classification, GenerationTag, classify};
pub use config::{ConfigError, ConfigIssue, NumberingConfig, SpecialCaseConfig};
pub use connectivity::{
    ConnectivityPolicy, ConnectivityReport, IslandPerson, find_islands, validate_connectivity,
};
pub use engine::{NumberingEngine, RunState, RunTrace};
pub use error::NumberingError;
pub use numberer::non_ancestor_threshold;
pub use order::compare_persons;
pub use root::RootSelector;
pub use special::SpecialCaseRegistry;
pub use table::{AssignmentEntry, AssignmentTable, Category};
