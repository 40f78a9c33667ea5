//! GenReport meta crate.
//!
//! Re-exports the reader, graph model and numbering engine, and adds the plain
//! listings the `genreport` binary prints.

pub use genreport_common as common;
pub use genreport_ged as ged;
pub use genreport_numbering as numbering;

pub mod render;

pub use genreport_common::{FamilyGraph, Person, PersonIdx};
pub use genreport_ged::{GedDocument, GedError};
pub use genreport_numbering::{
    AssignmentTable, ConnectivityPolicy, NumberingConfig, NumberingEngine, NumberingError,
    RootSelector,
};
pub use render::{OutputFormat, render};
