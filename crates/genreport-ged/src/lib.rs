//! GEDCOM reader for GenReport.
//!
//! Only what the numbering engine needs is extracted: individuals with their
//! name, sex and birth/death years, and families with partners and children.
//! Notes, sources and places are left to the report renderers.

mod decode;
pub mod document;
pub mod parser;
pub mod tokenizer;
pub mod types;

pub use decode::decode_bytes;
pub use document::GedDocument;
pub use parser::{GedNode, parse};
pub use tokenizer::{GedLine, Tokenizer};
pub use types::GedError;

// Re-export the graph types the reader produces.
pub use genreport_common::{FamilyGraph, Person, PersonIdx, Sex};
