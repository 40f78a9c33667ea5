//! Listings of an [`AssignmentTable`].
//!
//! `text` prints one tab-separated line per entry:
//!
//! ```text
//! 0	root	Anna Berg 1950- (@I1@)
//! 1	ancestor	Erik Berg 1920-1988 (@I2@)
//! ```
//!
//! Individuals left unnumbered by a permissive run follow with `-` as their id.
//! `json` is the pretty-printed table.

use std::fmt::Write as _;
use std::str::FromStr;

use genreport_common::FamilyGraph;
use genreport_numbering::AssignmentTable;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown output format `{0}` (expected `text` or `json`)")]
pub struct UnknownFormat(String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

pub fn render(
    graph: &FamilyGraph,
    table: &AssignmentTable,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(graph, table)),
        OutputFormat::Json => render_json(table),
    }
}

pub fn render_text(graph: &FamilyGraph, table: &AssignmentTable) -> String {
    let mut out = String::new();
    for entry in table {
        let person = graph.person(entry.person);
        let _ = writeln!(
            out,
            "{}\t{}\t{} ({})",
            entry.id,
            entry.category,
            person.label(),
            entry.xref
        );
    }
    for island in table.unplaced() {
        let _ = writeln!(out, "-\tunplaced\t{island}");
    }
    out
}

pub fn render_json(table: &AssignmentTable) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(table)?;
    text.push('\n');
    Ok(text)
}
