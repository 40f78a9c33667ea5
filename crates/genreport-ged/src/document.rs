use std::path::Path;

use genreport_common::{Family, FamilyGraph, FamilyGraphBuilder, Person, PersonIdx, Sex};
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::decode::decode_bytes;
use crate::parser::{GedNode, parse};
use crate::types::GedError;

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})").expect("year regex must compile"));
static SPACES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("space regex must compile"));

/// A GED file reduced to the family graph the numbering engine consumes.
#[derive(Debug)]
pub struct GedDocument {
    graph: FamilyGraph,
    placeholders: Vec<String>,
}

impl GedDocument {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GedError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| GedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&raw)
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self, GedError> {
        Self::from_str(&decode_bytes(raw)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(source: &str) -> Result<Self, GedError> {
        let records = parse(source)?;
        let _span = tracing::debug_span!("ged_document", records = records.len()).entered();
        build_graph(&records)
    }

    pub fn graph(&self) -> &FamilyGraph {
        &self.graph
    }

    pub fn into_graph(self) -> FamilyGraph {
        self.graph
    }

    /// Xrefs of media-only `INDI` records that were not treated as people.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }
}

fn build_graph(records: &[GedNode]) -> Result<GedDocument, GedError> {
    let mut builder = FamilyGraphBuilder::new();
    let mut placeholders = Vec::new();
    // Person -> xrefs of its FAMC families, in record order.
    let mut famc_links: Vec<(PersonIdx, Vec<String>)> = Vec::new();

    for rec in records.iter().filter(|r| r.tag == "INDI") {
        let Some(xref) = rec.xref.as_deref() else {
            tracing::warn!(line = rec.line, "INDI record without xref skipped");
            continue;
        };
        if is_media_only(rec) {
            tracing::debug!(xref, "media-only placeholder skipped");
            placeholders.push(xref.to_string());
            continue;
        }
        let idx = builder.add_person(person_from_record(xref, rec))?;
        let famcs: Vec<String> = rec
            .children_tagged("FAMC")
            .map(|f| f.value.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        if !famcs.is_empty() {
            famc_links.push((idx, famcs));
        }
    }

    let mut family_index: FxHashMap<String, usize> = FxHashMap::default();
    let mut families: Vec<Family> = Vec::new();
    for rec in records.iter().filter(|r| r.tag == "FAM") {
        let Some(xref) = rec.xref.as_deref() else {
            tracing::warn!(line = rec.line, "FAM record without xref skipped");
            continue;
        };
        let mut family = Family::new(xref);
        family.husband = rec
            .child_value("HUSB")
            .and_then(|r| resolve(&builder, xref, r));
        family.wife = rec
            .child_value("WIFE")
            .and_then(|r| resolve(&builder, xref, r));
        for chil in rec.children_tagged("CHIL") {
            if let Some(child) = resolve(&builder, xref, chil.value.trim()) {
                if !family.children.contains(&child) {
                    family.children.push(child);
                }
            }
        }
        family_index.insert(xref.to_string(), families.len());
        families.push(family);
    }

    // A FAMC pointer is authoritative for membership even when the family
    // record forgot to list the child. Only the first one decides parentage.
    let mut pins: Vec<(PersonIdx, usize)> = Vec::new();
    for (child, famcs) in &famc_links {
        for famc in famcs {
            match family_index.get(famc) {
                Some(&fam) => {
                    let family = &mut families[fam];
                    if !family.children.contains(child) {
                        family.children.push(*child);
                    }
                    if !pins.iter().any(|(c, _)| c == child) {
                        pins.push((*child, fam));
                    }
                }
                None => tracing::warn!(famc = famc.as_str(), "FAMC points to an unknown family"),
            }
        }
    }

    for family in families {
        builder.add_family(family)?;
    }
    for (child, fam) in pins {
        builder.set_parent_family(child, fam)?;
    }

    Ok(GedDocument {
        graph: builder.build(),
        placeholders,
    })
}

fn resolve(builder: &FamilyGraphBuilder, family: &str, xref: &str) -> Option<PersonIdx> {
    let found = builder.lookup(xref);
    if found.is_none() {
        tracing::warn!(family, xref, "family references an unknown individual");
    }
    found
}

fn person_from_record(xref: &str, rec: &GedNode) -> Person {
    let mut person = Person::new(xref, display_name(rec));
    person.sex = rec.child_value("SEX").map(Sex::parse).unwrap_or_default();
    person.birth_year = event_year(rec, "BIRT");
    person.death_year = event_year(rec, "DEAT");
    person
}

/// First `NAME` with surname slashes removed and spacing collapsed; falls back
/// to `GIVN`/`SURN` parts when the value itself is empty.
pub fn display_name(rec: &GedNode) -> String {
    let Some(name) = rec.child("NAME") else {
        return String::new();
    };
    let raw = if name.value.trim().is_empty() {
        [name.child_value("GIVN"), name.child_value("SURN")]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        name.value.replace('/', " ")
    };
    SPACES_RE.replace_all(raw.trim(), " ").into_owned()
}

/// First four-digit year in the `DATE` of the first `tag` event.
pub fn event_year(rec: &GedNode, tag: &str) -> Option<i32> {
    let date = rec.child(tag)?.child_value("DATE")?;
    YEAR_RE
        .captures(date)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// No name, no family links, but at least one `OBJE`: an unassociated-photo holder.
fn is_media_only(rec: &GedNode) -> bool {
    let has_name = rec.child_value("NAME").is_some();
    let has_family = rec.child("FAMC").is_some() || rec.child("FAMS").is_some();
    let has_media = rec.child("OBJE").is_some();
    !has_name && !has_family && has_media
}
