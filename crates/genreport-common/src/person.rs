use std::fmt::{self, Display};

use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense arena index of a person inside one [`crate::FamilyGraph`].
///
/// Indices are only meaningful for the graph that produced them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PersonIdx(pub(crate) u32);

impl PersonIdx {
    pub fn from_index(idx: usize) -> Self {
        Self(idx as u32)
    }

    #[inline]
    pub fn as_index(self) -> usize {
        self.0 as usize
    }
}

impl Display for PersonIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    /// Parse a GEDCOM `SEX` value. Anything but `M`/`F` is unknown.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" => Self::Male,
            "F" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

/// Vital data a person carries into the numbering engine.
///
/// Relationship links are filled in by [`crate::FamilyGraphBuilder::build`];
/// a freshly declared person has none.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub xref: String,
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub sex: Sex,
    pub(crate) parents: SmallVec<[PersonIdx; 2]>,
    pub(crate) other_parents: Vec<PersonIdx>,
    pub(crate) spouses: Vec<PersonIdx>,
    pub(crate) children: Vec<PersonIdx>,
}

impl Person {
    pub fn new(xref: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            xref: xref.into(),
            name: name.into(),
            birth_year: None,
            death_year: None,
            sex: Sex::Unknown,
            parents: SmallVec::new(),
            other_parents: Vec::new(),
            spouses: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    pub fn with_death_year(mut self, year: i32) -> Self {
        self.death_year = Some(year);
        self
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    /// Father first, then mother, when both are known.
    pub fn parents(&self) -> &[PersonIdx] {
        &self.parents
    }

    /// Partners of every other family listing this person as a child,
    /// e.g. adoptive or step parents. Never overlaps [`parents`](Self::parents).
    pub fn other_parents(&self) -> &[PersonIdx] {
        &self.other_parents
    }

    pub fn spouses(&self) -> &[PersonIdx] {
        &self.spouses
    }

    pub fn children(&self) -> &[PersonIdx] {
        &self.children
    }

    /// `Name 1850-1920`, `Name 1850-`, `Name -1920` or just `Name`.
    ///
    /// Falls back to the xref when the record carries no name.
    pub fn label(&self) -> String {
        let name = if self.name.is_empty() {
            self.xref.as_str()
        } else {
            self.name.as_str()
        };
        match life_span(self.birth_year, self.death_year) {
            Some(years) => format!("{name} {years}"),
            None => name.to_string(),
        }
    }
}

/// Dashed year span used in headers and diagnostics.
pub fn life_span(birth: Option<i32>, death: Option<i32>) -> Option<String> {
    match (birth, death) {
        (Some(b), Some(d)) => Some(format!("{b}-{d}")),
        (Some(b), None) => Some(format!("{b}-")),
        (None, Some(d)) => Some(format!("-{d}")),
        (None, None) => None,
    }
}
