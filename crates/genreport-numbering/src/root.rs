use std::fmt;
use std::str::FromStr;

use genreport_common::xref::{individual_xref, is_xref};
use genreport_common::{FamilyGraph, PersonIdx};

use crate::error::NumberingError;

/// How the caller names the root person.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RootSelector {
    /// An exact cross-reference such as `@I123@`.
    Xref(String),
    /// A bare number, looked up as `@I{n}@`.
    Number(String),
    /// The first individual in declaration order.
    #[default]
    FirstIndividual,
}

impl RootSelector {
    /// `None` and blank input select the first individual.
    pub fn parse(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            None | Some("") => RootSelector::FirstIndividual,
            Some(s) if is_xref(s) => RootSelector::Xref(s.to_string()),
            Some(s) => RootSelector::Number(s.to_string()),
        }
    }

    pub fn resolve(&self, graph: &FamilyGraph) -> Result<PersonIdx, NumberingError> {
        match self {
            RootSelector::Xref(xref) => graph.find(xref).ok_or_else(|| self.unknown()),
            RootSelector::Number(n) => graph
                .find(&individual_xref(n))
                .ok_or_else(|| self.unknown()),
            RootSelector::FirstIndividual => {
                graph.indices().next().ok_or(NumberingError::EmptyGraph)
            }
        }
    }

    fn unknown(&self) -> NumberingError {
        NumberingError::UnknownRoot {
            selector: self.to_string(),
        }
    }
}

impl FromStr for RootSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(Some(s)))
    }
}

impl fmt::Display for RootSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootSelector::Xref(s) | RootSelector::Number(s) => f.write_str(s),
            RootSelector::FirstIndividual => f.write_str("<first individual>"),
        }
    }
}
