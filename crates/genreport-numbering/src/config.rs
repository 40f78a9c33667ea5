//! YAML run configuration.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```yaml
//! connectivity: strict        # or `permissive`
//! island_preview_limit: 20
//! special_cases:
//!   start: 9001
//!   xrefs: ["@I501665@", "@I501670@"]
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use genreport_common::xref::is_xref;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::connectivity::ConnectivityPolicy;
use crate::special::{DEFAULT_SPECIAL_START, DEFAULT_SPECIAL_XREFS, SpecialCaseRegistry};

pub const DEFAULT_ISLAND_PREVIEW_LIMIT: usize = 20;

/// A single problem found while validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub path: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to read configuration {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {}", join_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SpecialCaseConfig {
    pub start: u32,
    pub xrefs: Vec<String>,
}

impl Default for SpecialCaseConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_SPECIAL_START,
            xrefs: DEFAULT_SPECIAL_XREFS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct NumberingConfig {
    pub connectivity: ConnectivityPolicy,
    /// Islands listed in a connectivity diagnostic before truncating.
    pub island_preview_limit: usize,
    pub special_cases: SpecialCaseConfig,
}

impl Default for NumberingConfig {
    fn default() -> Self {
        Self {
            connectivity: ConnectivityPolicy::default(),
            island_preview_limit: DEFAULT_ISLAND_PREVIEW_LIMIT,
            special_cases: SpecialCaseConfig::default(),
        }
    }
}

impl NumberingConfig {
    /// A blank document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_reader<R: std::io::Read>(reader: R) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Collect every problem instead of stopping at the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();

        if self.island_preview_limit == 0 {
            issues.push(ConfigIssue::new(
                "island_preview_limit",
                "must list at least one island",
            ));
        }

        let specials = &self.special_cases;
        let mut seen = FxHashSet::default();
        for (idx, xref) in specials.xrefs.iter().enumerate() {
            let path = format!("special_cases.xrefs[{idx}]");
            if !is_xref(xref) {
                issues.push(ConfigIssue::new(
                    &path,
                    format!("`{xref}` is not a cross-reference of the form @ID@"),
                ));
            }
            if !seen.insert(xref.as_str()) {
                issues.push(ConfigIssue::new(&path, format!("duplicate xref `{xref}`")));
            }
        }

        if !specials.xrefs.is_empty() {
            if specials.start == 0 {
                issues.push(ConfigIssue::new(
                    "special_cases.start",
                    "identifier 0 is reserved for the root",
                ));
            }
            let last = u64::from(specials.start) + specials.xrefs.len() as u64 - 1;
            if last > u64::from(u32::MAX) {
                issues.push(ConfigIssue::new(
                    "special_cases.start",
                    format!("range {}..={last} overflows a 32-bit identifier", specials.start),
                ));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }

    pub fn registry(&self) -> SpecialCaseRegistry {
        SpecialCaseRegistry::new(
            self.special_cases.start,
            self.special_cases.xrefs.iter().cloned(),
        )
    }
}
