//! Static catalog of checker parameter metadata.
//!
//! The catalog is the read-only table the classifier consults: one entry per
//! checker identity, one [`ParamSpec`] per parameter, plus the numeric
//! defaults used by the statistics clamp. Lookup is by stable checker id,
//! never by name matching.

use crate::core::{CheckerId, ParamValue, Scope};
use crate::stats::{StatFamily, MAX_LINES_PER_FILE, MAX_LINE_LENGTH, MIN_LINES_PER_FILE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Kind and kind-specific data of one parameter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamSpec {
    /// Searched over `{true, false}`.
    Bool,
    /// Seeded from the aggregated statistic with the same name.
    InferredNumeric,
    /// Searched over a fixed candidate list.
    Enumerated { choices: Vec<ParamValue> },
    /// Not searched; the catalog default is used verbatim when present.
    Unconstrained { default: Option<ParamValue> },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ParamEntry {
    /// Required parameters are needed for the checker to run at all;
    /// optional ones refine its behavior.
    pub required: bool,
    pub spec: ParamSpec,
}

impl ParamEntry {
    pub fn required(spec: ParamSpec) -> Self {
        Self {
            spec,
            required: true,
        }
    }

    pub fn optional(spec: ParamSpec) -> Self {
        Self {
            spec,
            required: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CheckerCatalogEntry {
    pub scope: Scope,
    #[serde(default)]
    pub params: BTreeMap<String, ParamEntry>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatDefault {
    pub family: StatFamily,
    pub value: u64,
}

/// Read-only registry keyed by checker identity.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckerCatalog {
    #[serde(default)]
    entries: BTreeMap<CheckerId, CheckerCatalogEntry>,
    #[serde(default)]
    stat_defaults: BTreeMap<String, StatDefault>,
}

impl CheckerCatalog {
    /// The built-in catalog covering the built-in checker registry.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();

        entries.insert(
            CheckerId::new("line-length"),
            CheckerCatalogEntry {
                scope: Scope::File,
                params: BTreeMap::from([
                    (
                        MAX_LINE_LENGTH.to_string(),
                        ParamEntry::required(ParamSpec::InferredNumeric),
                    ),
                    (
                        "ignore_urls".to_string(),
                        ParamEntry::optional(ParamSpec::Bool),
                    ),
                ]),
            },
        );

        entries.insert(
            CheckerId::new("file-length"),
            CheckerCatalogEntry {
                scope: Scope::File,
                params: BTreeMap::from([
                    (
                        MAX_LINES_PER_FILE.to_string(),
                        ParamEntry::required(ParamSpec::InferredNumeric),
                    ),
                    (
                        MIN_LINES_PER_FILE.to_string(),
                        ParamEntry::optional(ParamSpec::InferredNumeric),
                    ),
                ]),
            },
        );

        entries.insert(
            CheckerId::new("space-consistency"),
            CheckerCatalogEntry {
                scope: Scope::File,
                params: BTreeMap::from([
                    (
                        "use_spaces".to_string(),
                        ParamEntry::required(ParamSpec::Bool),
                    ),
                    (
                        "allow_trailing_whitespace".to_string(),
                        ParamEntry::optional(ParamSpec::Bool),
                    ),
                    (
                        "indent_size".to_string(),
                        ParamEntry::optional(ParamSpec::Enumerated {
                            choices: vec![
                                ParamValue::Int(2),
                                ParamValue::Int(4),
                                ParamValue::Int(8),
                            ],
                        }),
                    ),
                ]),
            },
        );

        entries.insert(
            CheckerId::new("duplicate-files"),
            CheckerCatalogEntry {
                scope: Scope::Project,
                params: BTreeMap::from([(
                    "ignore_empty".to_string(),
                    ParamEntry::optional(ParamSpec::Bool),
                )]),
            },
        );

        let stat_defaults = BTreeMap::from([
            (
                MAX_LINE_LENGTH.to_string(),
                StatDefault {
                    family: StatFamily::Max,
                    value: 80,
                },
            ),
            (
                MAX_LINES_PER_FILE.to_string(),
                StatDefault {
                    family: StatFamily::Max,
                    value: 1000,
                },
            ),
            (
                MIN_LINES_PER_FILE.to_string(),
                StatDefault {
                    family: StatFamily::Min,
                    value: 1,
                },
            ),
        ]);

        Self {
            entries,
            stat_defaults,
        }
    }

    /// An empty catalog, for callers assembling their own entries.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, id: CheckerId, entry: CheckerCatalogEntry) -> Self {
        self.entries.insert(id, entry);
        self
    }

    pub fn with_stat_default(mut self, name: impl Into<String>, default: StatDefault) -> Self {
        self.stat_defaults.insert(name.into(), default);
        self
    }

    /// Loads a catalog override from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog file {}", path.display()))
    }

    pub fn entry(&self, id: &CheckerId) -> Option<&CheckerCatalogEntry> {
        self.entries.get(id)
    }

    /// Numeric defaults driving the statistics clamp.
    pub fn stat_defaults(&self) -> impl Iterator<Item = (&str, StatFamily, u64)> {
        self.stat_defaults
            .iter()
            .map(|(name, d)| (name.as_str(), d.family, d.value))
    }
}
