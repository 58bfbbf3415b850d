//! Parameter classification and candidate-set construction.
//!
//! Classification is a catalog lookup by checker identity; a missing
//! checker or parameter yields `None` and the parameter is excluded from
//! the search, never defaulted. Candidate sets are ordered; inferred-numeric
//! parameters are singletons seeded from the aggregated statistics (a
//! list-valued inferred parameter cannot be represented).

use crate::catalog::{CheckerCatalog, ParamSpec};
use crate::core::{CheckerId, ParamValue};
use crate::errors::InferenceError;
use crate::stats::StatRecord;
use std::collections::BTreeMap;

/// Which parameters of a checker to include in a search space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamSelection {
    Required,
    Optional,
}

/// The concrete search space for one sweep: candidate values per parameter,
/// ordered by parameter name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchSpace {
    pub params: BTreeMap<String, Vec<ParamValue>>,
}

impl SearchSpace {
    /// Required and optional spaces merged for the unified sweep.
    pub fn merged(&self, other: &SearchSpace) -> SearchSpace {
        let mut params = self.params.clone();
        params.extend(other.params.clone());
        SearchSpace { params }
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Size of the largest candidate set, 0 when empty.
    pub fn max_candidates(&self) -> usize {
        self.params.values().map(Vec::len).max().unwrap_or(0)
    }
}

/// Looks up the kind and data of one parameter. `None` when the checker or
/// the parameter has no catalog entry.
pub fn classify<'a>(
    catalog: &'a CheckerCatalog,
    checker: &CheckerId,
    parameter: &str,
) -> Option<&'a ParamSpec> {
    catalog
        .entry(checker)
        .and_then(|entry| entry.params.get(parameter))
        .map(|param| &param.spec)
}

/// Turns a classified parameter into its ordered candidate values. `None`
/// means the parameter is skipped (no statistic for an inferred-numeric
/// parameter, or an unconstrained parameter without a default).
pub fn build_candidates(
    name: &str,
    spec: &ParamSpec,
    stats: &StatRecord,
) -> Option<Vec<ParamValue>> {
    match spec {
        ParamSpec::Bool => Some(vec![ParamValue::Bool(true), ParamValue::Bool(false)]),
        ParamSpec::InferredNumeric => stats.get(name).map(|value| vec![ParamValue::Int(value)]),
        ParamSpec::Enumerated { choices } => Some(choices.clone()),
        ParamSpec::Unconstrained { default } => default.clone().map(|value| vec![value]),
    }
}

/// Assembles the search space over a checker's required or optional
/// parameters. Classification and candidate failures drop the parameter
/// and are logged, not propagated.
pub fn search_space(
    catalog: &CheckerCatalog,
    checker: &CheckerId,
    stats: &StatRecord,
    selection: ParamSelection,
) -> SearchSpace {
    let Some(entry) = catalog.entry(checker) else {
        log::debug!("checker {checker} has no catalog entry, searching without parameters");
        return SearchSpace::default();
    };

    let mut params = BTreeMap::new();
    for (name, param) in &entry.params {
        let wanted = match selection {
            ParamSelection::Required => param.required,
            ParamSelection::Optional => !param.required,
        };
        if !wanted {
            continue;
        }
        match classify(catalog, checker, name) {
            None => {
                log::warn!(
                    "{}",
                    InferenceError::UnresolvedParameter {
                        checker: checker.clone(),
                        parameter: name.clone(),
                    }
                );
            }
            Some(spec) => match build_candidates(name, spec, stats) {
                Some(candidates) => {
                    params.insert(name.clone(), candidates);
                }
                None => {
                    log::warn!(
                        "{}",
                        InferenceError::EmptyCandidateSet {
                            checker: checker.clone(),
                            parameter: name.clone(),
                        }
                    );
                }
            },
        }
    }
    SearchSpace { params }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{StatFamily, MAX_LINE_LENGTH};

    fn stats_with_line_length(value: u64) -> StatRecord {
        let mut stats = StatRecord::new();
        stats.update(StatFamily::Max, MAX_LINE_LENGTH, value);
        stats
    }

    #[test]
    fn test_classify_known_parameter() {
        let catalog = CheckerCatalog::builtin();
        let spec = classify(&catalog, &CheckerId::new("line-length"), MAX_LINE_LENGTH);
        assert_eq!(spec, Some(&ParamSpec::InferredNumeric));
    }

    #[test]
    fn test_classify_unknown_checker_or_parameter() {
        let catalog = CheckerCatalog::builtin();
        assert!(classify(&catalog, &CheckerId::new("nope"), MAX_LINE_LENGTH).is_none());
        assert!(classify(&catalog, &CheckerId::new("line-length"), "nope").is_none());
    }

    #[test]
    fn test_bool_candidates() {
        let candidates = build_candidates("x", &ParamSpec::Bool, &StatRecord::new());
        assert_eq!(
            candidates,
            Some(vec![ParamValue::Bool(true), ParamValue::Bool(false)])
        );
    }

    #[test]
    fn test_inferred_numeric_singleton() {
        let stats = stats_with_line_length(120);
        let candidates = build_candidates(MAX_LINE_LENGTH, &ParamSpec::InferredNumeric, &stats);
        assert_eq!(candidates, Some(vec![ParamValue::Int(120)]));
    }

    #[test]
    fn test_inferred_numeric_missing_statistic_skips() {
        let candidates =
            build_candidates(MAX_LINE_LENGTH, &ParamSpec::InferredNumeric, &StatRecord::new());
        assert_eq!(candidates, None);
    }

    #[test]
    fn test_enumerated_verbatim() {
        let choices = vec![ParamValue::Int(2), ParamValue::Int(4)];
        let spec = ParamSpec::Enumerated {
            choices: choices.clone(),
        };
        assert_eq!(build_candidates("x", &spec, &StatRecord::new()), Some(choices));
    }

    #[test]
    fn test_unconstrained_default_or_skip() {
        let with_default = ParamSpec::Unconstrained {
            default: Some(ParamValue::Str("auto".into())),
        };
        assert_eq!(
            build_candidates("x", &with_default, &StatRecord::new()),
            Some(vec![ParamValue::Str("auto".into())])
        );
        let without = ParamSpec::Unconstrained { default: None };
        assert_eq!(build_candidates("x", &without, &StatRecord::new()), None);
    }

    #[test]
    fn test_search_space_required_only() {
        let catalog = CheckerCatalog::builtin();
        let stats = stats_with_line_length(120);
        let space = search_space(
            &catalog,
            &CheckerId::new("line-length"),
            &stats,
            ParamSelection::Required,
        );
        assert_eq!(space.len(), 1);
        assert_eq!(
            space.params[MAX_LINE_LENGTH],
            vec![ParamValue::Int(120)]
        );
    }

    #[test]
    fn test_search_space_drops_uninferrable_parameter() {
        let catalog = CheckerCatalog::builtin();
        let space = search_space(
            &catalog,
            &CheckerId::new("line-length"),
            &StatRecord::new(),
            ParamSelection::Required,
        );
        assert!(space.is_empty());
    }

    #[test]
    fn test_search_space_unknown_checker_is_empty() {
        let catalog = CheckerCatalog::builtin();
        let space = search_space(
            &catalog,
            &CheckerId::new("nope"),
            &StatRecord::new(),
            ParamSelection::Required,
        );
        assert!(space.is_empty());
    }

    #[test]
    fn test_optional_space_of_space_consistency() {
        let catalog = CheckerCatalog::builtin();
        let space = search_space(
            &catalog,
            &CheckerId::new("space-consistency"),
            &StatRecord::new(),
            ParamSelection::Optional,
        );
        assert_eq!(space.len(), 2);
        assert_eq!(space.max_candidates(), 3);
    }
}
