//! Aggregation of green assignments into the two result sets, with the
//! combinatorial cost policy deciding whether the optional-inclusive sweep
//! runs at all for a checker.

use super::classify::SearchSpace;
use super::trial::TrialOutcome;
use crate::core::{CheckerId, ParamAssignment};
use crate::errors::InferenceError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A parameter assignment proven green, with its file for file-scoped
/// checkers.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct GreenAssignment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub params: ParamAssignment,
}

/// Per-checker results. `with_optional` is absent when the cost policy
/// skipped the optional-inclusive sweep.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct CheckerResults {
    pub required_only: Vec<GreenAssignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_optional: Option<Vec<GreenAssignment>>,
}

/// All checkers' result sets, ordered by checker id.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ResultSet {
    pub checkers: BTreeMap<CheckerId, CheckerResults>,
}

/// Explosion avoidance: the optional sweep runs only when the checker's
/// optional-parameter count stays below `op_args_limit` and no optional
/// candidate set is larger than `value_to_op_args_limit`. Skipping happens
/// up front, never by truncating mid-sweep.
pub fn optional_sweep_allowed(
    optional_space: &SearchSpace,
    op_args_limit: usize,
    value_to_op_args_limit: usize,
) -> bool {
    optional_space.len() < op_args_limit
        && optional_space.max_candidates() <= value_to_op_args_limit
}

/// Collects green parameter assignments across a checker's sweeps.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    checkers: BTreeMap<CheckerId, CheckerResults>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_required(&mut self, checker: CheckerId, outcomes: &[TrialOutcome]) {
        self.checkers.entry(checker).or_default().required_only = green_assignments(outcomes);
    }

    pub fn record_optional(&mut self, checker: CheckerId, outcomes: &[TrialOutcome]) {
        self.checkers.entry(checker).or_default().with_optional =
            Some(green_assignments(outcomes));
    }

    /// Records that the cost policy skipped the optional sweep.
    pub fn record_optional_skipped(&mut self, checker: CheckerId, optional_space: &SearchSpace) {
        log::info!(
            "{}",
            InferenceError::CombinatorialOverflow {
                checker: checker.clone(),
                op_count: optional_space.len(),
                max_candidates: optional_space.max_candidates(),
            }
        );
        self.checkers.entry(checker).or_default().with_optional = None;
    }

    pub fn finish(self) -> ResultSet {
        ResultSet {
            checkers: self.checkers,
        }
    }
}

fn green_assignments(outcomes: &[TrialOutcome]) -> Vec<GreenAssignment> {
    outcomes
        .iter()
        .filter(|outcome| outcome.green)
        .map(|outcome| GreenAssignment {
            file: outcome.trial.file.clone(),
            params: outcome.trial.params.clone(),
        })
        .collect()
}
