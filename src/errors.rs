//! Error taxonomy for the inference engine.
//!
//! Classification and candidate-building failures are recovered locally:
//! the affected parameter is dropped from the search space and the error is
//! only logged. Combinatorial overflow is handled by the result aggregator's
//! cost policy. Trial execution failures are recovered per trial: the trial
//! counts as non-green and the sweep continues.

use crate::core::CheckerId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InferenceError {
    /// Catalog lookup failed for a checker/parameter pair; the parameter is
    /// excluded from the search, not defaulted.
    #[error("no catalog entry for parameter '{parameter}' of checker '{checker}'")]
    UnresolvedParameter {
        checker: CheckerId,
        parameter: String,
    },

    /// An inferred-numeric parameter with no aggregated statistic, or an
    /// unconstrained parameter without a default.
    #[error("no candidate values for parameter '{parameter}' of checker '{checker}'")]
    EmptyCandidateSet {
        checker: CheckerId,
        parameter: String,
    },

    /// The optional-parameter search exceeds the configured limits; the
    /// optional sweep is skipped and only required-only results are kept.
    #[error(
        "optional sweep for checker '{checker}' skipped: {op_count} optional parameters, \
         largest candidate set {max_candidates}"
    )]
    CombinatorialOverflow {
        checker: CheckerId,
        op_count: usize,
        max_candidates: usize,
    },

    /// A checker raised during one trial execution.
    #[error("trial of checker '{checker}' failed: {message}")]
    TrialExecutionFailure { checker: CheckerId, message: String },

    /// A trial produced no result within the configured timeout.
    #[error("trial of checker '{checker}' timed out after {seconds}s")]
    TrialTimeout { checker: CheckerId, seconds: u64 },
}
