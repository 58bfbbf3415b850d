// Export modules for library usage
pub mod catalog;
pub mod checkers;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod exclusions;
pub mod inference;
pub mod io;
pub mod project;
pub mod stats;

// Re-export commonly used types
pub use crate::core::{
    Applicability, CheckerId, ExclusionRange, FileDict, Finding, Language, ParamAssignment,
    ParamValue, Scope, SourceSpan,
};

pub use crate::catalog::{CheckerCatalog, CheckerCatalogEntry, ParamEntry, ParamSpec};

pub use crate::checkers::{builtin_checkers, Checker, CheckerInput};

pub use crate::config::GreenlightConfig;

pub use crate::errors::InferenceError;

pub use crate::inference::{
    classify::{build_candidates, classify, search_space, ParamSelection, SearchSpace},
    evaluate::is_green,
    infer,
    results::{optional_sweep_allowed, CheckerResults, GreenAssignment, ResultSet},
    trial::{assignments, build_trials, Trial, TrialOutcome, TrialRunner},
};

pub use crate::stats::{StatFamily, StatRecord};
