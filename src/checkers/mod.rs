use crate::core::{Applicability, CheckerId, FileDict, Finding, ParamAssignment, Scope};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod duplicate_files;
pub mod file_length;
pub mod line_length;
pub mod space_consistency;

pub use duplicate_files::DuplicateFilesChecker;
pub use file_length::FileLengthChecker;
pub use line_length::LineLengthChecker;
pub use space_consistency::SpaceConsistencyChecker;

/// What one checker execution sees: a single file for file-scoped checkers,
/// the whole project for project-scoped ones.
pub enum CheckerInput<'a> {
    File { path: &'a Path, content: &'a str },
    Project { files: &'a FileDict },
}

/// A pluggable analysis rule. Implementations must be pure functions of
/// their input and parameters; trials may run them concurrently.
pub trait Checker: Send + Sync {
    fn id(&self) -> CheckerId;
    fn scope(&self) -> Scope;
    fn languages(&self) -> Applicability;
    fn run(&self, input: &CheckerInput<'_>, params: &ParamAssignment) -> Result<Vec<Finding>>;
}

/// The built-in checker registry, ordered by id.
pub fn builtin_checkers() -> Vec<Arc<dyn Checker>> {
    vec![
        Arc::new(DuplicateFilesChecker),
        Arc::new(FileLengthChecker),
        Arc::new(LineLengthChecker),
        Arc::new(SpaceConsistencyChecker),
    ]
}

pub(crate) fn require_u64(params: &ParamAssignment, name: &str) -> Result<u64> {
    params
        .get(name)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| anyhow::anyhow!("missing required numeric parameter '{name}'"))
}

pub(crate) fn require_bool(params: &ParamAssignment, name: &str) -> Result<bool> {
    params
        .get(name)
        .and_then(|v| v.as_bool())
        .ok_or_else(|| anyhow::anyhow!("missing required boolean parameter '{name}'"))
}

pub(crate) fn optional_bool(params: &ParamAssignment, name: &str, fallback: bool) -> bool {
    params
        .get(name)
        .and_then(|v| v.as_bool())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_ordered_by_id() {
        let checkers = builtin_checkers();
        let ids: Vec<String> = checkers.iter().map(|c| c.id().to_string()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_param_helpers() {
        let mut params = ParamAssignment::new();
        params.insert("n".into(), crate::core::ParamValue::Int(3));
        assert_eq!(require_u64(&params, "n").unwrap(), 3);
        assert!(require_u64(&params, "missing").is_err());
        assert!(require_bool(&params, "n").is_err());
        assert!(!optional_bool(&params, "missing", false));
    }
}
