use super::{require_u64, Checker, CheckerInput};
use crate::core::{Applicability, CheckerId, Finding, ParamAssignment, Scope, SourceSpan};
use anyhow::Result;

/// Reports files longer than `max_lines_per_file`, and shorter than
/// `min_lines_per_file` when that parameter is supplied.
pub struct FileLengthChecker;

impl Checker for FileLengthChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("file-length")
    }

    fn scope(&self) -> Scope {
        Scope::File
    }

    fn languages(&self) -> Applicability {
        Applicability::All
    }

    fn run(&self, input: &CheckerInput<'_>, params: &ParamAssignment) -> Result<Vec<Finding>> {
        let CheckerInput::File { path, content } = input else {
            anyhow::bail!("file-length is file-scoped");
        };
        let max_lines = require_u64(params, "max_lines_per_file")?;
        let min_lines = params.get("min_lines_per_file").and_then(|v| v.as_u64());

        let count = content.lines().count() as u64;
        let mut findings = Vec::new();

        if count > max_lines {
            findings.push(Finding::new(
                format!("File has {count} lines, limit is {max_lines}"),
                SourceSpan::line(*path, count as usize),
            ));
        }
        if let Some(min_lines) = min_lines {
            if count < min_lines {
                findings.push(Finding::new(
                    format!("File has {count} lines, minimum is {min_lines}"),
                    SourceSpan::line(*path, 1),
                ));
            }
        }

        Ok(findings)
    }
}
