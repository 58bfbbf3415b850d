use super::{optional_bool, require_bool, Checker, CheckerInput};
use crate::core::{Applicability, CheckerId, Finding, ParamAssignment, Scope, SourceSpan};
use anyhow::Result;

/// Enforces one indentation style per project: spaces when `use_spaces`,
/// tabs otherwise. Optionally flags trailing whitespace and, for
/// space-indented files, indentation widths off the `indent_size` grid.
pub struct SpaceConsistencyChecker;

impl Checker for SpaceConsistencyChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("space-consistency")
    }

    fn scope(&self) -> Scope {
        Scope::File
    }

    fn languages(&self) -> Applicability {
        Applicability::All
    }

    fn run(&self, input: &CheckerInput<'_>, params: &ParamAssignment) -> Result<Vec<Finding>> {
        let CheckerInput::File { path, content } = input else {
            anyhow::bail!("space-consistency is file-scoped");
        };
        let use_spaces = require_bool(params, "use_spaces")?;
        let allow_trailing = optional_bool(params, "allow_trailing_whitespace", false);
        let indent_size = params.get("indent_size").and_then(|v| v.as_u64());

        let mut findings = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();

            if use_spaces && indent.contains('\t') {
                findings.push(Finding::new(
                    "Tab found in indentation, expected spaces",
                    SourceSpan::line(*path, line_no),
                ));
            } else if !use_spaces && indent.contains(' ') {
                findings.push(Finding::new(
                    "Space found in indentation, expected tabs",
                    SourceSpan::line(*path, line_no),
                ));
            } else if use_spaces && !line.trim().is_empty() {
                if let Some(size) = indent_size.filter(|&s| s > 0) {
                    if indent.len() as u64 % size != 0 {
                        findings.push(Finding::new(
                            format!("Indentation of {} is not a multiple of {size}", indent.len()),
                            SourceSpan::line(*path, line_no),
                        ));
                    }
                }
            }

            if !allow_trailing && line != line.trim_end() && !line.trim().is_empty() {
                findings.push(Finding::new(
                    "Trailing whitespace",
                    SourceSpan::line(*path, line_no),
                ));
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParamValue;
    use std::path::Path;

    fn run_on(content: &str, params: &[(&str, ParamValue)]) -> Vec<Finding> {
        let params: ParamAssignment = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        SpaceConsistencyChecker
            .run(
                &CheckerInput::File {
                    path: Path::new("x.py"),
                    content,
                },
                &params,
            )
            .unwrap()
    }

    #[test]
    fn test_tab_indent_flagged_under_spaces() {
        let findings = run_on("\tindented\n", &[("use_spaces", ParamValue::Bool(true))]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].span, SourceSpan::line("x.py", 1));
    }

    #[test]
    fn test_space_indent_flagged_under_tabs() {
        let findings = run_on("  indented\n", &[("use_spaces", ParamValue::Bool(false))]);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_indent_grid() {
        let params = [
            ("use_spaces", ParamValue::Bool(true)),
            ("indent_size", ParamValue::Int(4)),
        ];
        assert!(run_on("    ok\n", &params).is_empty());
        assert_eq!(run_on("   off\n", &params).len(), 1);
    }

    #[test]
    fn test_blank_lines_are_exempt_from_the_indent_grid() {
        let params = [
            ("use_spaces", ParamValue::Bool(true)),
            ("indent_size", ParamValue::Int(4)),
            ("allow_trailing_whitespace", ParamValue::Bool(true)),
        ];
        assert!(run_on("code\n   \ncode\n", &params).is_empty());
    }

    #[test]
    fn test_trailing_whitespace() {
        let content = "code  \n";
        assert_eq!(
            run_on(content, &[("use_spaces", ParamValue::Bool(true))]).len(),
            1
        );
        let params = [
            ("use_spaces", ParamValue::Bool(true)),
            ("allow_trailing_whitespace", ParamValue::Bool(true)),
        ];
        assert!(run_on(content, &params).is_empty());
    }
}
