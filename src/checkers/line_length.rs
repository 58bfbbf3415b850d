use super::{optional_bool, require_u64, Checker, CheckerInput};
use crate::core::{Applicability, CheckerId, Finding, ParamAssignment, Scope, SourceSpan};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("valid URL regex"));

/// Reports lines longer than `max_line_length` characters. With
/// `ignore_urls`, lines carrying a URL are exempt.
pub struct LineLengthChecker;

impl Checker for LineLengthChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("line-length")
    }

    fn scope(&self) -> Scope {
        Scope::File
    }

    fn languages(&self) -> Applicability {
        Applicability::All
    }

    fn run(&self, input: &CheckerInput<'_>, params: &ParamAssignment) -> Result<Vec<Finding>> {
        let CheckerInput::File { path, content } = input else {
            anyhow::bail!("line-length is file-scoped");
        };
        let max_length = require_u64(params, "max_line_length")?;
        let ignore_urls = optional_bool(params, "ignore_urls", false);

        let findings = content
            .lines()
            .enumerate()
            .filter(|(_, line)| line.chars().count() as u64 > max_length)
            .filter(|(_, line)| !(ignore_urls && URL_REGEX.is_match(line)))
            .map(|(idx, line)| {
                Finding::new(
                    format!(
                        "Line is {} chars long, limit is {max_length}",
                        line.chars().count()
                    ),
                    SourceSpan::line(*path, idx + 1),
                )
            })
            .collect();

        Ok(findings)
    }
}
