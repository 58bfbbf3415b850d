use super::{optional_bool, Checker, CheckerInput};
use crate::core::{Applicability, CheckerId, Finding, ParamAssignment, Scope, SourceSpan};
use anyhow::Result;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Project-scoped checker reporting files whose contents are byte-identical
/// to an earlier file. `ignore_empty` exempts empty files from grouping.
pub struct DuplicateFilesChecker;

impl Checker for DuplicateFilesChecker {
    fn id(&self) -> CheckerId {
        CheckerId::new("duplicate-files")
    }

    fn scope(&self) -> Scope {
        Scope::Project
    }

    fn languages(&self) -> Applicability {
        Applicability::All
    }

    fn run(&self, input: &CheckerInput<'_>, params: &ParamAssignment) -> Result<Vec<Finding>> {
        let CheckerInput::Project { files } = input else {
            anyhow::bail!("duplicate-files is project-scoped");
        };
        let ignore_empty = optional_bool(params, "ignore_empty", false);

        let mut groups: BTreeMap<String, Vec<&PathBuf>> = BTreeMap::new();
        for (path, content) in files.iter() {
            if ignore_empty && content.is_empty() {
                continue;
            }
            let digest = format!("{:x}", Sha256::digest(content.as_bytes()));
            groups.entry(digest).or_default().push(path);
        }

        let findings = groups
            .values()
            .filter(|paths| paths.len() > 1)
            .flat_map(|paths| {
                let first = paths[0].clone();
                paths[1..].iter().map(move |path| {
                    Finding::new(
                        format!("File duplicates {}", first.display()),
                        SourceSpan::line(path.as_path(), 1),
                    )
                })
            })
            .collect();

        Ok(findings)
    }
}
