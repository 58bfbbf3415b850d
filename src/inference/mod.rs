//! Green-configuration inference pipeline.
//!
//! One run: enumerate and read the project files, build the transient
//! project record, aggregate statistics and clamp them against the catalog
//! defaults, compute exclusion ranges, then sweep every checker — the
//! required-only pass always, the optional-inclusive pass when the cost
//! policy allows it — collecting green assignments into the result sets.

pub mod classify;
pub mod evaluate;
pub mod results;
pub mod trial;

use crate::catalog::CheckerCatalog;
use crate::checkers::Checker;
use crate::config::GreenlightConfig;
use crate::core::{Language, Scope};
use crate::project::ProjectData;
use crate::{exclusions, io, stats};
use anyhow::{Context, Result};
use self::classify::{search_space, ParamSelection};
use self::results::{optional_sweep_allowed, ResultAggregator, ResultSet};
use self::trial::{build_trials, TrialRunner};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Runs the full inference over one project and returns the per-checker
/// result sets. The worker pool lives exactly as long as this call.
pub fn infer(
    project_dir: &Path,
    config: &GreenlightConfig,
    catalog: &CheckerCatalog,
    checkers: &[Arc<dyn Checker>],
) -> Result<ResultSet> {
    let project_dir = project_dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve project root {}", project_dir.display()))?;
    let file_set = io::walker::project_files(&project_dir, &config.ignore)?;
    log::info!("analyzing {} files under {}", file_set.len(), project_dir.display());

    let mut project = ProjectData::initialize(&project_dir, &file_set)?;
    let files = Arc::new(io::walker::read_files(&file_set)?);

    project.stats = stats::aggregate(&files);
    project.stats.finalize(catalog.stat_defaults());
    project.persist()?;

    let exclusions = Arc::new(exclusions::exclusion_ranges(&files));
    log::debug!("{} exclusion ranges", exclusions.len());

    let workers = config.worker_count();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("Failed to build worker pool")?;
    let runner = TrialRunner::new(&pool, config.trial_timeout());
    log::debug!("worker pool of {workers} threads");

    let mut aggregator = ResultAggregator::new();
    for checker in checkers {
        let id = checker.id();
        if let Some(entry) = catalog.entry(&id) {
            if entry.scope != checker.scope() {
                anyhow::bail!(
                    "catalog declares checker '{id}' as {:?}-scoped but its implementation is {:?}-scoped",
                    entry.scope,
                    checker.scope()
                );
            }
        }
        let applicable = applicable_files(checker.as_ref(), &file_set);
        if checker.scope() == Scope::File && applicable.is_empty() {
            log::info!("skipping {id}: no applicable files");
            continue;
        }

        let required = search_space(catalog, &id, &project.stats, ParamSelection::Required);
        let optional = search_space(catalog, &id, &project.stats, ParamSelection::Optional);

        log::info!("finding green values for necessary settings of {id}");
        let outcomes = runner.run_sweep(
            checker,
            build_trials(checker.scope(), &required, &applicable),
            &files,
            &exclusions,
        );
        aggregator.record_required(id.clone(), &outcomes);

        if optional_sweep_allowed(&optional, config.op_args_limit, config.value_to_op_args_limit) {
            log::info!("finding green values for all settings of {id}");
            let unified = required.merged(&optional);
            let outcomes = runner.run_sweep(
                checker,
                build_trials(checker.scope(), &unified, &applicable),
                &files,
                &exclusions,
            );
            aggregator.record_optional(id, &outcomes);
        } else {
            aggregator.record_optional_skipped(id, &optional);
        }
    }

    project.finish()?;
    Ok(aggregator.finish())
}

/// The checker's applicable-language subset of the project file set, in
/// project order.
fn applicable_files(checker: &dyn Checker, file_set: &[PathBuf]) -> Vec<PathBuf> {
    file_set
        .iter()
        .filter(|path| checker.languages().matches(Language::from_path(path)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Applicability, CheckerId};

    struct COnly;

    impl Checker for COnly {
        fn id(&self) -> CheckerId {
            CheckerId::new("c-only")
        }
        fn scope(&self) -> Scope {
            Scope::File
        }
        fn languages(&self) -> Applicability {
            Applicability::Languages(&[Language::C])
        }
        fn run(
            &self,
            _: &crate::checkers::CheckerInput<'_>,
            _: &crate::core::ParamAssignment,
        ) -> Result<Vec<crate::core::Finding>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_applicable_files_filters_by_language() {
        let files = vec![
            PathBuf::from("/p/a.c"),
            PathBuf::from("/p/b.py"),
            PathBuf::from("/p/notes.txt"),
        ];
        let applicable = applicable_files(&COnly, &files);
        assert_eq!(applicable, vec![PathBuf::from("/p/a.c")]);
    }
}
