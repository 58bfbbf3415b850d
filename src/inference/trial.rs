//! Trial construction and parallel sweep execution.
//!
//! A trial is one (checker, file-or-none, parameter assignment) tuple.
//! Combinations enumerate in lexicographic order over the
//! parameter-name-sorted candidate lists, so sweeps are reproducible across
//! runs. Trials share no mutable state; each is executed on the injected
//! worker pool and evaluated against the precomputed exclusion ranges.

use super::classify::SearchSpace;
use super::evaluate::is_green;
use crate::checkers::{Checker, CheckerInput};
use crate::core::{ExclusionRange, FileDict, ParamAssignment, Scope};
use crate::errors::InferenceError;
use crossbeam::channel;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Trial {
    /// `None` for project-scoped checkers.
    pub file: Option<PathBuf>,
    pub params: ParamAssignment,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrialOutcome {
    pub trial: Trial,
    pub green: bool,
}

/// All parameter assignments of a search space, in lexicographic order of
/// the name-sorted candidate lists. An empty space yields the single empty
/// assignment.
pub fn assignments(space: &SearchSpace) -> Vec<ParamAssignment> {
    let mut acc = vec![ParamAssignment::new()];
    for (name, candidates) in &space.params {
        let mut next = Vec::with_capacity(acc.len() * candidates.len());
        for assignment in &acc {
            for value in candidates {
                let mut extended = assignment.clone();
                extended.insert(name.clone(), value.clone());
                next.push(extended);
            }
        }
        acc = next;
    }
    acc
}

/// The full trial list for one sweep: one trial per assignment for
/// project-scoped checkers, one per (file, assignment) pair for file-scoped
/// checkers, files in project order.
pub fn build_trials(
    scope: Scope,
    space: &SearchSpace,
    applicable_files: &[PathBuf],
) -> Vec<Trial> {
    let assignments = assignments(space);
    match scope {
        Scope::Project => assignments
            .into_iter()
            .map(|params| Trial { file: None, params })
            .collect(),
        Scope::File => applicable_files
            .iter()
            .flat_map(|file| {
                assignments.iter().map(move |params| Trial {
                    file: Some(file.clone()),
                    params: params.clone(),
                })
            })
            .collect(),
    }
}

/// Executes sweeps on a worker pool with explicit lifecycle, owned by the
/// run orchestrator and injected here.
pub struct TrialRunner<'a> {
    pool: &'a rayon::ThreadPool,
    timeout: Duration,
}

impl<'a> TrialRunner<'a> {
    pub fn new(pool: &'a rayon::ThreadPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Runs every trial of the sweep and evaluates greenness.
    ///
    /// Execution failures are recovered per trial (logged, non-green). A
    /// sweep that makes no progress for the configured timeout marks all
    /// outstanding trials non-green and moves on; stalled workers finish in
    /// the background and their late results are discarded.
    pub fn run_sweep(
        &self,
        checker: &Arc<dyn Checker>,
        trials: Vec<Trial>,
        files: &Arc<FileDict>,
        exclusions: &Arc<Vec<ExclusionRange>>,
    ) -> Vec<TrialOutcome> {
        let total = trials.len();
        let (tx, rx) = channel::unbounded::<(usize, bool)>();

        for (index, trial) in trials.iter().enumerate() {
            let tx = tx.clone();
            let checker = Arc::clone(checker);
            let files = Arc::clone(files);
            let exclusions = Arc::clone(exclusions);
            let trial = trial.clone();
            self.pool.spawn(move || {
                let green = execute_trial(checker.as_ref(), &trial, &files, &exclusions);
                // Receiver may be gone after a timeout; nothing to do then.
                let _ = tx.send((index, green));
            });
        }
        drop(tx);

        let mut greens = vec![None; total];
        let mut remaining = total;
        while remaining > 0 {
            match rx.recv_timeout(self.timeout) {
                Ok((index, green)) => {
                    greens[index] = Some(green);
                    remaining -= 1;
                }
                Err(channel::RecvTimeoutError::Timeout) => {
                    log::warn!(
                        "{}",
                        InferenceError::TrialTimeout {
                            checker: checker.id(),
                            seconds: self.timeout.as_secs(),
                        }
                    );
                    break;
                }
                Err(channel::RecvTimeoutError::Disconnected) => break,
            }
        }

        trials
            .into_iter()
            .zip(greens)
            .map(|(trial, green)| TrialOutcome {
                trial,
                green: green.unwrap_or(false),
            })
            .collect()
    }
}

fn execute_trial(
    checker: &dyn Checker,
    trial: &Trial,
    files: &FileDict,
    exclusions: &[ExclusionRange],
) -> bool {
    let result = match &trial.file {
        Some(path) => match files.get(path) {
            Some(content) => checker.run(
                &CheckerInput::File { path, content },
                &trial.params,
            ),
            None => Err(anyhow::anyhow!("no content for {}", path.display())),
        },
        None => checker.run(&CheckerInput::Project { files }, &trial.params),
    };

    match result {
        Ok(findings) => is_green(&findings, exclusions),
        Err(err) => {
            log::warn!(
                "{}",
                InferenceError::TrialExecutionFailure {
                    checker: checker.id(),
                    message: format!("{err:#}"),
                }
            );
            false
        }
    }
}
