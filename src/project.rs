//! Transient per-run project record.
//!
//! `ProjectData` is the inference state threaded through the pipeline: the
//! typed directory tree plus the aggregated statistics. It is persisted as a
//! YAML record next to the project for inspection during the run and removed
//! when the run finishes; each invocation recomputes it from scratch.

use crate::core::tree::FileTree;
use crate::stats::StatRecord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const RECORD_FILE: &str = ".greenlight_project.yaml";

#[derive(Debug, Serialize, Deserialize)]
struct RecordContents {
    dir_structure: FileTree,
    inferred_settings: StatRecord,
}

#[derive(Debug)]
pub struct ProjectData {
    record_path: PathBuf,
    pub tree: FileTree,
    pub stats: StatRecord,
}

impl ProjectData {
    /// Builds the record for this run from the filtered file set, discarding
    /// any stale record left behind by an interrupted run.
    pub fn initialize(root: &Path, files: &[PathBuf]) -> Result<Self> {
        let record_path = root.join(RECORD_FILE);
        if record_path.is_file() {
            log::debug!("removing stale record {}", record_path.display());
            std::fs::remove_file(&record_path)
                .with_context(|| format!("Failed to remove stale {}", record_path.display()))?;
        }

        let data = Self {
            record_path,
            tree: FileTree::from_paths(root, files),
            stats: StatRecord::new(),
        };
        data.persist()?;
        Ok(data)
    }

    pub fn persist(&self) -> Result<()> {
        let contents = RecordContents {
            dir_structure: self.tree.clone(),
            inferred_settings: self.stats.clone(),
        };
        let raw = serde_yaml::to_string(&contents).context("Failed to serialize project record")?;
        std::fs::write(&self.record_path, raw)
            .with_context(|| format!("Failed to write {}", self.record_path.display()))?;
        Ok(())
    }

    /// Final dump and removal; the record is a cache, not durable state.
    pub fn finish(self) -> Result<()> {
        self.persist()?;
        std::fs::remove_file(&self.record_path)
            .with_context(|| format!("Failed to remove {}", self.record_path.display()))
    }

    #[cfg(test)]
    fn load(root: &Path) -> Result<Self> {
        let record_path = root.join(RECORD_FILE);
        let raw = std::fs::read_to_string(&record_path)?;
        let contents: RecordContents = serde_yaml::from_str(&raw)?;
        Ok(Self {
            record_path,
            tree: contents.dir_structure,
            stats: contents.inferred_settings,
        })
    }
}
