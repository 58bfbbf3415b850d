//! Project file enumeration: directory walk honoring `.gitignore`, user
//! ignore globs applied on top, `.git` and the transient project record
//! always excluded. Output is sorted so the file set is identical across
//! runs.

use crate::core::FileDict;
use crate::project::RECORD_FILE;
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

pub struct FileWalker {
    root: PathBuf,
    ignore_patterns: Vec<glob::Pattern>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ignore_patterns: Vec::new(),
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.ignore_patterns = patterns
            .iter()
            .map(|p| {
                glob::Pattern::new(p).with_context(|| format!("Invalid ignore pattern '{p}'"))
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let root = self
            .root
            .canonicalize()
            .with_context(|| format!("Failed to resolve project root {}", self.root.display()))?;

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        if path.components().any(|c| c.as_os_str() == ".git") {
            return false;
        }
        // A record left by an interrupted run must never enter the file set.
        if path.file_name().is_some_and(|name| name == RECORD_FILE) {
            return false;
        }
        let path_str = path.to_string_lossy();
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.matches(&path_str))
    }
}

/// The filtered, ordered, absolute file list for one run.
pub fn project_files(root: &Path, ignore_patterns: &[String]) -> Result<Vec<PathBuf>> {
    FileWalker::new(root.to_path_buf())
        .with_ignore_patterns(ignore_patterns)?
        .walk()
}

/// Reads every project file into memory. Files that are not valid UTF-8 are
/// read lossily so raw files still flow through the universal pass.
pub fn read_files(paths: &[PathBuf]) -> Result<FileDict> {
    let mut files = FileDict::new();
    for path in paths {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        files.insert(path.clone(), String::from_utf8_lossy(&bytes).into_owned());
    }
    Ok(files)
}
