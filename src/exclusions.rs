//! Exclusion-range provider.
//!
//! Findings inside these ranges are disregarded by the green evaluator.
//! Ranges come from in-source directives, written in any comment syntax:
//!
//! - `greenlight: ignore-start` ... `greenlight: ignore-end` covers the
//!   block between the two markers, inclusive. An unclosed start extends
//!   to the end of the file.
//! - `greenlight: ignore` covers that single line.
//!
//! Computed once per run, after project-file filtering.

use crate::core::{ExclusionRange, FileDict};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static IGNORE_START_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"greenlight:\s*ignore-start\b").expect("valid directive regex"));
static IGNORE_END_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"greenlight:\s*ignore-end\b").expect("valid directive regex"));
static IGNORE_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"greenlight:\s*ignore(\s*$|\s+[^-])").expect("valid directive regex"));

/// Scans every file for ignore directives and returns the resulting ranges.
pub fn exclusion_ranges(files: &FileDict) -> Vec<ExclusionRange> {
    files
        .iter()
        .flat_map(|(path, content)| file_ranges(path, content))
        .collect()
}

fn file_ranges(path: &Path, content: &str) -> Vec<ExclusionRange> {
    let mut ranges = Vec::new();
    let mut open_block: Option<usize> = None;
    let mut last_line = 0;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;

        if IGNORE_START_REGEX.is_match(line) {
            if open_block.is_none() {
                open_block = Some(line_no);
            }
        } else if IGNORE_END_REGEX.is_match(line) {
            if let Some(start) = open_block.take() {
                ranges.push(ExclusionRange::new(path, start, line_no));
            } else {
                log::warn!(
                    "{}:{line_no}: ignore-end without matching ignore-start",
                    path.display()
                );
            }
        } else if IGNORE_LINE_REGEX.is_match(line) {
            ranges.push(ExclusionRange::new(path, line_no, line_no));
        }
    }

    if let Some(start) = open_block {
        log::warn!(
            "{}:{start}: unclosed ignore-start, ignoring through end of file",
            path.display()
        );
        ranges.push(ExclusionRange::new(path, start, last_line));
    }

    ranges
}
