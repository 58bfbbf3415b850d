//! Streaming numeric reduction over the project file set.
//!
//! Every file passes through a single universal analysis pass that yields
//! named observations; the aggregator keeps a running max or min per
//! statistic. After the full scan, each statistic is clamped against its
//! catalog default in the looser-is-safer direction for its family.

use crate::core::FileDict;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

pub const MAX_LINE_LENGTH: &str = "max_line_length";
pub const MAX_LINES_PER_FILE: &str = "max_lines_per_file";
pub const MIN_LINES_PER_FILE: &str = "min_lines_per_file";

/// Reduction direction of a statistic. Max-family values only increase
/// across the scan, min-family values only decrease.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatFamily {
    Max,
    Min,
}

/// Running aggregated value per statistic name.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatRecord {
    values: BTreeMap<String, u64>,
}

impl StatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one observation into the record. The first observation for a
    /// name always stores; later ones replace only in the family direction.
    pub fn update(&mut self, family: StatFamily, name: &str, observed: u64) {
        match self.values.entry(name.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(observed);
            }
            Entry::Occupied(mut slot) => {
                let current = slot.get_mut();
                let replace = match family {
                    StatFamily::Max => observed > *current,
                    StatFamily::Min => observed < *current,
                };
                if replace {
                    *current = observed;
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.values.get(name).copied()
    }

    /// Applies the family-consistent clamp against catalog defaults,
    /// uniformly for every tracked statistic. A statistic with no
    /// observation reports its default.
    pub fn finalize<'a>(
        &mut self,
        defaults: impl IntoIterator<Item = (&'a str, StatFamily, u64)>,
    ) {
        for (name, family, default) in defaults {
            let clamped = match (self.values.get(name), family) {
                (None, _) => default,
                (Some(&value), StatFamily::Max) => value.max(default),
                (Some(&value), StatFamily::Min) => value.min(default),
            };
            if self.values.get(name) != Some(&clamped) {
                log::debug!("statistic {name} clamped to {clamped} (default {default})");
            }
            self.values.insert(name.to_string(), clamped);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// The universal per-file pass: named observations derived from one file's
/// contents, fed straight into the aggregator.
pub fn observe_file(content: &str) -> Vec<(StatFamily, &'static str, u64)> {
    let lines = content.lines().count() as u64;
    let longest = content
        .lines()
        .map(|line| line.chars().count() as u64)
        .max()
        .unwrap_or(0);

    vec![
        (StatFamily::Max, MAX_LINE_LENGTH, longest),
        (StatFamily::Max, MAX_LINES_PER_FILE, lines),
        (StatFamily::Min, MIN_LINES_PER_FILE, lines),
    ]
}

/// Runs the universal pass over every file and reduces the observations.
pub fn aggregate(files: &FileDict) -> StatRecord {
    let mut record = StatRecord::new();
    for content in files.values() {
        for (family, name, value) in observe_file(content) {
            record.update(family, name, value);
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    #[test]
    fn test_first_observation_always_stores() {
        let mut record = StatRecord::new();
        record.update(StatFamily::Max, MAX_LINE_LENGTH, 7);
        assert_eq!(record.get(MAX_LINE_LENGTH), Some(7));
        let mut record = StatRecord::new();
        record.update(StatFamily::Min, MIN_LINES_PER_FILE, 7);
        assert_eq!(record.get(MIN_LINES_PER_FILE), Some(7));
    }

    #[test]
    fn test_max_family_is_monotone() {
        let mut record = StatRecord::new();
        for value in [10, 3, 25, 24] {
            record.update(StatFamily::Max, MAX_LINE_LENGTH, value);
        }
        assert_eq!(record.get(MAX_LINE_LENGTH), Some(25));
    }

    #[test]
    fn test_min_family_is_monotone() {
        let mut record = StatRecord::new();
        for value in [10, 3, 25, 4] {
            record.update(StatFamily::Min, MIN_LINES_PER_FILE, value);
        }
        assert_eq!(record.get(MIN_LINES_PER_FILE), Some(3));
    }

    #[test]
    fn test_finalize_floors_max_family_at_default() {
        let mut record = StatRecord::new();
        record.update(StatFamily::Max, MAX_LINE_LENGTH, 120);
        record.finalize([(MAX_LINE_LENGTH, StatFamily::Max, 80)]);
        assert_eq!(record.get(MAX_LINE_LENGTH), Some(120));

        let mut record = StatRecord::new();
        record.update(StatFamily::Max, MAX_LINE_LENGTH, 40);
        record.finalize([(MAX_LINE_LENGTH, StatFamily::Max, 80)]);
        assert_eq!(record.get(MAX_LINE_LENGTH), Some(80));
    }

    #[test]
    fn test_finalize_caps_min_family_at_default() {
        let mut record = StatRecord::new();
        record.update(StatFamily::Min, MIN_LINES_PER_FILE, 5);
        record.finalize([(MIN_LINES_PER_FILE, StatFamily::Min, 1)]);
        assert_eq!(record.get(MIN_LINES_PER_FILE), Some(1));
    }

    #[test]
    fn test_finalize_reports_default_when_never_observed() {
        let mut record = StatRecord::new();
        record.finalize([(MAX_LINE_LENGTH, StatFamily::Max, 80)]);
        assert_eq!(record.get(MAX_LINE_LENGTH), Some(80));
    }

    #[test]
    fn test_observe_file() {
        let observations = observe_file("short\na longer line here\n");
        assert!(observations.contains(&(StatFamily::Max, MAX_LINE_LENGTH, 18)));
        assert!(observations.contains(&(StatFamily::Max, MAX_LINES_PER_FILE, 2)));
        assert!(observations.contains(&(StatFamily::Min, MIN_LINES_PER_FILE, 2)));
    }

    #[test]
    fn test_observe_empty_file() {
        let observations = observe_file("");
        assert!(observations.contains(&(StatFamily::Max, MAX_LINE_LENGTH, 0)));
        assert!(observations.contains(&(StatFamily::Max, MAX_LINES_PER_FILE, 0)));
    }

    #[test]
    fn test_aggregate_over_file_dict() {
        let mut files = FileDict::new();
        files.insert(PathBuf::from("/p/a.c"), "x\n".repeat(3));
        files.insert(PathBuf::from("/p/b.c"), "a very long line indeed\n".into());
        let record = aggregate(&files);
        assert_eq!(record.get(MAX_LINE_LENGTH), Some(23));
        assert_eq!(record.get(MAX_LINES_PER_FILE), Some(3));
        assert_eq!(record.get(MIN_LINES_PER_FILE), Some(1));
    }

    proptest! {
        #[test]
        fn prop_max_aggregation_equals_slice_max(values in prop::collection::vec(0u64..10_000, 1..50)) {
            let mut record = StatRecord::new();
            for &value in &values {
                record.update(StatFamily::Max, "stat", value);
            }
            prop_assert_eq!(record.get("stat"), values.iter().copied().max());
        }

        #[test]
        fn prop_min_aggregation_equals_slice_min(values in prop::collection::vec(0u64..10_000, 1..50)) {
            let mut record = StatRecord::new();
            for &value in &values {
                record.update(StatFamily::Min, "stat", value);
            }
            prop_assert_eq!(record.get("stat"), values.iter().copied().min());
        }
    }
}
