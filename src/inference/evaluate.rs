//! Green evaluation: a trial is green when it surfaces nothing the
//! exclusion ranges do not already account for.

use crate::core::{ExclusionRange, Finding};

/// True when findings is empty, or every finding lies fully inside at
/// least one exclusion range. Pure predicate.
pub fn is_green(findings: &[Finding], exclusions: &[ExclusionRange]) -> bool {
    if findings.is_empty() {
        return true;
    }
    if exclusions.is_empty() {
        return false;
    }
    findings
        .iter()
        .all(|finding| exclusions.iter().any(|range| range.contains(&finding.span)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceSpan;

    fn finding(file: &str, start: usize, end: usize) -> Finding {
        Finding::new("f", SourceSpan::new(file, start, end))
    }

    #[test]
    fn test_no_findings_is_green_against_any_ranges() {
        assert!(is_green(&[], &[]));
        assert!(is_green(&[], &[ExclusionRange::new("a.c", 1, 10)]));
    }

    #[test]
    fn test_findings_without_ranges_are_not_green() {
        assert!(!is_green(&[finding("a.c", 5, 5)], &[]));
    }

    #[test]
    fn test_contained_finding_is_green() {
        let ranges = [ExclusionRange::new("a.c", 1, 10)];
        assert!(is_green(&[finding("a.c", 5, 5)], &ranges));
    }

    #[test]
    fn test_wrong_file_is_not_green() {
        let ranges = [ExclusionRange::new("b.c", 1, 10)];
        assert!(!is_green(&[finding("a.c", 5, 5)], &ranges));
    }

    #[test]
    fn test_partially_outside_range_is_not_green() {
        let ranges = [ExclusionRange::new("a.c", 6, 10)];
        assert!(!is_green(&[finding("a.c", 5, 5)], &ranges));
    }

    #[test]
    fn test_every_finding_must_be_covered() {
        let ranges = [ExclusionRange::new("a.c", 1, 10)];
        let findings = [finding("a.c", 2, 2), finding("a.c", 11, 11)];
        assert!(!is_green(&findings, &ranges));
    }

    #[test]
    fn test_any_covering_range_suffices() {
        let ranges = [
            ExclusionRange::new("a.c", 1, 3),
            ExclusionRange::new("a.c", 8, 12),
        ];
        let findings = [finding("a.c", 2, 2), finding("a.c", 9, 11)];
        assert!(is_green(&findings, &ranges));
    }
}
