use crate::types::{RawReport, buckets};

/// Outcome of the mutation-eligibility check over the unit-test reports.
#[derive(Debug, Clone)]
pub enum MutationEligibility {
    /// No unit-test report recorded a failure (including the case where no
    /// unit-test reports exist at all): mutation reports may be located
    /// and scored.
    Eligible,
    /// At least one unit-test report recorded failures. Mutation scoring
    /// is skipped for the whole run, and the unit-test reports that caused
    /// it ride along for reporting.
    TestsFailed {
        failed: usize,
        reports: Vec<RawReport>,
    },
}

impl MutationEligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, MutationEligibility::Eligible)
    }
}

/// Decide whether mutation reports are worth scoring, before any
/// mutation-report I/O happens.
///
/// Mutation results only say something about a test suite that is green,
/// so any recorded unit-test failure closes the gate for the run.
pub fn mutation_eligibility(test_reports: &[RawReport]) -> MutationEligibility {
    let failed: usize = test_reports
        .iter()
        .map(|report| report.size_of(buckets::FAILED))
        .sum();

    if failed == 0 {
        MutationEligibility::Eligible
    } else {
        MutationEligibility::TestsFailed {
            failed,
            reports: test_reports.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::ReportKind;

    fn test_report(total: usize, failed: usize, skipped: usize) -> RawReport {
        RawReport::new(
            ReportKind::Junit,
            Path::new("TEST-demo.xml"),
            total,
            &[(buckets::FAILED, failed), (buckets::SKIPPED, skipped)],
        )
    }

    #[test]
    fn no_reports_leave_the_gate_open() {
        assert!(mutation_eligibility(&[]).is_eligible());
    }

    #[test]
    fn green_reports_leave_the_gate_open() {
        let reports = vec![test_report(10, 0, 0), test_report(4, 0, 2)];

        assert!(mutation_eligibility(&reports).is_eligible());
    }

    #[test]
    fn skipped_tests_do_not_close_the_gate() {
        let reports = vec![test_report(5, 0, 5)];

        assert!(mutation_eligibility(&reports).is_eligible());
    }

    #[test]
    fn any_failure_closes_the_gate() {
        let reports = vec![test_report(10, 0, 0), test_report(8, 3, 0)];

        let eligibility = mutation_eligibility(&reports);

        assert!(!eligibility.is_eligible());
        match eligibility {
            MutationEligibility::TestsFailed { failed, reports } => {
                assert_eq!(failed, 3);
                assert_eq!(reports.len(), 2);
            }
            MutationEligibility::Eligible => panic!("expected the gate to close"),
        }
    }

    #[test]
    fn failures_are_summed_across_reports() {
        let reports = vec![test_report(10, 2, 0), test_report(8, 3, 0)];

        match mutation_eligibility(&reports) {
            MutationEligibility::TestsFailed { failed, .. } => assert_eq!(failed, 5),
            MutationEligibility::Eligible => panic!("expected the gate to close"),
        }
    }
}
