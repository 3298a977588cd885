//! Coverage figures derived from a [`MetricsResult`].

use crate::model::MetricsResult;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    /// automated + backlog + blocked + not applicable
    pub total_tests: u64,
    /// `total_tests` without the not-applicable ones
    pub applicable_tests: u64,
    pub automated_pct: Option<f64>,
    pub backlog_pct: Option<f64>,
    pub blocked_pct: Option<f64>,
    pub not_applicable_pct: Option<f64>,
    pub automation_coverage_pct: Option<f64>,
    pub backlog_to_automated_pct: Option<f64>,
}

fn ratio_pct(part: u64, whole: u64) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64 * 100.0)
}

impl Summary {
    pub fn from_metrics(m: &MetricsResult) -> Self {
        let automated = m.automated.total;
        let backlog = m.backlog.smart_total;
        let blocked = m.blocked;
        let not_applicable = m.not_applicable.total;

        let total_tests = automated + backlog + blocked + not_applicable;
        let applicable_tests = automated + backlog + blocked;

        Self {
            total_tests,
            applicable_tests,
            automated_pct: ratio_pct(automated, total_tests),
            backlog_pct: ratio_pct(backlog, total_tests),
            blocked_pct: ratio_pct(blocked, total_tests),
            not_applicable_pct: ratio_pct(not_applicable, total_tests),
            automation_coverage_pct: ratio_pct(automated, applicable_tests),
            backlog_to_automated_pct: ratio_pct(backlog, automated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn derived_from_totals() {
        let s = Summary::from_metrics(&fixtures::metrics());
        // 3 automated + 1 backlog + 1 blocked + 6 not applicable
        assert_eq!(s.total_tests, 11);
        assert_eq!(s.applicable_tests, 5);
        assert_eq!(s.automation_coverage_pct, Some(60.0));
        let backlog_ratio = s.backlog_to_automated_pct.unwrap();
        assert!((backlog_ratio - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_metrics_have_no_percentages() {
        let s = Summary::from_metrics(&MetricsResult::default());
        assert_eq!(s.total_tests, 0);
        assert_eq!(s.automated_pct, None);
        assert_eq!(s.automation_coverage_pct, None);
        assert_eq!(s.backlog_to_automated_pct, None);
    }
}
