//! Assembles every metric for one (baseline, plan) pair.

use crate::classify::{classify_simple, classify_smart};
use crate::config::{ColumnConfig, Config, StatusSets};
use crate::errors::LoadError;
use crate::model::{
    AutomatedMetrics, BacklogMetrics, InReviewMetrics, MetricBucket, MetricsResult, NaReasons,
    NotApplicableDetailed, Platform, TestRecord,
};
use crate::reasons;
use crate::section::{self, Sections};
use crate::table::{Table, TableView};
use std::path::Path;

/// Records of the two plan sections, resolved against the plan's headers.
#[derive(Debug, Clone)]
pub struct PlanSections<'a> {
    pub desktop: Vec<TestRecord<'a>>,
    pub mobile: Vec<TestRecord<'a>>,
    pub separator: Option<usize>,
    pub has_reason_column: bool,
}

pub struct MetricsAggregator<'c> {
    columns: &'c ColumnConfig,
    statuses: StatusSets,
}

impl<'c> MetricsAggregator<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self {
            columns: &config.columns,
            statuses: config.statuses.compile(),
        }
    }

    fn records<'a>(&self, table: TableView<'a>) -> Vec<TestRecord<'a>> {
        table.records(&table.resolve(&self.columns.names()))
    }

    /// Automated cells per status column, summed independently: a row
    /// automated on both platforms counts twice.
    pub fn automated(&self, baseline: TableView<'_>) -> AutomatedMetrics {
        let records = self.records(baseline);
        let count = |platform: Platform| {
            records
                .iter()
                .filter(|r| self.statuses.automated.matches(r.platform_status(platform)))
                .count() as u64
        };
        let desktop = count(Platform::Desktop);
        let mobile = count(Platform::Mobile);
        AutomatedMetrics {
            desktop,
            mobile,
            total: desktop + mobile,
        }
    }

    pub fn backlog(&self, plan: TableView<'_>) -> BacklogMetrics {
        let backlog = &self.statuses.backlog;
        classify_smart(
            &self.records(plan),
            |r| backlog.matches(r.desktop_status),
            |r| backlog.matches(r.mobile_status),
        )
        .into()
    }

    /// Rows blocked on either platform, each row counted once.
    pub fn blocked(&self, plan: TableView<'_>) -> u64 {
        let blocked = &self.statuses.blocked;
        self.records(plan)
            .iter()
            .filter(|r| blocked.matches(r.desktop_status) || blocked.matches(r.mobile_status))
            .count() as u64
    }

    /// Not-applicable rows of the whole plan with cross-column deduplication,
    /// ignoring the section layout.
    pub fn not_applicable_smart(&self, plan: TableView<'_>) -> MetricBucket {
        let na = &self.statuses.not_applicable;
        classify_smart(
            &self.records(plan),
            |r| na.matches(r.desktop_status),
            |r| na.matches(r.mobile_status),
        )
    }

    pub fn split_plan<'a>(&self, plan: TableView<'a>) -> PlanSections<'a> {
        let cols = plan.resolve(&self.columns.names());
        let Sections {
            desktop,
            mobile,
            separator,
        } = section::split(plan, cols.identifier);
        PlanSections {
            desktop: desktop.records(&cols),
            mobile: mobile.records(&cols),
            separator,
            has_reason_column: cols.na_reason.is_some(),
        }
    }

    /// Both sections list the same catalogue, so the reported total is the
    /// larger section count rather than their sum.
    pub fn in_review(&self, sections: &PlanSections<'_>) -> InReviewMetrics {
        let count = |records: &[TestRecord<'_>]| {
            records
                .iter()
                .filter(|r| self.statuses.in_review.matches(r.status))
                .count() as u64
        };
        let desktop = count(&sections.desktop);
        let mobile = count(&sections.mobile);
        InReviewMetrics {
            desktop,
            mobile,
            total: desktop.max(mobile),
        }
    }

    /// Each section is classified against its own platform column, then the
    /// two buckets are max-merged into `armonic`.
    pub fn not_applicable_detailed(&self, sections: &PlanSections<'_>) -> NotApplicableDetailed {
        let na = &self.statuses.not_applicable;
        let plan_desktop = classify_simple(&sections.desktop, |r| na.matches(r.desktop_status));
        let plan_mobile = classify_simple(&sections.mobile, |r| na.matches(r.mobile_status));
        NotApplicableDetailed {
            plan_desktop,
            plan_mobile,
            armonic: plan_desktop.max_merge(&plan_mobile),
        }
    }

    pub fn na_reasons(&self, sections: &PlanSections<'_>) -> NaReasons {
        let na = &self.statuses.not_applicable;
        NaReasons {
            desktop: reasons::tally(
                &sections.desktop,
                Platform::Desktop,
                na,
                sections.has_reason_column,
            ),
            mobile: reasons::tally(
                &sections.mobile,
                Platform::Mobile,
                na,
                sections.has_reason_column,
            ),
        }
    }

    pub fn compute(&self, baseline: &Table, plan: &Table) -> MetricsResult {
        self.warn_missing_columns("baseline", baseline, &self.columns.baseline_columns());
        self.warn_missing_columns("plan", plan, &self.columns.plan_columns());

        let sections = self.split_plan(plan.view());
        let not_applicable_detailed = self.not_applicable_detailed(&sections);

        let result = MetricsResult {
            automated: self.automated(baseline.view()),
            backlog: self.backlog(plan.view()),
            blocked: self.blocked(plan.view()),
            in_review: self.in_review(&sections),
            not_applicable: not_applicable_detailed.armonic,
            not_applicable_detailed,
            na_reasons: self.na_reasons(&sections),
        };

        tracing::debug!(
            event = "statboard.metrics.computed",
            baseline_rows = baseline.len(),
            plan_rows = plan.len(),
            separator = ?sections.separator,
            automated = result.automated.total,
            backlog = result.backlog.smart_total,
            blocked = result.blocked,
            in_review = result.in_review.total,
            not_applicable = result.not_applicable.total
        );

        result
    }

    fn warn_missing_columns(&self, table_name: &str, table: &Table, expected: &[&str]) {
        let view = table.view();
        for name in expected.iter().filter(|n| view.column(n).is_none()) {
            tracing::warn!(
                event = "statboard.column.missing",
                table = table_name,
                column = %name,
                "expected column is absent; treating it as empty"
            );
        }
    }
}

/// All metrics for two loaded tables.
pub fn get_all_metrics(baseline: &Table, plan: &Table, config: &Config) -> MetricsResult {
    MetricsAggregator::new(config).compute(baseline, plan)
}

pub fn try_load_metrics(
    baseline_path: &Path,
    plan_path: &Path,
    config: &Config,
) -> Result<MetricsResult, LoadError> {
    let baseline = Table::load(baseline_path)?;
    let plan = Table::load(plan_path)?;
    Ok(get_all_metrics(&baseline, &plan, config))
}

/// Loads both exports and computes the metrics, or returns `None` if either
/// file cannot be loaded. No metric is computed in that case.
pub fn load_metrics(
    baseline_path: &Path,
    plan_path: &Path,
    config: &Config,
) -> Option<MetricsResult> {
    match try_load_metrics(baseline_path, plan_path, config) {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            tracing::error!(
                event = "statboard.load.failed",
                path = %e.path().display(),
                error = %e,
                "could not produce metrics"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: &str = "Automation Status Testim Desktop";
    const M: &str = "Automation Status Testim Mobile View";

    fn table(data: &str) -> Table {
        Table::from_reader(data.as_bytes(), Path::new("inline.csv")).unwrap()
    }

    #[test]
    fn blocked_row_counts_once() {
        let plan = table(&format!(
            "ID,Device,{D},{M}\n1,Desktop,Blocked,Blocked\n2,Mobile,,blocked\n"
        ));
        let cfg = Config::default();
        assert_eq!(MetricsAggregator::new(&cfg).blocked(plan.view()), 2);
    }

    #[test]
    fn in_review_total_is_max_of_sections() {
        let plan = table(
            "ID,Status\n\
             1,Passed with issue\n\
             2,Passed with Issue\n\
             3,Passed\n\
             ,\n\
             4,passed with issue\n",
        );
        let cfg = Config::default();
        let agg = MetricsAggregator::new(&cfg);
        let r = agg.in_review(&agg.split_plan(plan.view()));
        assert_eq!(r, InReviewMetrics { desktop: 2, mobile: 1, total: 2 });
    }

    #[test]
    fn missing_status_columns_never_match() {
        let baseline = table("Name\nfoo\n");
        let plan = table("Name\nbar\n");
        let r = get_all_metrics(&baseline, &plan, &Config::default());
        assert_eq!(r, MetricsResult::default());
    }

    #[test]
    fn smart_not_applicable_ignores_sections() {
        let plan = table(&format!(
            "ID,Device,{D},{M}\n\
             1,Both,Automation not applicable,Automation not applicable\n\
             ,,,\n\
             1,Both,Automation not applicable,Automation not applicable\n"
        ));
        let cfg = Config::default();
        let agg = MetricsAggregator::new(&cfg);
        assert_eq!(agg.not_applicable_smart(plan.view()), MetricBucket::new(0, 0, 2));
        // The sectioned figure attributes by Device per section and max-merges.
        let detailed = agg.not_applicable_detailed(&agg.split_plan(plan.view()));
        assert_eq!(detailed.armonic, MetricBucket::new(0, 0, 1));
    }

    #[test]
    fn custom_vocabulary_is_used() {
        let cfg = crate::config::parse_config(
            "statuses:\n  blocked: [On hold]\n",
            Path::new("statboard.yaml"),
            true,
        )
        .unwrap();
        let plan = table(&format!("{D},{M}\nOn Hold,\nBlocked,\n"));
        assert_eq!(MetricsAggregator::new(&cfg).blocked(plan.view()), 1);
    }
}
