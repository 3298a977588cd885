use super::{group_thousands as n, pct, ReportContext, Summary};
use crate::model::{MetricBucket, MetricsResult, ReasonTally};
use std::fmt::Write;

fn bucket_row(out: &mut String, label: &str, b: &MetricBucket) {
    let _ = writeln!(
        out,
        "| {} | {} | {} | {} | {} |",
        label,
        n(b.desktop),
        n(b.mobile),
        n(b.both),
        n(b.total)
    );
}

fn reasons_table(out: &mut String, label: &str, tally: &ReasonTally) {
    let _ = writeln!(out, "### Not applicable reasons: {}", label);
    if tally.is_empty() {
        let _ = writeln!(out, "_none_");
        out.push('\n');
        return;
    }
    let _ = writeln!(out, "| Reason | Count |");
    let _ = writeln!(out, "|---|---:|");
    for (reason, count) in tally.iter() {
        let _ = writeln!(out, "| {} | {} |", reason.replace('|', "\\|"), n(count));
    }
    out.push('\n');
}

/// Markdown report, suitable for CI job summaries and PR comments.
pub fn render_markdown(m: &MetricsResult, ctx: &ReportContext) -> String {
    let mut out = String::new();
    let summary = Summary::from_metrics(m);

    let _ = writeln!(out, "# Automation Metrics");
    let _ = writeln!(
        out,
        "_Processed {} from `{}` and `{}`_",
        ctx.generated_at.to_rfc3339(),
        ctx.baseline.path,
        ctx.plan.path
    );
    out.push('\n');

    let _ = writeln!(out, "| Category | Desktop | Mobile | Both | Total |");
    let _ = writeln!(out, "|---|---:|---:|---:|---:|");
    let _ = writeln!(
        out,
        "| Automated | {} | {} | – | {} |",
        n(m.automated.desktop),
        n(m.automated.mobile),
        n(m.automated.total)
    );
    let _ = writeln!(
        out,
        "| Backlog | {} | {} | {} | {} |",
        n(m.backlog.desktop),
        n(m.backlog.mobile),
        n(m.backlog.both),
        n(m.backlog.smart_total)
    );
    let _ = writeln!(out, "| Blocked | – | – | – | {} |", n(m.blocked));
    let _ = writeln!(
        out,
        "| In review (max of sections) | {} | {} | – | {} |",
        n(m.in_review.desktop),
        n(m.in_review.mobile),
        n(m.in_review.total)
    );
    bucket_row(&mut out, "Not applicable", &m.not_applicable);
    out.push('\n');

    let _ = writeln!(out, "## Not applicable by plan section");
    let _ = writeln!(out, "| Section | Desktop | Mobile | Both | Total |");
    let _ = writeln!(out, "|---|---:|---:|---:|---:|");
    let detailed = &m.not_applicable_detailed;
    bucket_row(&mut out, "Desktop section", &detailed.plan_desktop);
    bucket_row(&mut out, "Mobile section", &detailed.plan_mobile);
    bucket_row(&mut out, "**Merged (field-wise max)**", &detailed.armonic);
    if let Some(unsplit) = &ctx.unsplit_not_applicable {
        bucket_row(&mut out, "Whole plan, no split", unsplit);
    }
    out.push('\n');

    reasons_table(&mut out, "desktop", &m.na_reasons.desktop);
    reasons_table(&mut out, "mobile", &m.na_reasons.mobile);

    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out, "- **Total test cases**: {}", n(summary.total_tests));
    let _ = writeln!(out, "- **Automated**: {}", pct(summary.automated_pct));
    let _ = writeln!(out, "- **Backlog**: {}", pct(summary.backlog_pct));
    let _ = writeln!(out, "- **Blocked**: {}", pct(summary.blocked_pct));
    let _ = writeln!(out, "- **Not applicable**: {}", pct(summary.not_applicable_pct));
    let _ = writeln!(
        out,
        "- **Automation coverage**: {} of {} applicable tests",
        pct(summary.automation_coverage_pct),
        n(summary.applicable_tests)
    );
    let _ = writeln!(
        out,
        "- **Backlog-to-automated ratio**: {}",
        pct(summary.backlog_to_automated_pct)
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn markdown_has_tables_and_summary() {
        let md = render_markdown(&fixtures::metrics(), &fixtures::context());
        assert!(md.starts_with("# Automation Metrics"));
        assert!(md.contains("| Not applicable | 2 | 3 | 1 | 6 |"));
        assert!(md.contains("| Desktop section | 2 | 0 | 1 | 3 |"));
        assert!(md.contains("| Old format | 2 |"));
        assert!(md.contains("_none_"));
        assert!(md.contains("- **Automation coverage**: 60.0% of 5 applicable tests"));
    }

    #[test]
    fn pipes_in_reasons_are_escaped() {
        let mut m = fixtures::metrics();
        m.na_reasons.mobile = ReasonTally::from_ordered(vec![("a|b".into(), 1)]);
        let md = render_markdown(&m, &fixtures::context());
        assert!(md.contains("| a\\|b | 1 |"));
    }
}
