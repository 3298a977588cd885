use super::{group_thousands as n, pct, ReportContext, Summary};
use crate::model::{MetricBucket, MetricsResult, ReasonTally};
use std::fmt::Write;

fn breakdown(b: &MetricBucket) -> String {
    format!(
        "Desktop: {} | Mobile: {} | Both: {}",
        n(b.desktop),
        n(b.mobile),
        n(b.both)
    )
}

fn push_reasons(out: &mut String, label: &str, tally: &ReasonTally) {
    let _ = writeln!(out, "Not applicable reasons ({}):", label);
    if tally.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (reason, count) in tally.iter() {
        let _ = writeln!(out, "  {:>5}  {}", n(count), reason);
    }
}

/// Plain-text report for terminals.
pub fn render_text(m: &MetricsResult, ctx: &ReportContext) -> String {
    let mut out = String::new();
    let summary = Summary::from_metrics(m);

    let _ = writeln!(out, "Automation Metrics");
    let _ = writeln!(out, "==================");
    let _ = writeln!(
        out,
        "Processed: {}",
        ctx.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(
        out,
        "Baseline:  {} ({} rows)",
        ctx.baseline.path,
        n(ctx.baseline.rows as u64)
    );
    let _ = writeln!(
        out,
        "Plan:      {} ({} rows)",
        ctx.plan.path,
        n(ctx.plan.rows as u64)
    );
    out.push('\n');

    let _ = writeln!(
        out,
        "✅ AUTOMATED       {:>7}   Desktop: {} | Mobile: {}",
        n(m.automated.total),
        n(m.automated.desktop),
        n(m.automated.mobile)
    );
    let _ = writeln!(
        out,
        "📋 BACKLOG         {:>7}   Desktop: {} | Mobile: {} | Both: {}",
        n(m.backlog.smart_total),
        n(m.backlog.desktop),
        n(m.backlog.mobile),
        n(m.backlog.both)
    );
    let _ = writeln!(out, "🚫 BLOCKED         {:>7}", n(m.blocked));
    let _ = writeln!(
        out,
        "🔍 IN REVIEW       {:>7}   Desktop section: {} | Mobile section: {}",
        n(m.in_review.total),
        n(m.in_review.desktop),
        n(m.in_review.mobile)
    );
    let _ = writeln!(
        out,
        "➖ NOT APPLICABLE  {:>7}   {}",
        n(m.not_applicable.total),
        breakdown(&m.not_applicable)
    );
    let detailed = &m.not_applicable_detailed;
    let _ = writeln!(
        out,
        "     desktop section {:>5}   {}",
        n(detailed.plan_desktop.total),
        breakdown(&detailed.plan_desktop)
    );
    let _ = writeln!(
        out,
        "     mobile section  {:>5}   {}",
        n(detailed.plan_mobile.total),
        breakdown(&detailed.plan_mobile)
    );
    if let Some(unsplit) = &ctx.unsplit_not_applicable {
        let _ = writeln!(
            out,
            "     whole plan      {:>5}   {}",
            n(unsplit.total),
            breakdown(unsplit)
        );
    }
    out.push('\n');

    push_reasons(&mut out, "desktop", &m.na_reasons.desktop);
    push_reasons(&mut out, "mobile", &m.na_reasons.mobile);
    out.push('\n');

    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "-------");
    let _ = writeln!(out, "Total test cases: {}", n(summary.total_tests));
    if summary.total_tests > 0 {
        let _ = writeln!(
            out,
            "  Automated:      {:>6} ({} tests)",
            pct(summary.automated_pct),
            n(m.automated.total)
        );
        let _ = writeln!(
            out,
            "  Backlog:        {:>6} ({} tests)",
            pct(summary.backlog_pct),
            n(m.backlog.smart_total)
        );
        if m.blocked > 0 {
            let _ = writeln!(
                out,
                "  Blocked:        {:>6} ({} tests)",
                pct(summary.blocked_pct),
                n(m.blocked)
            );
        }
        let _ = writeln!(
            out,
            "  Not applicable: {:>6} ({} tests)",
            pct(summary.not_applicable_pct),
            n(m.not_applicable.total)
        );
    }
    if summary.applicable_tests > 0 {
        let _ = writeln!(
            out,
            "Automation coverage: {} ({} automated out of {} applicable tests)",
            pct(summary.automation_coverage_pct),
            n(m.automated.total),
            n(summary.applicable_tests)
        );
    }
    if m.automated.total > 0 {
        let _ = writeln!(
            out,
            "Backlog-to-automated ratio: {} ({} backlog items vs {} automated)",
            pct(summary.backlog_to_automated_pct),
            n(m.backlog.smart_total),
            n(m.automated.total)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn text_report_lists_every_category() {
        let text = render_text(&fixtures::metrics(), &fixtures::context());
        assert!(text.contains("Processed: 2026-01-01 12:00:00 UTC"));
        assert!(text.contains("AUTOMATED"));
        assert!(text.contains("Desktop: 2 | Mobile: 1"));
        assert!(text.contains("Desktop: 2 | Mobile: 3 | Both: 1"));
        assert!(text.contains("Old format"));
        assert!(text.contains("Automation coverage: 60.0%"));
        assert!(!text.contains("whole plan"));
    }

    #[test]
    fn explain_adds_unsplit_line() {
        let mut ctx = fixtures::context();
        ctx.unsplit_not_applicable = Some(MetricBucket::new(1, 1, 4));
        let text = render_text(&fixtures::metrics(), &ctx);
        assert!(text.contains("whole plan"));
        assert!(text.contains("Desktop: 1 | Mobile: 1 | Both: 4"));
    }

    #[test]
    fn empty_metrics_skip_percentages() {
        let text = render_text(&MetricsResult::default(), &fixtures::context());
        assert!(text.contains("Total test cases: 0"));
        assert!(!text.contains("Automation coverage"));
        assert!(text.contains("(none)"));
    }
}
