use anyhow::Context;
use statboard_core::report::{console, json, markdown, ReportContext};
use statboard_core::MetricsAggregator;

use super::{exit_codes, read_input, resolve_config};
use crate::cli::args::{MetricsArgs, ReportFormat};

pub async fn run(args: MetricsArgs) -> anyhow::Result<i32> {
    let cfg = match resolve_config(args.config.as_deref(), false) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    // No metric is computed unless both exports load.
    let loaded = match read_input(&args.baseline).await {
        Ok(baseline) => read_input(&args.plan).await.map(|plan| (baseline, plan)),
        Err(e) => Err(e),
    };
    let (baseline, plan) = match loaded {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(
                event = "statboard.load.failed",
                path = %e.path().display(),
                error = %e
            );
            eprintln!("error: {}", e);
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let aggregator = MetricsAggregator::new(&cfg);
    let metrics = aggregator.compute(&baseline.table, &plan.table);
    let ctx = ReportContext {
        generated_at: chrono::Utc::now(),
        unsplit_not_applicable: args
            .explain
            .then(|| aggregator.not_applicable_smart(plan.table.view())),
        baseline: baseline.info,
        plan: plan.info,
    };

    let rendered = match args.format {
        ReportFormat::Text => console::render_text(&metrics, &ctx),
        ReportFormat::Markdown => markdown::render_markdown(&metrics, &ctx),
        ReportFormat::Json => json::render_json(&metrics, &ctx)?,
    };

    match &args.out {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(event = "statboard.report.written", path = %path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(exit_codes::OK)
}
