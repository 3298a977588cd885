use statboard_core::errors::diagnostic::{codes, Diagnostic};
use statboard_core::validate::{validate, ValidateReport};
use serde_json::json;

use super::{exit_codes, read_input, resolve_config};
use crate::cli::args::ValidateArgs;

pub async fn run(args: ValidateArgs) -> anyhow::Result<i32> {
    // 1. Config
    let cfg = match resolve_config(args.config.as_deref(), args.strict) {
        Ok(c) => c,
        Err(e) => {
            let diag = Diagnostic::new(codes::E_CFG_PARSE, format!("Failed to load config: {}", e))
                .with_source("config")
                .with_context(json!({ "file": args.config }));
            print_report(&ValidateReport { diagnostics: vec![diag] }, &args.format)?;
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    // 2. Exports; both are read so every unreadable file is reported.
    let baseline = read_input(&args.baseline).await;
    let plan = read_input(&args.plan).await;
    let (baseline, plan) = match (baseline, plan) {
        (Ok(b), Ok(p)) => (b, p),
        (b, p) => {
            let diagnostics = [("baseline", b.err()), ("plan", p.err())]
                .into_iter()
                .filter_map(|(name, err)| {
                    err.map(|e| {
                        Diagnostic::new(codes::E_LOAD_FAILED, e.to_string())
                            .with_source(name)
                            .with_context(json!({ "file": e.path() }))
                            .with_fix_step("Export the sheet as CSV with a header row")
                    })
                })
                .collect();
            print_report(&ValidateReport { diagnostics }, &args.format)?;
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    // 3. Findings
    let report = validate(&baseline.table, &plan.table, &cfg);
    print_report(&report, &args.format)?;

    // Errors cannot come out of a loaded pair; warnings fail only in strict mode.
    if report.has_errors() {
        Ok(exit_codes::CONFIG_ERROR)
    } else if args.strict && report.has_warnings() {
        Ok(exit_codes::FINDINGS)
    } else {
        Ok(exit_codes::OK)
    }
}

fn by_severity<'a>(report: &'a ValidateReport, severity: &str) -> Vec<&'a Diagnostic> {
    report
        .diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .collect()
}

fn print_report(report: &ValidateReport, format: &str) -> anyhow::Result<()> {
    let errors = by_severity(report, "error");
    let warnings = by_severity(report, "warn");
    let infos = by_severity(report, "info");

    if format == "json" {
        let output = json!({
            "schema_version": 1,
            "ok": errors.is_empty(),
            "errors": errors,
            "warnings": warnings,
            "infos": infos,
            "summary": {
                "diagnostic_count": report.diagnostics.len()
            }
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let plural = |n: usize| if n != 1 { "s" } else { "" };
    if !errors.is_empty() {
        eprintln!(
            "✖ Validation failed ({} error{}, {} warning{})",
            errors.len(),
            plural(errors.len()),
            warnings.len(),
            plural(warnings.len())
        );
    } else if !warnings.is_empty() {
        eprintln!(
            "⚠️  Validation passed with warnings ({} warning{})",
            warnings.len(),
            plural(warnings.len())
        );
    } else {
        eprintln!("✔ Validation OK");
    }

    for d in &report.diagnostics {
        eprintln!();
        eprintln!("{}: {}", d.severity, d);
        for step in &d.fix_steps {
            eprintln!("  fix: {}", step);
        }
    }
    Ok(())
}
