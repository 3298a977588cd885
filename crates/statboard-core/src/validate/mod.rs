//! Pre-flight checks on the two exports.
//!
//! Nothing here stops metrics from being computed: a missing column reads as
//! empty. The findings explain why a figure may come out as zero.

use crate::config::Config;
use crate::errors::diagnostic::{codes, Diagnostic};
use crate::model::Device;
use crate::section;
use crate::table::Table;
use serde_json::json;

#[derive(Debug, Clone, Default)]
pub struct ValidateReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidateReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == "warn")
    }
}

fn missing_columns(table_name: &str, table: &Table, expected: &[&str]) -> Vec<Diagnostic> {
    let view = table.view();
    expected
        .iter()
        .filter(|name| view.column(name).is_none())
        .map(|name| {
            Diagnostic::new(
                codes::W_COLUMN_MISSING,
                format!("{} table has no '{}' column", table_name, name),
            )
            .with_source(table_name)
            .with_context(json!({ "column": name, "available": view.headers() }))
            .with_fix_step(format!(
                "Rename the header in the export or set columns in {}",
                crate::config::DEFAULT_CONFIG_FILE
            ))
        })
        .collect()
}

pub fn validate(baseline: &Table, plan: &Table, config: &Config) -> ValidateReport {
    let mut diags = Vec::new();
    let columns = &config.columns;

    diags.extend(missing_columns("baseline", baseline, &columns.baseline_columns()));
    diags.extend(missing_columns("plan", plan, &columns.plan_columns()));

    for (name, table) in [("baseline", baseline), ("plan", plan)] {
        if table.is_empty() {
            diags.push(
                Diagnostic::new(codes::W_TABLE_EMPTY, format!("{} table has no data rows", name))
                    .with_source(name),
            );
        }
    }

    let view = plan.view();
    let sections = section::split(view, view.column(&columns.identifier));
    if sections.separator.is_none() && !plan.is_empty() {
        diags.push(
            Diagnostic::new(
                codes::I_NO_SEPARATOR,
                format!(
                    "plan has no row with an empty '{}'; the whole plan is treated as the desktop section",
                    columns.identifier
                ),
            )
            .with_source("plan"),
        );
    }

    let device = view.column(&columns.device);
    if device.is_some() {
        let unknown: Vec<(usize, &str)> = view
            .rows()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != sections.separator)
            .filter_map(|(idx, row)| {
                let raw = row.get(device);
                (Device::parse(raw) == Device::Other).then(|| (idx, raw.unwrap_or("")))
            })
            .collect();
        if !unknown.is_empty() {
            let mut values: Vec<&str> = unknown.iter().map(|(_, v)| *v).collect();
            values.sort_unstable();
            values.dedup();
            diags.push(
                Diagnostic::new(
                    codes::W_UNKNOWN_DEVICE,
                    format!(
                        "{} plan rows have a '{}' value other than Desktop, Mobile or Both",
                        unknown.len(),
                        columns.device
                    ),
                )
                .with_source("plan")
                .with_context(json!({
                    "rows": unknown.len(),
                    "values": values,
                    "first_row": unknown[0].0,
                }))
                .with_fix_step("These rows fall back to content-based attribution"),
            );
        }
    }

    ValidateReport { diagnostics: diags }
}
