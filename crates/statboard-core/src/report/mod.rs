pub mod console;
pub mod json;
pub mod markdown;
pub mod summary;

use crate::model::MetricBucket;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub use summary::Summary;

/// Where one input table came from.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InputInfo {
    pub path: String,
    pub sha256: String,
    pub rows: usize,
}

/// Facts about a run that are not part of the metrics themselves.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub generated_at: DateTime<Utc>,
    pub baseline: InputInfo,
    pub plan: InputInfo,
    /// Not-applicable counted over the whole plan without section split,
    /// shown only when requested.
    pub unsplit_not_applicable: Option<MetricBucket>,
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub(crate) fn pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v))
        .unwrap_or_else(|| "n/a".to_string())
}
