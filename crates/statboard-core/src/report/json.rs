use super::{InputInfo, ReportContext, Summary};
use crate::model::{MetricBucket, MetricsResult};
use serde::Serialize;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub schema_version: u32,
    pub generated_at: String,
    pub statboard_version: &'static str,
    pub inputs: JsonInputs<'a>,
    pub metrics: &'a MetricsResult,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsplit_not_applicable: Option<MetricBucket>,
}

#[derive(Debug, Serialize)]
pub struct JsonInputs<'a> {
    pub baseline: &'a InputInfo,
    pub plan: &'a InputInfo,
}

impl<'a> JsonReport<'a> {
    pub fn new(metrics: &'a MetricsResult, ctx: &'a ReportContext) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: ctx.generated_at.to_rfc3339(),
            statboard_version: env!("CARGO_PKG_VERSION"),
            inputs: JsonInputs {
                baseline: &ctx.baseline,
                plan: &ctx.plan,
            },
            metrics,
            summary: Summary::from_metrics(metrics),
            unsplit_not_applicable: ctx.unsplit_not_applicable,
        }
    }
}

pub fn render_json(metrics: &MetricsResult, ctx: &ReportContext) -> anyhow::Result<String> {
    let mut s = serde_json::to_string_pretty(&JsonReport::new(metrics, ctx))?;
    s.push('\n');
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn envelope_shape() {
        let json = render_json(&fixtures::metrics(), &fixtures::context()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["schema_version"], 1);
        assert_eq!(v["generated_at"], "2026-01-01T12:00:00+00:00");
        assert_eq!(v["inputs"]["plan"]["rows"], 7);
        assert_eq!(v["metrics"]["backlog"]["smart_total"], 1);
        assert_eq!(v["metrics"]["not_applicable_detailed"]["armonic"]["total"], 6);
        assert_eq!(v["metrics"]["na_reasons"]["desktop"]["Old format"], 2);
        assert_eq!(v["summary"]["total_tests"], 11);
        assert!(v.get("unsplit_not_applicable").is_none());
    }

    #[test]
    fn reasons_keep_their_order_in_text() {
        let json = render_json(&fixtures::metrics(), &fixtures::context()).unwrap();
        let old = json.find("\"Old format\"").unwrap();
        let dep = json.find("\"Deprecated\"").unwrap();
        assert!(old < dep);
    }
}
