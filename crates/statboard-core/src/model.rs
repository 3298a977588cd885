use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One row of the baseline or plan export. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestRecord<'a> {
    pub identifier: Option<&'a str>,
    pub desktop_status: Option<&'a str>,
    pub mobile_status: Option<&'a str>,
    pub device: Option<&'a str>,
    pub status: Option<&'a str>,
    pub na_reason: Option<&'a str>,
}

impl<'a> TestRecord<'a> {
    pub fn device(&self) -> Device {
        Device::parse(self.device)
    }

    pub fn platform_status(&self, platform: Platform) -> Option<&'a str> {
        match platform {
            Platform::Desktop => self.desktop_status,
            Platform::Mobile => self.mobile_status,
        }
    }
}

/// Value of the Device column.
///
/// Matching is on the literal, case-sensitive values after trimming
/// surrounding whitespace; anything else is [`Device::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Desktop,
    Mobile,
    Both,
    Other,
}

impl Device {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("Desktop") => Device::Desktop,
            Some("Mobile") => Device::Mobile,
            Some("Both") => Device::Both,
            _ => Device::Other,
        }
    }
}

/// Which per-platform status column a computation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Desktop,
    Mobile,
}

/// Per-platform counts. `total` is always `desktop + mobile + both`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricBucket {
    pub desktop: u64,
    pub mobile: u64,
    pub both: u64,
    pub total: u64,
}

impl MetricBucket {
    pub fn new(desktop: u64, mobile: u64, both: u64) -> Self {
        Self {
            desktop,
            mobile,
            both,
            total: desktop + mobile + both,
        }
    }

    /// Field-wise maximum of two buckets, with `total` recomputed from the
    /// merged fields. Not a sum: both inputs count the same catalogue.
    pub fn max_merge(&self, other: &MetricBucket) -> MetricBucket {
        MetricBucket::new(
            self.desktop.max(other.desktop),
            self.mobile.max(other.mobile),
            self.both.max(other.both),
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatedMetrics {
    pub desktop: u64,
    pub mobile: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogMetrics {
    pub desktop: u64,
    pub mobile: u64,
    pub both: u64,
    pub smart_total: u64,
}

impl From<MetricBucket> for BacklogMetrics {
    fn from(b: MetricBucket) -> Self {
        Self {
            desktop: b.desktop,
            mobile: b.mobile,
            both: b.both,
            smart_total: b.total,
        }
    }
}

/// `desktop`/`mobile` are the per-section counts; `total` is their maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InReviewMetrics {
    pub desktop: u64,
    pub mobile: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotApplicableDetailed {
    pub plan_desktop: MetricBucket,
    pub plan_mobile: MetricBucket,
    pub armonic: MetricBucket,
}

/// Reason text to occurrence count, in descending count order with ties kept
/// in first-seen order. Serializes as a JSON object in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReasonTally {
    entries: Vec<(String, u64)>,
}

impl ReasonTally {
    /// `entries` must already be ordered.
    pub(crate) fn from_ordered(entries: Vec<(String, u64)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, reason: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(r, _)| r == reason)
            .map(|(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(r, n)| (r.as_str(), *n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn occurrences(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

impl Serialize for ReasonTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (reason, count) in &self.entries {
            map.serialize_entry(reason, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NaReasons {
    pub desktop: ReasonTally,
    pub mobile: ReasonTally,
}

/// Everything the renderers need, built once per (baseline, plan) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsResult {
    pub automated: AutomatedMetrics,
    pub backlog: BacklogMetrics,
    pub blocked: u64,
    pub in_review: InReviewMetrics,
    pub not_applicable: MetricBucket,
    pub not_applicable_detailed: NotApplicableDetailed,
    pub na_reasons: NaReasons,
}
