//! Per-platform attribution of matching rows.
//!
//! Two rules share the same bucket type:
//!
//! - [`classify_smart`] looks at both status columns of one row and folds a
//!   row that qualifies on both into a single `both` count.
//! - [`classify_simple`] evaluates one predicate per row and attributes it by
//!   the Device value alone.

use crate::model::{Device, MetricBucket, TestRecord};

/// Where one row's count lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution {
    Desktop,
    Mobile,
    Both,
    None,
}

impl Attribution {
    /// Decision table for rows that may qualify on either status column.
    pub fn smart(device: Device, desktop: bool, mobile: bool) -> Self {
        match (device, desktop, mobile) {
            (_, false, false) => Attribution::None,
            (Device::Desktop, true, _) => Attribution::Desktop,
            (Device::Desktop, false, _) => Attribution::None,
            (Device::Mobile, _, true) => Attribution::Mobile,
            (Device::Mobile, _, false) => Attribution::None,
            (Device::Both | Device::Other, true, true) => Attribution::Both,
            (Device::Both | Device::Other, true, false) => Attribution::Desktop,
            (Device::Both | Device::Other, false, true) => Attribution::Mobile,
        }
    }

    /// Attribution of a matching row by Device alone. An unrecognized device
    /// counts as `both` since its platform cannot be told.
    pub fn simple(device: Device, matched: bool) -> Self {
        match (device, matched) {
            (_, false) => Attribution::None,
            (Device::Desktop, true) => Attribution::Desktop,
            (Device::Mobile, true) => Attribution::Mobile,
            (Device::Both | Device::Other, true) => Attribution::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Counts {
    desktop: u64,
    mobile: u64,
    both: u64,
}

impl Counts {
    fn add(self, a: Attribution) -> Self {
        match a {
            Attribution::Desktop => Self {
                desktop: self.desktop + 1,
                ..self
            },
            Attribution::Mobile => Self {
                mobile: self.mobile + 1,
                ..self
            },
            Attribution::Both => Self {
                both: self.both + 1,
                ..self
            },
            Attribution::None => self,
        }
    }

    fn into_bucket(self) -> MetricBucket {
        MetricBucket::new(self.desktop, self.mobile, self.both)
    }
}

fn fold<I>(attributions: I) -> MetricBucket
where
    I: IntoIterator<Item = Attribution>,
{
    attributions
        .into_iter()
        .fold(Counts::default(), Counts::add)
        .into_bucket()
}

pub fn classify_smart<D, M>(
    records: &[TestRecord<'_>],
    desktop_match: D,
    mobile_match: M,
) -> MetricBucket
where
    D: Fn(&TestRecord<'_>) -> bool,
    M: Fn(&TestRecord<'_>) -> bool,
{
    fold(
        records
            .iter()
            .map(|r| Attribution::smart(r.device(), desktop_match(r), mobile_match(r))),
    )
}

pub fn classify_simple<P>(records: &[TestRecord<'_>], matches: P) -> MetricBucket
where
    P: Fn(&TestRecord<'_>) -> bool,
{
    fold(records.iter().map(|r| Attribution::simple(r.device(), matches(r))))
}
