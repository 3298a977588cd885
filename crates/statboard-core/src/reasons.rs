//! Counting free-text "not applicable" reasons.

use crate::config::Vocabulary;
use crate::model::{Platform, ReasonTally, TestRecord};

pub const NO_REASON: &str = "No reason specified";

/// Tallies the reasons of rows whose `platform` status is in
/// `not_applicable`.
///
/// A reason cell may hold several reasons, one per line; each non-blank line
/// counts once. A blank cell counts as [`NO_REASON`]. `has_reason_column`
/// false yields an empty tally regardless of matching rows.
pub fn tally(
    section: &[TestRecord<'_>],
    platform: Platform,
    not_applicable: &Vocabulary,
    has_reason_column: bool,
) -> ReasonTally {
    if !has_reason_column {
        return ReasonTally::default();
    }

    // (reason, count) in first-seen order.
    let mut seen: Vec<(String, u64)> = Vec::new();
    let mut bump = |reason: &str| match seen.iter_mut().find(|(r, _)| r == reason) {
        Some((_, n)) => *n += 1,
        None => seen.push((reason.to_string(), 1)),
    };

    for rec in section
        .iter()
        .filter(|r| not_applicable.matches(r.platform_status(platform)))
    {
        match rec.na_reason.filter(|s| !s.trim().is_empty()) {
            None => bump(NO_REASON),
            Some(text) => text
                .split(['\n', '\r'])
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .for_each(&mut bump),
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    seen.sort_by(|a, b| b.1.cmp(&a.1));
    ReasonTally::from_ordered(seen)
}
