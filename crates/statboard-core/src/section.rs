//! Splitting the plan export into its desktop and mobile listings.
//!
//! The plan is a desktop listing followed by a mobile listing, joined by one
//! row whose identifier cell is empty.

use crate::table::{Column, TableView};

#[derive(Debug, Clone, Copy)]
pub struct Sections<'a> {
    pub desktop: TableView<'a>,
    pub mobile: TableView<'a>,
    /// Row index of the separator in the plan table, if one was found.
    pub separator: Option<usize>,
}

/// Splits at the first row with a missing identifier.
///
/// Without such a row, or without an identifier column at all, the whole
/// table is the desktop section and the mobile section is empty.
pub fn split(plan: TableView<'_>, identifier: Option<Column>) -> Sections<'_> {
    let separator = identifier
        .and_then(|col| plan.rows().position(|row| row.get(Some(col)).is_none()));

    match separator {
        Some(idx) => {
            let (desktop, mobile) = plan.split_around(idx);
            tracing::debug!(
                event = "statboard.section.split",
                separator = idx,
                desktop_rows = desktop.len(),
                mobile_rows = mobile.len()
            );
            Sections {
                desktop,
                mobile,
                separator: Some(idx),
            }
        }
        None => {
            tracing::debug!(
                event = "statboard.section.no_separator",
                rows = plan.len(),
                has_identifier_column = identifier.is_some()
            );
            Sections {
                desktop: plan,
                mobile: plan.empty(),
                separator: None,
            }
        }
    }
}
