//! Row generation: repository snapshot to ordered line list
//!
//! Pure functions with no I/O; the line list is regenerated wholesale on
//! every repository change, never patched in place. The branch block always
//! precedes the modified-files block, and within a block element order
//! mirrors the snapshot's own ordering.

use crate::repo::{RefHandle, StatusSnapshot};
use crate::summary::line::SummaryLine;

/// Generate the full line list for a snapshot
pub fn generate_rows(head: &RefHandle, status: Option<&StatusSnapshot>) -> Vec<SummaryLine> {
    let mut rows = branch_rows(head);
    rows.extend(modified_file_rows(status));
    rows
}

/// The branch block: spacer, header, branch line, spacer
pub fn branch_rows(head: &RefHandle) -> Vec<SummaryLine> {
    vec![
        SummaryLine::Empty,
        SummaryLine::Header("Branch"),
        SummaryLine::Branch(head.clone()),
        SummaryLine::Empty,
    ]
}

/// The modified-files block
///
/// A missing or empty status yields the "None" placeholder with no trailing
/// spacer; otherwise one line per entry in snapshot order, then a spacer.
pub fn modified_file_rows(status: Option<&StatusSnapshot>) -> Vec<SummaryLine> {
    let mut rows = vec![SummaryLine::Empty, SummaryLine::Header("Modified Files")];

    let Some(status) = status.filter(|status| !status.is_empty()) else {
        rows.push(SummaryLine::NoChanges);
        return rows;
    };

    for section in status.sections() {
        for entry in status.entries(section) {
            rows.push(SummaryLine::StatusFile {
                section,
                entry: entry.clone(),
            });
        }
    }

    rows.push(SummaryLine::Empty);
    rows
}
