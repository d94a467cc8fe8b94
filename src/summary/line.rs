//! Display lines for the summary panel
//!
//! Each line variant is immutable once constructed and knows three things:
//! how to render itself as styled spans, how to render itself as plain text
//! (used for search and export), and whether it can receive the selection
//! cursor. The two renderings must stay textually consistent, ignoring
//! styling and glyphs.

use ratatui::text::Span;

use crate::repo::{ChangeKind, RefHandle, Section, StatusEntry};
use crate::tui::theme::Theme;

const AHEAD_GLYPH: &str = "↑";
const BEHIND_GLYPH: &str = "↓";

/// One display line of the summary panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryLine {
    /// Blank spacer row
    Empty,
    /// Block header such as "Branch" or "Modified Files"
    Header(&'static str),
    /// The current HEAD with optional tracking counts
    Branch(RefHandle),
    /// One file-level change record
    StatusFile {
        section: Section,
        entry: StatusEntry,
    },
    /// Placeholder shown when there are no modified files
    NoChanges,
}

impl SummaryLine {
    /// Whether this line can receive the selection cursor
    pub fn is_selectable(&self) -> bool {
        matches!(
            self,
            SummaryLine::Branch(_) | SummaryLine::StatusFile { .. }
        )
    }

    /// Styled spans for this line
    pub fn render(&self, theme: &Theme) -> Vec<Span<'static>> {
        match self {
            SummaryLine::Empty => Vec::new(),
            SummaryLine::Header(text) => vec![Span::styled((*text).to_string(), theme.header())],
            SummaryLine::Branch(head) => render_branch(head, theme),
            SummaryLine::StatusFile { section, entry } => {
                let (prefix, files) = status_line_parts(*section, entry);
                vec![
                    Span::styled(prefix.to_string(), theme.section_prefix(*section)),
                    Span::styled(format!(" {files}"), theme.text()),
                ]
            }
            SummaryLine::NoChanges => vec![Span::styled("None".to_string(), theme.no_changes())],
        }
    }

    /// Plain-text equivalent of [`SummaryLine::render`]
    pub fn as_text(&self) -> String {
        match self {
            SummaryLine::Empty => String::new(),
            SummaryLine::Header(text) => (*text).to_string(),
            SummaryLine::Branch(head) => branch_text(head),
            SummaryLine::StatusFile { section, entry } => {
                let (prefix, files) = status_line_parts(*section, entry);
                format!("{prefix} {files}")
            }
            SummaryLine::NoChanges => "None".to_string(),
        }
    }
}

fn render_branch(head: &RefHandle, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(head.display_name(), theme.text())];

    if let Some(tracking) = head.tracking() {
        spans.push(Span::styled(format!(" ({AHEAD_GLYPH}"), theme.text()));
        spans.push(Span::styled(
            format!("{} ", tracking.ahead),
            theme.branch_ahead(),
        ));
        spans.push(Span::styled(BEHIND_GLYPH.to_string(), theme.text()));
        spans.push(Span::styled(
            tracking.behind.to_string(),
            theme.branch_behind(),
        ));
        spans.push(Span::styled(")".to_string(), theme.text()));
    }

    spans
}

fn branch_text(head: &RefHandle) -> String {
    match head.tracking() {
        Some(tracking) => format!(
            "{} (^{} v{})",
            head.display_name(),
            tracking.ahead,
            tracking.behind
        ),
        None => head.display_name(),
    }
}

/// One-character prefix and path column for a status entry
///
/// New files show `?` when unstaged and `A` once staged; renames show
/// `old -> new`.
fn status_line_parts(section: Section, entry: &StatusEntry) -> (&'static str, String) {
    let prefix = match entry.kind {
        ChangeKind::New => {
            if section == Section::Staged {
                "A"
            } else {
                "?"
            }
        }
        ChangeKind::Modified => "M",
        ChangeKind::Deleted => "D",
        ChangeKind::Renamed => "R",
        ChangeKind::TypeChanged => "T",
        ChangeKind::Conflicted => "U",
    };

    let files = match &entry.old_path {
        Some(old_path) if entry.kind == ChangeKind::Renamed => {
            format!("{old_path} -> {}", entry.new_path)
        }
        _ => entry.new_path.clone(),
    };

    (prefix, files)
}
