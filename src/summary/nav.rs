//! Generic list navigation and search
//!
//! The fallback stage of action dispatch: cursor movement over selectable
//! rows and regex search over their plain text. Knows nothing about what the
//! rows mean; it consumes them through the narrow [`RowSource`] surface.

use regex::Regex;

use crate::summary::actions::Action;
use crate::summary::line::SummaryLine;
use crate::summary::viewport::ViewportState;

/// Row access surface consumed by the navigator
///
/// Out-of-range indices are not errors: `line_as_text` yields an empty
/// string and `is_selectable` yields false.
pub trait RowSource {
    fn row_count(&self) -> usize;
    fn line_as_text(&self, index: usize) -> String;
    fn is_selectable(&self, index: usize) -> bool;
}

impl RowSource for [SummaryLine] {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn line_as_text(&self, index: usize) -> String {
        self.get(index).map(SummaryLine::as_text).unwrap_or_default()
    }

    fn is_selectable(&self, index: usize) -> bool {
        self.get(index).is_some_and(SummaryLine::is_selectable)
    }
}

/// Find the selectable row nearest to `from`: at or after it, otherwise the
/// closest one before it
pub fn nearest_selectable<S: RowSource + ?Sized>(source: &S, from: usize) -> Option<usize> {
    let count = source.row_count();
    if count == 0 {
        return None;
    }
    let from = from.min(count - 1);

    (from..count)
        .find(|&i| source.is_selectable(i))
        .or_else(|| (0..from).rev().find(|&i| source.is_selectable(i)))
}

/// Generic selection movement over a [`RowSource`]
///
/// Mutates only the viewport; the caller owns locking and redraw requests.
pub struct ListNavigator;

impl ListNavigator {
    /// Handle a navigation action; returns false when the action is not a
    /// navigation action. Movement that hits the list edge still counts as
    /// handled.
    pub fn handle_action<S: RowSource + ?Sized>(
        action: &Action,
        source: &S,
        viewport: &mut ViewportState,
        page_rows: usize,
    ) -> bool {
        let page = page_rows.max(1);
        match action {
            Action::NextLine => Self::move_down(source, viewport, 1),
            Action::PrevLine => Self::move_up(source, viewport, 1),
            Action::PageDown => Self::move_down(source, viewport, page),
            Action::PageUp => Self::move_up(source, viewport, page),
            Action::FirstLine => Self::select_first(source, viewport),
            Action::LastLine => Self::select_last(source, viewport),
            Action::ScrollLeft => viewport.scroll_left(1),
            Action::ScrollRight => viewport.scroll_right(1),
            _ => return false,
        }
        true
    }

    fn move_down<S: RowSource + ?Sized>(source: &S, viewport: &mut ViewportState, step: usize) {
        let count = source.row_count();
        if count == 0 {
            return;
        }

        let target = viewport.selected.saturating_add(step).min(count - 1);
        let next = (target..count)
            .find(|&i| source.is_selectable(i))
            .or_else(|| {
                (viewport.selected + 1..target)
                    .rev()
                    .find(|&i| source.is_selectable(i))
            });

        if let Some(index) = next {
            viewport.selected = index;
        }
    }

    fn move_up<S: RowSource + ?Sized>(source: &S, viewport: &mut ViewportState, step: usize) {
        let count = source.row_count();
        if count == 0 || viewport.selected == 0 {
            return;
        }

        let target = viewport.selected.saturating_sub(step);
        let next = (0..=target)
            .rev()
            .find(|&i| source.is_selectable(i))
            .or_else(|| {
                (target + 1..viewport.selected).find(|&i| source.is_selectable(i))
            });

        if let Some(index) = next {
            viewport.selected = index;
        }
    }

    fn select_first<S: RowSource + ?Sized>(source: &S, viewport: &mut ViewportState) {
        if let Some(index) = nearest_selectable(source, 0) {
            viewport.selected = index;
        }
    }

    fn select_last<S: RowSource + ?Sized>(source: &S, viewport: &mut ViewportState) {
        let count = source.row_count();
        if let Some(index) = (0..count).rev().find(|&i| source.is_selectable(i)) {
            viewport.selected = index;
        }
    }
}

/// Search state owned by the generic list layer
#[derive(Debug, Default, Clone)]
pub struct SearchState {
    pattern: Option<Regex>,
    last_match_found: bool,
}

impl SearchState {
    /// Compile and store a new search pattern
    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), regex::Error> {
        self.pattern = Some(Regex::new(pattern)?);
        self.last_match_found = false;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.pattern = None;
        self.last_match_found = false;
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Whether the most recent search found a match
    pub fn last_match_found(&self) -> bool {
        self.last_match_found
    }

    /// Find the next selectable row at or after `from` (wrapping) whose text
    /// matches the pattern
    pub fn find_next<S: RowSource + ?Sized>(&mut self, source: &S, from: usize) -> Option<usize> {
        let pattern = self.pattern.as_ref()?;
        let count = source.row_count();
        if count == 0 {
            self.last_match_found = false;
            return None;
        }

        let found = (0..count)
            .map(|offset| (from + offset) % count)
            .find(|&i| source.is_selectable(i) && pattern.is_match(&source.line_as_text(i)));

        self.last_match_found = found.is_some();
        found
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::repo::{ChangeKind, RefHandle, Section, StatusEntry};

    fn sample_lines() -> Vec<SummaryLine> {
        vec![
            SummaryLine::Empty,
            SummaryLine::Header("Branch"),
            SummaryLine::Branch(RefHandle::Local {
                name: "main".to_string(),
                tracking: None,
            }),
            SummaryLine::Empty,
            SummaryLine::Empty,
            SummaryLine::Header("Modified Files"),
            SummaryLine::StatusFile {
                section: Section::Staged,
                entry: StatusEntry::new(ChangeKind::Modified, "src/a.rs"),
            },
            SummaryLine::StatusFile {
                section: Section::Unstaged,
                entry: StatusEntry::new(ChangeKind::New, "b.txt"),
            },
            SummaryLine::Empty,
        ]
    }

    #[test]
    fn test_nearest_selectable() {
        let lines = sample_lines();
        assert_eq!(nearest_selectable(lines.as_slice(), 0), Some(2));
        assert_eq!(nearest_selectable(lines.as_slice(), 2), Some(2));
        // After the last selectable row, fall back to the one before
        assert_eq!(nearest_selectable(lines.as_slice(), 8), Some(7));
        // Way out of range clamps to the end first
        assert_eq!(nearest_selectable(lines.as_slice(), 100), Some(7));

        let unselectable = vec![SummaryLine::Empty, SummaryLine::Header("x")];
        assert_eq!(nearest_selectable(unselectable.as_slice(), 0), None);
    }

    #[test]
    fn test_next_line_skips_unselectable() {
        let lines = sample_lines();
        let mut viewport = ViewportState {
            selected: 2,
            ..Default::default()
        };

        assert!(ListNavigator::handle_action(
            &Action::NextLine,
            lines.as_slice(),
            &mut viewport,
            5,
        ));
        // Rows 3-5 are spacers and a header; lands on the first status file
        assert_eq!(viewport.selected, 6);
    }

    #[test]
    fn test_prev_line_skips_unselectable() {
        let lines = sample_lines();
        let mut viewport = ViewportState {
            selected: 6,
            ..Default::default()
        };

        ListNavigator::handle_action(&Action::PrevLine, lines.as_slice(), &mut viewport, 5);
        assert_eq!(viewport.selected, 2);
    }

    #[test]
    fn test_movement_stops_at_edges() {
        let lines = sample_lines();
        let mut viewport = ViewportState {
            selected: 7,
            ..Default::default()
        };

        ListNavigator::handle_action(&Action::NextLine, lines.as_slice(), &mut viewport, 5);
        assert_eq!(viewport.selected, 7);

        viewport.selected = 2;
        ListNavigator::handle_action(&Action::PrevLine, lines.as_slice(), &mut viewport, 5);
        assert_eq!(viewport.selected, 2);
    }

    #[test]
    fn test_first_and_last() {
        let lines = sample_lines();
        let mut viewport = ViewportState {
            selected: 6,
            ..Default::default()
        };

        ListNavigator::handle_action(&Action::FirstLine, lines.as_slice(), &mut viewport, 5);
        assert_eq!(viewport.selected, 2);

        ListNavigator::handle_action(&Action::LastLine, lines.as_slice(), &mut viewport, 5);
        assert_eq!(viewport.selected, 7);
    }

    #[test]
    fn test_page_down() {
        let lines = sample_lines();
        let mut viewport = ViewportState {
            selected: 2,
            ..Default::default()
        };

        ListNavigator::handle_action(&Action::PageDown, lines.as_slice(), &mut viewport, 4);
        assert_eq!(viewport.selected, 6);
    }

    #[test]
    fn test_non_navigation_action_not_handled() {
        let lines = sample_lines();
        let mut viewport = ViewportState::default();
        assert!(!ListNavigator::handle_action(
            &Action::Refresh,
            lines.as_slice(),
            &mut viewport,
            5,
        ));
    }

    #[test]
    fn test_search_finds_matching_row() {
        let lines = sample_lines();
        let mut search = SearchState::default();
        search.set_pattern("b\\.txt").unwrap();

        assert_eq!(search.find_next(lines.as_slice(), 0), Some(7));
        assert!(search.last_match_found());
    }

    #[test]
    fn test_search_wraps_around() {
        let lines = sample_lines();
        let mut search = SearchState::default();
        search.set_pattern("main").unwrap();

        assert_eq!(search.find_next(lines.as_slice(), 6), Some(2));
    }

    #[test]
    fn test_search_no_match() {
        let lines = sample_lines();
        let mut search = SearchState::default();
        search.set_pattern("nomatch").unwrap();

        assert_eq!(search.find_next(lines.as_slice(), 0), None);
        assert!(!search.last_match_found());
    }

    #[test]
    fn test_search_rejects_bad_pattern() {
        let mut search = SearchState::default();
        assert!(search.set_pattern("(unclosed").is_err());
    }
}
