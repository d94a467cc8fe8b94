//! Summary view: reactive line store, viewport renderer and action router
//!
//! One mutex guards the line list and viewport as a single unit. Every
//! public entry point takes it for the duration of the operation, and no
//! public operation calls back into another while holding it. Regeneration
//! reads only the provider's materialized snapshot, so lock hold time is
//! bounded by list construction.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use ratatui::text::Span;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::error::Result;
use crate::repo::{RepoEvent, RepoQuery};
use crate::summary::actions::{Action, ActionKind};
use crate::summary::line::SummaryLine;
use crate::summary::nav::{nearest_selectable, ListNavigator, RowSource, SearchState};
use crate::summary::rows;
use crate::summary::viewport::{ViewDimension, ViewportState};
use crate::summary::window::RenderWindow;
use crate::tui::event::AppEvent;
use crate::tui::theme::Theme;

/// Fixed indentation prefix for every drawn row
const INDENT: &str = "     ";

/// Callback invoked when the selected row changes; receives the row index
/// and its plain text
pub type SelectionChanged = Box<dyn Fn(usize, &str) + Send + Sync>;

/// Everything guarded by the view lock
struct ViewState {
    lines: Vec<SummaryLine>,
    viewport: ViewportState,
    last_dimension: ViewDimension,
    search: SearchState,
}

type SummaryHandler = fn(&SummaryView, &mut ViewState, &Action) -> Result<()>;

/// The summary panel component
pub struct SummaryView {
    repo: Arc<dyn RepoQuery>,
    state: Mutex<ViewState>,
    handlers: HashMap<ActionKind, SummaryHandler>,
    redraw: UnboundedSender<AppEvent>,
    on_selection_changed: Option<SelectionChanged>,
    theme: Theme,
    active: AtomicBool,
}

impl SummaryView {
    pub fn new(repo: Arc<dyn RepoQuery>, theme: Theme, redraw: UnboundedSender<AppEvent>) -> Self {
        let mut handlers: HashMap<ActionKind, SummaryHandler> = HashMap::new();
        handlers.insert(ActionKind::Refresh, Self::handle_refresh);
        handlers.insert(ActionKind::Search, Self::handle_search);
        handlers.insert(ActionKind::SearchNext, Self::handle_search_next);
        handlers.insert(ActionKind::ClearSearch, Self::handle_clear_search);

        Self {
            repo,
            state: Mutex::new(ViewState {
                lines: Vec::new(),
                viewport: ViewportState::new(),
                last_dimension: ViewDimension::default(),
                search: SearchState::default(),
            }),
            handlers,
            redraw,
            on_selection_changed: None,
            theme,
            active: AtomicBool::new(false),
        }
    }

    /// Register the selection-changed hook. Used only to refresh derived
    /// display variables; must not call back into this view.
    pub fn set_on_selection_changed(&mut self, callback: SelectionChanged) {
        self.on_selection_changed = Some(callback);
    }

    /// Whether this view currently has focus (controls selection highlight)
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    /// Build the initial line list and selection
    pub fn initialise(&self) {
        let mut state = self.state();
        self.regenerate(&mut state);
    }

    /// Any repository notification collapses to the same recovery action:
    /// re-pull the current snapshot and rebuild. Idempotent under
    /// notification storms.
    pub fn on_repo_event(&self, event: RepoEvent) {
        debug!(?event, "repository change notification");
        let mut state = self.state();
        self.regenerate(&mut state);
    }

    /// Draw the visible window of rows into `win`
    ///
    /// Sink failures abort the rest of the pass and propagate; rows already
    /// drawn remain.
    pub fn render(&self, win: &mut dyn RenderWindow) -> Result<()> {
        let mut guard = self.state();
        let state = &mut *guard;

        state.last_dimension = win.dimension();
        let rows = usize::from(state.last_dimension.rows);
        let total = state.lines.len();
        state.viewport.determine_start_row(rows, total);

        let start_col = state.viewport.start_col;
        let mut line_index = state.viewport.start_row;
        let mut row: u16 = 0;

        while usize::from(row) < rows && line_index < total {
            let mut spans = vec![Span::raw(INDENT)];
            spans.extend(state.lines[line_index].render(&self.theme));
            win.draw_row(row, start_col, spans)?;
            row += 1;
            line_index += 1;
        }

        if rows > 0 && total > 0 {
            let selected_row = (state.viewport.selected - state.viewport.start_row) as u16;
            win.set_selected_row(selected_row, self.active.load(Ordering::Relaxed))?;
        }

        if state.search.last_match_found() {
            if let Some(pattern) = state.search.pattern() {
                win.highlight(pattern, self.theme.search_match())?;
            }
        }

        Ok(())
    }

    /// Two-stage dispatch: view handler table, then the generic navigator.
    /// Returns false when neither stage claims the action.
    pub fn handle_action(&self, action: &Action) -> Result<bool> {
        let mut guard = self.state();

        if let Some(handler) = self.handlers.get(&action.kind()) {
            debug!(kind = ?action.kind(), "action handled by summary view");
            handler(self, &mut guard, action)?;
            return Ok(true);
        }

        let state = &mut *guard;
        let before = state.viewport.selected;
        let page = usize::from(state.last_dimension.rows).max(1);

        if ListNavigator::handle_action(action, state.lines.as_slice(), &mut state.viewport, page) {
            debug!(kind = ?action.kind(), "action handled by list navigator");
            if state.viewport.selected != before {
                self.selection_changed(state);
            }
            self.request_redraw();
            return Ok(true);
        }

        debug!(kind = ?action.kind(), "action not handled");
        Ok(false)
    }

    /// Number of lines in the current list
    pub fn row_count(&self) -> usize {
        self.state().lines.len()
    }

    /// Plain text of line `index`; empty when out of range
    pub fn line_as_text(&self, index: usize) -> String {
        self.state().lines.line_as_text(index)
    }

    /// Whether line `index` is selectable; false when out of range
    pub fn is_selectable(&self, index: usize) -> bool {
        self.state().lines.is_selectable(index)
    }

    /// Plain text of the selected line
    pub fn selected_text(&self) -> String {
        let state = self.state();
        state.lines.line_as_text(state.viewport.selected)
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the line list wholesale from the provider's current snapshot
    /// and recompute the nearest selectable row. Caller holds the lock.
    fn regenerate(&self, state: &mut ViewState) {
        let head = self.repo.head();
        let status = self.repo.status();
        state.lines = rows::generate_rows(&head, status.as_ref());

        let before = state.viewport.selected;
        state.viewport.selected =
            nearest_selectable(state.lines.as_slice(), state.viewport.selected).unwrap_or(0);
        if state.viewport.selected != before {
            self.selection_changed(state);
        }

        self.request_redraw();
    }

    fn selection_changed(&self, state: &ViewState) {
        if let Some(callback) = &self.on_selection_changed {
            let text = state.lines.line_as_text(state.viewport.selected);
            callback(state.viewport.selected, &text);
        }
    }

    fn request_redraw(&self) {
        // Receiver gone means the app is shutting down
        let _ = self.redraw.send(AppEvent::Redraw);
    }

    fn handle_refresh(view: &SummaryView, state: &mut ViewState, _action: &Action) -> Result<()> {
        view.regenerate(state);
        Ok(())
    }

    fn handle_search(view: &SummaryView, state: &mut ViewState, action: &Action) -> Result<()> {
        let Action::Search(pattern) = action else {
            return Ok(());
        };
        state.search.set_pattern(pattern)?;
        let from = state.viewport.selected;
        view.jump_to_match(state, from);
        Ok(())
    }

    fn handle_search_next(
        view: &SummaryView,
        state: &mut ViewState,
        _action: &Action,
    ) -> Result<()> {
        let from = (state.viewport.selected + 1) % state.lines.len().max(1);
        view.jump_to_match(state, from);
        Ok(())
    }

    fn handle_clear_search(
        view: &SummaryView,
        state: &mut ViewState,
        _action: &Action,
    ) -> Result<()> {
        state.search.clear();
        view.request_redraw();
        Ok(())
    }

    fn jump_to_match(&self, state: &mut ViewState, from: usize) {
        let found = {
            let ViewState { lines, search, .. } = state;
            search.find_next(lines.as_slice(), from)
        };
        if let Some(index) = found {
            if state.viewport.selected != index {
                state.viewport.selected = index;
                self.selection_changed(state);
            }
        }
        self.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use pretty_assertions::assert_eq;
    use ratatui::style::Style;
    use regex::Regex;
    use tokio::sync::mpsc;

    use super::*;
    use crate::error::RenderError;
    use crate::repo::{ChangeKind, MemoryRepo, RefHandle, Section, StatusEntry, StatusSnapshot};

    /// Recording sink; optionally fails from a given row onwards
    struct TestWindow {
        rows: u16,
        fail_from_row: Option<u16>,
        drawn: Vec<String>,
        selected_row: Option<u16>,
        highlighted: Vec<String>,
    }

    impl TestWindow {
        fn new(rows: u16) -> Self {
            Self {
                rows,
                fail_from_row: None,
                drawn: Vec::new(),
                selected_row: None,
                highlighted: Vec::new(),
            }
        }
    }

    impl RenderWindow for TestWindow {
        fn dimension(&self) -> ViewDimension {
            ViewDimension {
                rows: self.rows,
                cols: 80,
            }
        }

        fn draw_row(
            &mut self,
            row: u16,
            _start_col: usize,
            spans: Vec<Span<'static>>,
        ) -> std::result::Result<(), RenderError> {
            if self.fail_from_row.is_some_and(|from| row >= from) {
                return Err(RenderError::Backend("test failure".to_string()));
            }
            let text: String = spans.iter().map(|span| span.content.as_ref()).collect();
            self.drawn.push(text.trim_end().to_string());
            Ok(())
        }

        fn set_selected_row(
            &mut self,
            row: u16,
            _active: bool,
        ) -> std::result::Result<(), RenderError> {
            self.selected_row = Some(row);
            Ok(())
        }

        fn highlight(
            &mut self,
            pattern: &Regex,
            _style: Style,
        ) -> std::result::Result<(), RenderError> {
            self.highlighted.push(pattern.as_str().to_string());
            Ok(())
        }
    }

    fn test_repo() -> Arc<MemoryRepo> {
        let mut status = StatusSnapshot::new();
        status.push(
            Section::Staged,
            StatusEntry::new(ChangeKind::Modified, "src/a.rs"),
        );
        status.push(Section::Unstaged, StatusEntry::new(ChangeKind::New, "b.txt"));

        Arc::new(MemoryRepo::new(
            RefHandle::Local {
                name: "main".to_string(),
                tracking: None,
            },
            Some(status),
        ))
    }

    fn test_view(repo: Arc<MemoryRepo>) -> SummaryView {
        let (tx, _rx) = mpsc::unbounded_channel();
        let view = SummaryView::new(repo, Theme::basic(), tx);
        view.initialise();
        view
    }

    #[test]
    fn test_initialise_selects_first_selectable() {
        let view = test_view(test_repo());
        assert_eq!(view.row_count(), 9);
        // Branch line at index 2 is the first selectable row
        assert!(view.is_selectable(2));
        assert_eq!(view.selected_text(), "main");
    }

    #[test]
    fn test_row_accessors_bounds_checked() {
        let view = test_view(test_repo());
        assert_eq!(view.line_as_text(100), "");
        assert!(!view.is_selectable(100));
    }

    #[test]
    fn test_render_draws_visible_window() {
        let view = test_view(test_repo());
        let mut win = TestWindow::new(4);

        view.render(&mut win).unwrap();

        assert_eq!(win.drawn.len(), 4);
        assert_eq!(win.drawn[1].trim(), "Branch");
        assert_eq!(win.drawn[2].trim(), "main");
        assert_eq!(win.selected_row, Some(2));
    }

    #[test]
    fn test_render_draws_all_rows_when_window_is_tall() {
        let view = test_view(test_repo());
        let mut win = TestWindow::new(30);

        view.render(&mut win).unwrap();

        assert_eq!(win.drawn.len(), 9);
        assert_eq!(win.drawn[6].trim(), "M src/a.rs");
        assert_eq!(win.drawn[7].trim(), "? b.txt");
    }

    #[test]
    fn test_render_failure_aborts_pass() {
        let view = test_view(test_repo());
        let mut win = TestWindow::new(10);
        win.fail_from_row = Some(3);

        let err = view.render(&mut win).unwrap_err();
        assert!(matches!(err, crate::error::Error::Render(_)));
        // Rows before the failure were drawn and remain
        assert_eq!(win.drawn.len(), 3);
        assert_eq!(win.selected_row, None);
    }

    #[test]
    fn test_selection_stays_visible_after_navigation() {
        let view = test_view(test_repo());
        let mut win = TestWindow::new(3);
        view.render(&mut win).unwrap();

        view.handle_action(&Action::LastLine).unwrap();

        let mut win = TestWindow::new(3);
        view.render(&mut win).unwrap();
        let selected = win.selected_row.unwrap();
        assert!(usize::from(selected) < win.drawn.len());
        assert_eq!(win.drawn[usize::from(selected)].trim(), "? b.txt");
    }

    #[test]
    fn test_repo_events_regenerate() {
        let repo = test_repo();
        let view = test_view(repo.clone());

        repo.set_status(None);
        view.on_repo_event(RepoEvent::StatusChanged);

        assert_eq!(view.line_as_text(6), "None");
        assert_eq!(view.row_count(), 7);
    }

    #[test]
    fn test_identical_notifications_are_idempotent() {
        let repo = test_repo();
        let view = test_view(repo.clone());

        view.on_repo_event(RepoEvent::StatusChanged);
        let first: Vec<String> = (0..view.row_count())
            .map(|i| view.line_as_text(i))
            .collect();

        view.on_repo_event(RepoEvent::StatusChanged);
        let second: Vec<String> = (0..view.row_count())
            .map(|i| view.line_as_text(i))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_selection_recomputed_after_shrink() {
        let repo = test_repo();
        let view = test_view(repo.clone());

        view.handle_action(&Action::LastLine).unwrap();
        assert_eq!(view.selected_text(), "? b.txt");

        // Status clears; old selection index now points past the new list
        repo.set_status(None);
        view.on_repo_event(RepoEvent::StatusChanged);

        assert_eq!(view.selected_text(), "main");
    }

    #[test]
    fn test_navigation_falls_through_to_navigator() {
        let view = test_view(test_repo());
        // Render once so page size is known
        let mut win = TestWindow::new(10);
        view.render(&mut win).unwrap();

        assert!(view.handle_action(&Action::NextLine).unwrap());
        assert_eq!(view.selected_text(), "M src/a.rs");
    }

    #[test]
    fn test_search_jumps_and_highlights() {
        let view = test_view(test_repo());

        assert!(view
            .handle_action(&Action::Search("b\\.txt".to_string()))
            .unwrap());
        assert_eq!(view.selected_text(), "? b.txt");

        let mut win = TestWindow::new(10);
        view.render(&mut win).unwrap();
        assert_eq!(win.highlighted, vec!["b\\.txt".to_string()]);

        assert!(view.handle_action(&Action::ClearSearch).unwrap());
        let mut win = TestWindow::new(10);
        view.render(&mut win).unwrap();
        assert!(win.highlighted.is_empty());
    }

    #[test]
    fn test_bad_search_pattern_is_an_error() {
        let view = test_view(test_repo());
        assert!(view
            .handle_action(&Action::Search("(unclosed".to_string()))
            .is_err());
    }

    #[test]
    fn test_selection_changed_callback() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut view = SummaryView::new(test_repo(), Theme::basic(), tx);

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(String::new()));
        view.set_on_selection_changed({
            let calls = calls.clone();
            let seen = seen.clone();
            Box::new(move |_, text| {
                calls.fetch_add(1, Ordering::SeqCst);
                *seen.lock().unwrap() = text.to_string();
            })
        });

        view.initialise();
        view.handle_action(&Action::NextLine).unwrap();

        assert!(calls.load(Ordering::SeqCst) >= 2);
        assert_eq!(*seen.lock().unwrap(), "M src/a.rs");
    }

    #[test]
    fn test_refresh_action_handled_locally() {
        let repo = test_repo();
        let view = test_view(repo.clone());

        repo.set_head(RefHandle::Detached {
            commit_id: "abcd123".to_string(),
        });
        assert!(view.handle_action(&Action::Refresh).unwrap());
        assert_eq!(view.line_as_text(2), "<detached@abcd123>");
    }
}
