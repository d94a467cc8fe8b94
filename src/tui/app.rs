//! Application shell
//!
//! Terminal lifecycle, key-to-action mapping and frame drawing around the
//! summary view. Everything here is host glue: the view itself neither
//! knows about key codes nor about the terminal.

use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    widgets::{Block, Paragraph},
    Terminal,
};
use tracing::{debug, info};

use super::event::{AppEvent, EventLoop, InputEvent};
use super::theme::Theme;
use crate::config::Config;
use crate::error::{RenderError, Result};
use crate::repo::LocalRepo;
use crate::summary::{Action, BufferWindow, SummaryView};

/// Input interpretation mode
#[derive(Debug, Clone, PartialEq, Eq)]
enum InputMode {
    Normal,
    /// Typing a search pattern into the status bar
    Search(String),
}

/// Main application
pub struct App {
    config: Config,
    theme: Theme,
    repo: Arc<LocalRepo>,
    view: SummaryView,
    events: EventLoop,
    mode: InputMode,
    /// Plain text of the selected row, fed by the view's selection hook
    selected_text: Arc<Mutex<String>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, repo: Arc<LocalRepo>) -> Result<Self> {
        let theme = match config.color_mode()? {
            Some(mode) => Theme::for_color_mode(mode),
            None => Theme::default(),
        };

        let events = EventLoop::new();
        let mut view = SummaryView::new(repo.clone(), theme.clone(), events.sender());

        let selected_text = Arc::new(Mutex::new(String::new()));
        view.set_on_selection_changed({
            let slot = selected_text.clone();
            Box::new(move |_, text| {
                if let Ok(mut slot) = slot.lock() {
                    *slot = text.to_string();
                }
            })
        });
        view.set_active(true);

        Ok(Self {
            config,
            theme,
            repo,
            view,
            events,
            mode: InputMode::Normal,
            selected_text,
            should_quit: false,
        })
    }

    /// Run the application until quit
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = self.setup_terminal()?;

        let tick_rate = Duration::from_millis(1000 / u64::from(self.config.ui_refresh_fps.max(1)));
        self.events.start(tick_rate);
        self.start_repo_poller();
        self.view.initialise();

        info!("Entering main loop");
        let result = self.main_loop(&mut terminal).await;

        self.restore_terminal(&mut terminal)?;
        result
    }

    async fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        self.draw(terminal)?;

        while let Some(event) = self.events.next().await {
            match event {
                AppEvent::Input(InputEvent::Key(key)) => self.handle_key(key)?,
                AppEvent::Input(InputEvent::Resize(_, _))
                | AppEvent::Redraw
                | AppEvent::Tick => self.draw(terminal)?,
                AppEvent::Repo(repo_event) => self.view.on_repo_event(repo_event),
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the repository in the background and forward change events
    fn start_repo_poller(&self) {
        let repo = self.repo.clone();
        let tx = self.events.sender();
        let interval_ms = self.config.poll_interval_ms.max(100);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));

            loop {
                interval.tick().await;

                let repo = repo.clone();
                match tokio::task::spawn_blocking(move || repo.refresh()).await {
                    Ok(Ok(events)) => {
                        for event in events {
                            if tx.send(AppEvent::Repo(event)).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(Err(e)) => debug!("Repository refresh failed: {}", e),
                    Err(e) => {
                        debug!("Repository refresh task failed: {}", e);
                        return;
                    }
                }
            }
        });
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.mode.clone() {
            InputMode::Search(mut buffer) => match key.code {
                KeyCode::Esc => self.mode = InputMode::Normal,
                KeyCode::Enter => {
                    self.mode = InputMode::Normal;
                    if !buffer.is_empty() {
                        // Bad patterns are reported, not fatal
                        if let Err(e) = self.view.handle_action(&Action::Search(buffer)) {
                            debug!("Search rejected: {}", e);
                        }
                    }
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    self.mode = InputMode::Search(buffer);
                }
                KeyCode::Char(c) => {
                    buffer.push(c);
                    self.mode = InputMode::Search(buffer);
                }
                _ => self.mode = InputMode::Search(buffer),
            },

            InputMode::Normal => match (key.code, key.modifiers) {
                (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                    self.should_quit = true;
                }
                (KeyCode::Char('/'), _) => {
                    self.mode = InputMode::Search(String::new());
                }
                _ => {
                    if let Some(action) = map_key(key) {
                        let handled = self.view.handle_action(&action)?;
                        if !handled {
                            debug!(?action, "action not handled");
                        }
                    }
                }
            },
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut render_result = Ok(());

        terminal
            .draw(|frame| {
                let [main_area, bar_area] =
                    Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
                        .areas(frame.area());

                let block = Block::bordered()
                    .title("Summary")
                    .border_style(self.theme.border_focused());
                let inner = block.inner(main_area);
                frame.render_widget(block, main_area);

                {
                    let buf = frame.buffer_mut();
                    let mut win = BufferWindow::new(buf, inner, self.theme.selection());
                    render_result = self.view.render(&mut win);
                }

                let bar_text = match &self.mode {
                    InputMode::Search(buffer) => format!("/{buffer}"),
                    InputMode::Normal => self
                        .selected_text
                        .lock()
                        .map(|text| text.clone())
                        .unwrap_or_default(),
                };
                frame.render_widget(
                    Paragraph::new(bar_text).style(self.theme.status_bar()),
                    bar_area,
                );
            })
            .map_err(|e| RenderError::Backend(e.to_string()))?;

        render_result
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| RenderError::InitFailed(e.to_string()))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| RenderError::InitFailed(e.to_string()))?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| RenderError::InitFailed(e.to_string()))?;

        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        disable_raw_mode().map_err(|e| RenderError::RestoreFailed(e.to_string()))?;

        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| RenderError::RestoreFailed(e.to_string()))?;

        terminal
            .show_cursor()
            .map_err(|e| RenderError::RestoreFailed(e.to_string()))?;

        Ok(())
    }
}

/// Map a key event to an abstract action
fn map_key(key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Some(Action::PrevLine),
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Some(Action::NextLine),

        (KeyCode::PageUp, _) | (KeyCode::Char('u'), KeyModifiers::CONTROL) => Some(Action::PageUp),
        (KeyCode::PageDown, _) | (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
            Some(Action::PageDown)
        }

        (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => Some(Action::FirstLine),
        (KeyCode::End, _) | (KeyCode::Char('G'), KeyModifiers::SHIFT) => Some(Action::LastLine),

        (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => Some(Action::ScrollLeft),
        (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => Some(Action::ScrollRight),

        (KeyCode::Char('n'), KeyModifiers::NONE) => Some(Action::SearchNext),
        (KeyCode::Esc, _) => Some(Action::ClearSearch),
        (KeyCode::Char('r'), KeyModifiers::NONE) => Some(Action::Refresh),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_navigation_keys() {
        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(map_key(key), Some(Action::NextLine));

        let key = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(map_key(key), Some(Action::PrevLine));

        let key = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(map_key(key), Some(Action::LastLine));

        let key = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::PageDown));
    }

    #[test]
    fn test_unbound_key_maps_to_nothing() {
        let key = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(map_key(key), None);
    }
}
