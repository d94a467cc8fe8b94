//! TUI Theme configuration
//!
//! Centralized theme system for consistent styling across the UI.
//! Supports multiple color depths for terminal compatibility.

use ratatui::style::{Color, Modifier, Style};

use crate::repo::Section;

/// Terminal color capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Basic 16 ANSI colors (maximum compatibility)
    Basic,
    /// 256 color palette
    #[default]
    Indexed,
    /// True color (24-bit RGB)
    TrueColor,
}

impl ColorMode {
    /// Detect the best color mode for the current terminal
    pub fn detect() -> Self {
        // Check COLORTERM first (most reliable for true color)
        if let Ok(colorterm) = std::env::var("COLORTERM") {
            if colorterm == "truecolor" || colorterm == "24bit" {
                return Self::TrueColor;
            }
        }

        // Check TERM for 256 color support
        if let Ok(term) = std::env::var("TERM") {
            if term.contains("256color") || term.contains("kitty") || term.contains("alacritty") {
                // These terminals typically support true color even without COLORTERM
                if term.contains("kitty") || term.contains("alacritty") {
                    return Self::TrueColor;
                }
                return Self::Indexed;
            }
        }

        Self::Basic
    }
}

/// Theme configuration for the summary panel
#[derive(Clone)]
pub struct Theme {
    // Pane borders
    pub border_focused: Color,
    pub border_unfocused: Color,

    // Selection
    pub selection_bg: Color,
    pub selection_fg: Option<Color>,

    // Summary lines
    pub header: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub branch_ahead: Color,
    pub branch_behind: Color,
    pub staged_prefix: Color,
    pub unstaged_prefix: Color,
    pub no_changes: Color,

    // Search
    pub search_match_bg: Color,
    pub search_match_fg: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_color_mode(ColorMode::detect())
    }
}

impl Theme {
    /// Create a theme for the specified color mode
    pub fn for_color_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Basic => Self::basic(),
            ColorMode::Indexed => Self::indexed(),
            ColorMode::TrueColor => Self::truecolor(),
        }
    }

    /// Basic 16-color theme (maximum compatibility)
    pub fn basic() -> Self {
        Self {
            border_focused: Color::Cyan,
            border_unfocused: Color::DarkGray,

            selection_bg: Color::Blue,
            selection_fg: Some(Color::White),

            header: Color::Yellow,
            text_primary: Color::Reset,
            text_secondary: Color::DarkGray,
            branch_ahead: Color::Green,
            branch_behind: Color::Red,
            staged_prefix: Color::Green,
            unstaged_prefix: Color::Red,
            no_changes: Color::DarkGray,

            search_match_bg: Color::Yellow,
            search_match_fg: Color::Black,

            status_bar_bg: Color::Blue,
            status_bar_fg: Color::White,
        }
    }

    /// 256-color theme (good balance of compatibility and aesthetics)
    pub fn indexed() -> Self {
        Self {
            border_focused: Color::Indexed(117),  // Pastel sky blue
            border_unfocused: Color::Indexed(243),

            selection_bg: Color::Indexed(60),     // Muted purple-blue
            selection_fg: Some(Color::Indexed(255)),

            header: Color::Indexed(223),          // Pastel cream
            text_primary: Color::Reset,
            text_secondary: Color::Indexed(250),
            branch_ahead: Color::Indexed(156),    // Pastel mint
            branch_behind: Color::Indexed(210),   // Pastel coral
            staged_prefix: Color::Indexed(156),   // Pastel mint
            unstaged_prefix: Color::Indexed(210), // Pastel coral
            no_changes: Color::Indexed(248),

            search_match_bg: Color::Indexed(222), // Pastel peach
            search_match_fg: Color::Indexed(235),

            status_bar_bg: Color::Indexed(236),
            status_bar_fg: Color::Indexed(252),
        }
    }

    /// True color theme (richest visual experience)
    pub fn truecolor() -> Self {
        Self {
            border_focused: Color::Rgb(137, 180, 250),   // Pastel sky blue
            border_unfocused: Color::Rgb(88, 91, 112),

            selection_bg: Color::Rgb(69, 71, 90),
            selection_fg: Some(Color::Rgb(245, 245, 250)),

            header: Color::Rgb(249, 226, 175),           // Pastel peach
            text_primary: Color::Rgb(245, 245, 250),
            text_secondary: Color::Rgb(166, 173, 200),
            branch_ahead: Color::Rgb(166, 227, 161),     // Pastel mint
            branch_behind: Color::Rgb(243, 139, 168),    // Pastel rose
            staged_prefix: Color::Rgb(166, 227, 161),    // Pastel mint
            unstaged_prefix: Color::Rgb(243, 139, 168),  // Pastel rose
            no_changes: Color::Rgb(147, 153, 178),       // Muted lavender

            search_match_bg: Color::Rgb(249, 226, 175),  // Pastel peach
            search_match_fg: Color::Rgb(30, 30, 46),

            status_bar_bg: Color::Rgb(49, 50, 68),
            status_bar_fg: Color::Rgb(205, 214, 244),
        }
    }

    /// Style for section headers
    pub fn header(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    /// Style for ordinary line text
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Style for the ahead count of a tracking branch
    pub fn branch_ahead(&self) -> Style {
        Style::default().fg(self.branch_ahead)
    }

    /// Style for the behind count of a tracking branch
    pub fn branch_behind(&self) -> Style {
        Style::default().fg(self.branch_behind)
    }

    /// Style for a status file prefix, by section
    pub fn section_prefix(&self, section: Section) -> Style {
        let color = match section {
            Section::Staged => self.staged_prefix,
            Section::Unstaged => self.unstaged_prefix,
        };
        Style::default().fg(color)
    }

    /// Style for the "None" placeholder when nothing is modified
    pub fn no_changes(&self) -> Style {
        Style::default().fg(self.no_changes)
    }

    /// Style for selected items
    pub fn selection(&self) -> Style {
        let style = Style::default().bg(self.selection_bg);
        match self.selection_fg {
            Some(fg) => style.fg(fg),
            None => style,
        }
    }

    /// Style for search match highlighting
    pub fn search_match(&self) -> Style {
        Style::default()
            .bg(self.search_match_bg)
            .fg(self.search_match_fg)
    }

    /// Style for focused pane borders
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    /// Style for unfocused pane borders
    pub fn border_unfocused(&self) -> Style {
        Style::default().fg(self.border_unfocused)
    }

    /// Style for status bar
    pub fn status_bar(&self) -> Style {
        Style::default().bg(self.status_bar_bg).fg(self.status_bar_fg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_theme() {
        let theme = Theme::basic();
        assert_eq!(theme.border_focused, Color::Cyan);
        assert_eq!(theme.staged_prefix, Color::Green);
    }

    #[test]
    fn test_indexed_theme() {
        let theme = Theme::indexed();
        assert_eq!(theme.header, Color::Indexed(223));
        assert_eq!(theme.selection_bg, Color::Indexed(60));
    }

    #[test]
    fn test_truecolor_theme() {
        let theme = Theme::truecolor();
        assert_eq!(theme.branch_ahead, Color::Rgb(166, 227, 161));
        assert_eq!(theme.branch_behind, Color::Rgb(243, 139, 168));
    }

    #[test]
    fn test_section_prefix_styles_differ() {
        let theme = Theme::basic();
        let staged = theme.section_prefix(Section::Staged);
        let unstaged = theme.section_prefix(Section::Unstaged);
        assert_ne!(staged.fg, unstaged.fg);
    }

    #[test]
    fn test_selection_style() {
        let theme = Theme::indexed();
        let style = theme.selection();
        assert_eq!(style.bg, Some(Color::Indexed(60)));
        assert_eq!(style.fg, Some(Color::Indexed(255)));
    }
}
