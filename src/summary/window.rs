//! Render window seam
//!
//! The fallible styled sink the summary view draws into. Every operation can
//! fail, and a failure aborts the remainder of the draw pass at the point it
//! occurred. [`BufferWindow`] adapts a ratatui buffer region to this seam.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Span};
use regex::Regex;
use unicode_width::UnicodeWidthChar;

use crate::error::RenderError;
use crate::summary::viewport::ViewDimension;

/// Fallible drawing surface for one panel
pub trait RenderWindow {
    /// Available drawing area
    fn dimension(&self) -> ViewDimension;

    /// Draw spans on physical `row`, skipping the first `start_col` display
    /// cells (horizontal scroll)
    fn draw_row(
        &mut self,
        row: u16,
        start_col: usize,
        spans: Vec<Span<'static>>,
    ) -> Result<(), RenderError>;

    /// Mark `row` as the highlighted selection; a no-op when `active` is
    /// false
    fn set_selected_row(&mut self, row: u16, active: bool) -> Result<(), RenderError>;

    /// Re-style occurrences of `pattern` over the already-drawn region
    fn highlight(&mut self, pattern: &Regex, style: Style) -> Result<(), RenderError>;
}

/// [`RenderWindow`] over a ratatui buffer region
pub struct BufferWindow<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    selection_style: Style,
}

impl<'a> BufferWindow<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, selection_style: Style) -> Self {
        Self {
            buf,
            area,
            selection_style,
        }
    }
}

impl RenderWindow for BufferWindow<'_> {
    fn dimension(&self) -> ViewDimension {
        ViewDimension {
            rows: self.area.height,
            cols: self.area.width,
        }
    }

    fn draw_row(
        &mut self,
        row: u16,
        start_col: usize,
        spans: Vec<Span<'static>>,
    ) -> Result<(), RenderError> {
        if row >= self.area.height {
            return Err(RenderError::RowOutOfRange {
                row,
                rows: self.area.height,
            });
        }

        let y = self.area.y + row;
        let right = self.area.x + self.area.width;
        let mut x = self.area.x;
        let mut skip = start_col;

        for span in spans {
            for ch in span.content.chars() {
                let width = ch.width().unwrap_or(0);
                if width == 0 {
                    continue;
                }
                if skip > 0 {
                    skip = skip.saturating_sub(width);
                    continue;
                }
                if x >= right {
                    return Ok(());
                }
                self.buf[(x, y)].set_char(ch).set_style(span.style);
                x += width as u16;
            }
        }

        Ok(())
    }

    fn set_selected_row(&mut self, row: u16, active: bool) -> Result<(), RenderError> {
        if row >= self.area.height {
            return Err(RenderError::RowOutOfRange {
                row,
                rows: self.area.height,
            });
        }
        if !active {
            return Ok(());
        }

        let y = self.area.y + row;
        for x in self.area.x..self.area.x + self.area.width {
            self.buf[(x, y)].set_style(self.selection_style);
        }
        Ok(())
    }

    fn highlight(&mut self, pattern: &Regex, style: Style) -> Result<(), RenderError> {
        for row in 0..self.area.height {
            let y = self.area.y + row;

            // Reconstruct the row text, remembering which byte offset each
            // cell starts at
            let mut text = String::new();
            let mut cell_starts: Vec<(usize, u16)> = Vec::new();
            for x in self.area.x..self.area.x + self.area.width {
                let symbol = self.buf[(x, y)].symbol().to_string();
                cell_starts.push((text.len(), x));
                text.push_str(&symbol);
            }

            for found in pattern.find_iter(&text) {
                for &(start, x) in &cell_starts {
                    if start >= found.start() && start < found.end() {
                        self.buf[(x, y)].set_style(style);
                    }
                }
            }
        }
        Ok(())
    }
}
