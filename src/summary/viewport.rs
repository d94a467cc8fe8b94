//! Viewport state: scroll window and selection cursor over the line list

/// Available drawing area, in rows and columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewDimension {
    pub rows: u16,
    pub cols: u16,
}

/// Scroll position and selection cursor
///
/// Mutated only together with a line list replacement or by navigation
/// input; always read and written under the owning view's lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportState {
    /// First visible line index
    pub start_row: usize,
    /// Horizontal scroll offset, in display cells
    pub start_col: usize,
    /// Selected line index
    pub selected: usize,
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the selection visible: shift the window minimally when the
    /// selection lies outside it, then clamp to `[0, max(0, total - rows)]`
    pub fn determine_start_row(&mut self, rows: usize, total: usize) {
        if rows == 0 || total == 0 {
            self.start_row = 0;
            return;
        }

        if self.selected < self.start_row {
            self.start_row = self.selected;
        } else if self.selected >= self.start_row + rows {
            self.start_row = self.selected + 1 - rows;
        }

        self.start_row = self.start_row.min(total.saturating_sub(rows));
    }

    pub fn scroll_left(&mut self, cells: usize) {
        self.start_col = self.start_col.saturating_sub(cells);
    }

    pub fn scroll_right(&mut self, cells: usize) {
        self.start_col = self.start_col.saturating_add(cells);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_selection_above_window() {
        let mut viewport = ViewportState {
            start_row: 10,
            start_col: 0,
            selected: 4,
        };
        viewport.determine_start_row(5, 20);
        assert_eq!(viewport.start_row, 4);
    }

    #[test]
    fn test_selection_below_window() {
        let mut viewport = ViewportState {
            start_row: 0,
            start_col: 0,
            selected: 9,
        };
        viewport.determine_start_row(5, 20);
        assert_eq!(viewport.start_row, 5);
    }

    #[test]
    fn test_selection_inside_window_unchanged() {
        let mut viewport = ViewportState {
            start_row: 3,
            start_col: 0,
            selected: 5,
        };
        viewport.determine_start_row(5, 20);
        assert_eq!(viewport.start_row, 3);
    }

    #[test]
    fn test_clamp_to_list_end() {
        let mut viewport = ViewportState {
            start_row: 18,
            start_col: 0,
            selected: 19,
        };
        viewport.determine_start_row(10, 20);
        assert_eq!(viewport.start_row, 10);
    }

    #[test]
    fn test_short_list_starts_at_zero() {
        let mut viewport = ViewportState {
            start_row: 2,
            start_col: 0,
            selected: 1,
        };
        viewport.determine_start_row(10, 3);
        assert_eq!(viewport.start_row, 0);
    }

    #[test]
    fn test_horizontal_scroll() {
        let mut viewport = ViewportState::new();
        viewport.scroll_left(3);
        assert_eq!(viewport.start_col, 0);
        viewport.scroll_right(5);
        viewport.scroll_left(2);
        assert_eq!(viewport.start_col, 3);
    }

    proptest! {
        /// After adjustment the selection is inside the window and the number
        /// of drawable rows equals min(rows, total - start_row)
        #[test]
        fn prop_selection_visible(
            start_row in 0usize..100,
            selected in 0usize..100,
            rows in 1usize..50,
            extra in 0usize..100,
        ) {
            let total = selected + 1 + extra;
            let mut viewport = ViewportState { start_row, start_col: 0, selected };
            viewport.determine_start_row(rows, total);

            prop_assert!(viewport.selected >= viewport.start_row);
            prop_assert!(viewport.selected < viewport.start_row + rows);
            prop_assert!(viewport.start_row <= total.saturating_sub(rows).max(0));

            let drawn = rows.min(total - viewport.start_row);
            prop_assert!(drawn >= 1);
        }
    }
}
