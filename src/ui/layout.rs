//! Layout helpers — split the terminal area into regions.
//!
//! Rendering and mouse hit-testing both go through [`PopupLayout`], so the
//! rectangles a click is tested against are exactly the ones drawn.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::select_tree::SelectTree;

pub const POPUP_WIDTH: u16 = 48;
pub const MAX_LIST_ROWS: usize = 12;
const SAVE_LABEL_WIDTH: u16 = 8;

/// Primary screen layout with the popup region and a bottom status bar.
pub struct AppLayout {
    pub popup_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // popup region (takes all remaining space)
                Constraint::Length(1), // status / hint bar
            ])
            .split(area);

        Self {
            popup_area: chunks[0],
            status_area: chunks[1],
        }
    }
}

/// What the popup has to make room for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupShape {
    pub search_enabled: bool,
    pub free_text: bool,
    pub drilled: bool,
    pub row_count: usize,
}

impl PopupShape {
    pub fn of(tree: &SelectTree) -> Self {
        Self {
            search_enabled: tree.props().search_enabled,
            free_text: tree.is_free_text(),
            drilled: tree.current_node().is_some(),
            row_count: tree.visible_items().len(),
        }
    }
}

/// Every region of the popup.  Optional parts are `None` when hidden or
/// when the area is too small to fit them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupLayout {
    pub popup: Rect,
    pub title: Rect,
    pub close: Rect,
    pub input: Option<Rect>,
    pub save: Option<Rect>,
    pub separator: Option<Rect>,
    pub breadcrumb: Option<Rect>,
    pub list: Option<Rect>,
}

impl PopupLayout {
    pub fn compute(area: Rect, shape: PopupShape) -> Self {
        let header_rows = 2 + u16::from(shape.search_enabled) + u16::from(shape.free_text);
        let breadcrumb_rows = u16::from(shape.drilled && !shape.free_text);
        let list_rows = if shape.free_text {
            0
        } else {
            shape.row_count.clamp(1, MAX_LIST_ROWS) as u16
        };
        let height = 2 + header_rows + breadcrumb_rows + list_rows;

        let popup = centered_fixed(POPUP_WIDTH, height, area);
        let inner = Rect::new(
            popup.x.saturating_add(1),
            popup.y.saturating_add(1),
            popup.width.saturating_sub(2),
            popup.height.saturating_sub(2),
        );

        let mut rows = RowCursor::new(inner);
        let title = rows.next().unwrap_or_default();
        let close = Rect::new(title.right().saturating_sub(2), title.y, title.width.min(2), title.height);
        let input = if shape.search_enabled { rows.next() } else { None };
        let save = if shape.free_text {
            rows.next().map(|row| {
                let width = SAVE_LABEL_WIDTH.min(row.width);
                Rect::new(row.right() - width, row.y, width, 1)
            })
        } else {
            None
        };
        let separator = rows.next();
        let breadcrumb = if breadcrumb_rows > 0 { rows.next() } else { None };
        let list = if list_rows > 0 { rows.rest() } else { None };

        Self {
            popup,
            title,
            close,
            input,
            save,
            separator,
            breadcrumb,
            list,
        }
    }
}

/// Hands out one-line rows top to bottom.
struct RowCursor {
    area: Rect,
    y: u16,
}

impl RowCursor {
    fn new(area: Rect) -> Self {
        Self { area, y: area.y }
    }

    fn next(&mut self) -> Option<Rect> {
        if self.y >= self.area.bottom() || self.area.width == 0 {
            return None;
        }
        let row = Rect::new(self.area.x, self.y, self.area.width, 1);
        self.y += 1;
        Some(row)
    }

    fn rest(&mut self) -> Option<Rect> {
        let height = self.area.bottom().saturating_sub(self.y);
        if height == 0 || self.area.width == 0 {
            return None;
        }
        let rest = Rect::new(self.area.x, self.y, self.area.width, height);
        self.y = self.area.bottom();
        Some(rest)
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Whether the cell at (`column`, `row`) falls inside `rect`.
pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(row_count: usize) -> PopupShape {
        PopupShape {
            search_enabled: true,
            free_text: false,
            drilled: false,
            row_count,
        }
    }

    #[test]
    fn popup_is_centered_with_fixed_width() {
        let layout = PopupLayout::compute(Rect::new(0, 0, 100, 40), shape(3));
        // border + title + input + separator + 3 rows + border
        assert_eq!(layout.popup, Rect::new(26, 16, 48, 8));
        assert_eq!(layout.title, Rect::new(27, 17, 46, 1));
        assert_eq!(layout.close, Rect::new(71, 17, 2, 1));
        assert_eq!(layout.input, Some(Rect::new(27, 18, 46, 1)));
        assert_eq!(layout.separator, Some(Rect::new(27, 19, 46, 1)));
        assert_eq!(layout.list, Some(Rect::new(27, 20, 46, 3)));
        assert_eq!(layout.save, None);
        assert_eq!(layout.breadcrumb, None);
    }

    #[test]
    fn list_height_is_clamped() {
        let area = Rect::new(0, 0, 100, 60);
        assert_eq!(PopupLayout::compute(area, shape(0)).list.map(|r| r.height), Some(1));
        assert_eq!(
            PopupLayout::compute(area, shape(500)).list.map(|r| r.height),
            Some(MAX_LIST_ROWS as u16)
        );
    }

    #[test]
    fn free_text_has_save_and_no_list() {
        let layout = PopupLayout::compute(
            Rect::new(0, 0, 80, 24),
            PopupShape {
                search_enabled: true,
                free_text: true,
                drilled: false,
                row_count: 0,
            },
        );
        let save = layout.save.unwrap();
        assert_eq!(save.width, 8);
        assert_eq!(save.right(), layout.title.right());
        assert!(layout.list.is_none());
        assert!(layout.breadcrumb.is_none());
    }

    #[test]
    fn drilled_adds_breadcrumb_row() {
        let mut s = shape(2);
        s.drilled = true;
        let layout = PopupLayout::compute(Rect::new(0, 0, 80, 24), s);
        let crumb = layout.breadcrumb.unwrap();
        assert_eq!(layout.list.unwrap().y, crumb.y + 1);
    }

    #[test]
    fn tiny_area_drops_trailing_regions() {
        let layout = PopupLayout::compute(Rect::new(0, 0, 20, 4), shape(5));
        assert_eq!(layout.popup.width, 20);
        assert!(layout.input.is_some());
        assert!(layout.list.is_none());
    }

    #[test]
    fn hit_testing_is_half_open() {
        let r = Rect::new(2, 2, 3, 1);
        assert!(hit(r, 2, 2));
        assert!(hit(r, 4, 2));
        assert!(!hit(r, 5, 2));
        assert!(!hit(r, 2, 3));
    }
}
