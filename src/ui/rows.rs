//! Radio-style list of the visible rows.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::StatefulWidget,
};

use crate::core::visible::{RowKind, VisibleItem};

use super::theme::Theme;

// ───────────────────────────────────────── state ─────────────

/// Highlighted row and scroll offset.  Presentation only; the controller
/// never sees it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RowListState {
    /// Index into the visible rows that is currently highlighted.
    pub selected: usize,
    /// First visible row.
    pub offset: usize,
}

impl RowListState {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.selected < max - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Ensure the selected row is visible within the viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected - height + 1;
        }
    }
}

// ───────────────────────────────────────── widget ────────────

pub struct RowList<'a> {
    rows: &'a [VisibleItem<'a>],
    searching: bool,
}

impl<'a> RowList<'a> {
    pub fn new(rows: &'a [VisibleItem<'a>], searching: bool) -> Self {
        Self { rows, searching }
    }
}

impl StatefulWidget for RowList<'_> {
    type State = RowListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        if self.rows.is_empty() {
            let text = if self.searching { "No matches." } else { "Nothing here." };
            buf.set_line(
                area.x,
                area.y,
                &Line::from(Span::styled(format!("  {text}"), Theme::empty_style())),
                area.width,
            );
            return;
        }

        state.selected = state.selected.min(self.rows.len() - 1);
        state.clamp_scroll(area.height as usize);

        let visible = self
            .rows
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(area.height as usize);

        for (i, (row_idx, row)) in visible.enumerate() {
            let y = area.y + i as u16;
            let is_selected = row_idx == state.selected;
            let marker = if is_selected { "◉ " } else { "○ " };

            let style = if is_selected {
                Theme::selected_style()
            } else if row.is_synthetic() {
                Theme::synthetic_style()
            } else {
                match RowKind::of(&row.node, self.searching) {
                    RowKind::Leaf => Theme::leaf_style(),
                    RowKind::Node => Theme::node_style(),
                }
            };

            let mut spans = vec![Span::styled(format!("{marker}{}", row.node.label()), style)];
            if !row.node.is_leaf() {
                spans.push(Span::styled(" ›", style));
            }
            if row.is_synthetic() {
                spans.push(Span::styled("  (new)", Theme::empty_style()));
            }

            buf.set_line(area.x, y, &Line::from(spans), area.width);
        }
    }
}
