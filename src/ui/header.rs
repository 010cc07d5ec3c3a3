//! Popup header: title, close control, search/entry input, save button.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::select_tree::SelectTree;

use super::layout::PopupLayout;
use super::theme::Theme;

pub struct Header<'a> {
    pub tree: &'a SelectTree,
    pub layout: &'a PopupLayout,
    pub input_focused: bool,
}

impl Widget for Header<'_> {
    /// Draws into the regions of `layout`; `area` is ignored.
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let title = self.layout.title;
        if title.width == 0 {
            return;
        }
        let title_width = title.width.saturating_sub(self.layout.close.width);
        buf.set_line(
            title.x,
            title.y,
            &Line::from(Span::styled(self.tree.title(), Theme::title_style())),
            title_width,
        );
        buf.set_line(
            self.layout.close.x,
            self.layout.close.y,
            &Line::from(Span::styled(" ✕", Theme::close_style())),
            self.layout.close.width,
        );

        if let Some(input) = self.layout.input {
            self.render_input(input, buf);
        }

        if let Some(save) = self.layout.save {
            let style = Theme::button_style(self.tree.can_save());
            buf.set_line(
                save.x,
                save.y,
                &Line::from(Span::styled("[ Save ]", style)),
                save.width,
            );
        }

        if let Some(sep) = self.layout.separator {
            let rule = "─".repeat(sep.width as usize);
            buf.set_line(
                sep.x,
                sep.y,
                &Line::from(Span::styled(rule, Theme::separator_style())),
                sep.width,
            );
        }
    }
}

impl Header<'_> {
    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::input_style(self.input_focused));

        let mut spans = Vec::new();
        if !self.tree.is_free_text() {
            spans.push(Span::styled("⌕ ", Theme::input_style(self.input_focused)));
        }
        let text = self.tree.input_text();
        if text.is_empty() {
            if self.input_focused {
                spans.push(Span::styled(" ", Theme::cursor_style()));
            }
            spans.push(Span::styled(self.tree.placeholder(), Theme::placeholder_style()));
        } else {
            spans.push(Span::styled(text, Theme::input_style(self.input_focused)));
            if self.input_focused {
                spans.push(Span::styled(" ", Theme::cursor_style()));
            }
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
