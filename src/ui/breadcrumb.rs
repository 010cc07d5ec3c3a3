//! One-line "back to the first level" control shown while drilled in.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

pub struct Breadcrumb<'a> {
    pub label: &'a str,
    pub value: &'a str,
}

impl Widget for Breadcrumb<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let line = Line::from(vec![
            Span::styled(format!("‹ {}", self.label), Theme::breadcrumb_style()),
            Span::styled(format!("  {}", self.value), Theme::empty_style()),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
