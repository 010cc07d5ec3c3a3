//! The full select-tree popup: bordered box with header, breadcrumb, and
//! the row list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, BorderType, Borders, Clear, StatefulWidget, Widget},
};

use crate::core::select_tree::SelectTree;

use super::breadcrumb::Breadcrumb;
use super::header::Header;
use super::layout::{PopupLayout, PopupShape};
use super::rows::{RowList, RowListState};
use super::theme::Theme;

/// Created fresh each frame.
pub struct SelectTreeWidget<'a> {
    tree: &'a SelectTree,
    input_focused: bool,
}

impl<'a> SelectTreeWidget<'a> {
    pub fn new(tree: &'a SelectTree) -> Self {
        Self {
            tree,
            input_focused: false,
        }
    }

    pub fn input_focused(mut self, focused: bool) -> Self {
        self.input_focused = focused;
        self
    }
}

impl StatefulWidget for SelectTreeWidget<'_> {
    type State = RowListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let layout = PopupLayout::compute(area, PopupShape::of(self.tree));
        Clear.render(layout.popup, buf);

        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style())
            .render(layout.popup, buf);

        Header {
            tree: self.tree,
            layout: &layout,
            input_focused: self.input_focused,
        }
        .render(layout.popup, buf);

        if let (Some(area), Some(node)) = (layout.breadcrumb, self.tree.current_node()) {
            Breadcrumb {
                label: node.label(),
                value: node.value(),
            }
            .render(area, buf);
        }

        if let Some(list) = layout.list {
            let rows = self.tree.visible_items();
            RowList::new(&rows, self.tree.is_searching()).render(list, buf, state);
        }
    }
}
