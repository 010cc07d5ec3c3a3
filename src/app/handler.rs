//! Input handling — maps key, mouse, and paste events to widget
//! transitions, then reacts to the events the widget emits.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::select_tree::SelectTreeEvent;
use crate::ui::layout::{hit, PopupLayout, PopupShape};

use super::state::{AppState, Focus};

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let typing = state.input_active();
    if let Some(action) = state.config.match_key(key, typing) {
        run_action(state, action);
        return;
    }

    if typing {
        edit_input(state, key);
        return;
    }

    // Typing into the list jumps to the search box.
    if let KeyCode::Char(c) = key.code {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        if plain && state.tree.props().search_enabled {
            state.focus = Focus::Input;
            append_input(state, &c.to_string());
        }
    }
}

/// Process a mouse event against the layout of the last drawn frame.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => {
            let count = state.tree.visible_items().len();
            state.list_state.select_next(count);
        }
        MouseEventKind::ScrollUp => state.list_state.select_prev(),
        MouseEventKind::Down(MouseButton::Left) => click(state, mouse.column, mouse.row),
        _ => {}
    }
}

/// Bracketed paste appends to the input box.
pub fn handle_paste(state: &mut AppState, text: &str) {
    if !state.tree.props().search_enabled {
        return;
    }
    state.focus = Focus::Input;
    // Line breaks have no meaning in a single-line input.
    let text: String = text.chars().filter(|c| !c.is_control()).collect();
    append_input(state, &text);
}

fn click(state: &mut AppState, column: u16, row: u16) {
    let layout = PopupLayout::compute(state.area, PopupShape::of(&state.tree));

    if hit(layout.close, column, row) {
        let events = state.tree.close();
        apply_events(state, events);
    } else if layout.save.is_some_and(|r| hit(r, column, row)) {
        let events = state.tree.save_label();
        apply_events(state, events);
    } else if layout.input.is_some_and(|r| hit(r, column, row)) {
        state.focus = Focus::Input;
    } else if layout.breadcrumb.is_some_and(|r| hit(r, column, row)) {
        let events = state.tree.select_breadcrumb();
        apply_events(state, events);
    } else if let Some(list) = layout.list.filter(|r| hit(*r, column, row)) {
        let index = state.list_state.offset + usize::from(row - list.y);
        if index < state.tree.visible_items().len() {
            state.focus = Focus::List;
            state.list_state.selected = index;
            activate_row(state, index);
        }
    }
}

fn run_action(state: &mut AppState, action: Action) {
    match action {
        Action::MoveUp => state.list_state.select_prev(),
        Action::MoveDown => {
            let count = state.tree.visible_items().len();
            state.list_state.select_next(count);
        }
        Action::Activate => {
            if state.tree.is_free_text() {
                let events = state.tree.save_label();
                apply_events(state, events);
            } else {
                let index = state.list_state.selected;
                activate_row(state, index);
            }
        }
        Action::Back => {
            let events = state.tree.select_breadcrumb();
            apply_events(state, events);
        }
        Action::ToggleFocus => {
            if state.tree.props().search_enabled {
                state.focus = match state.focus {
                    Focus::Input => Focus::List,
                    Focus::List => Focus::Input,
                };
            }
        }
        Action::Save => {
            let events = state.tree.save_label();
            apply_events(state, events);
        }
        Action::Close => {
            let events = state.tree.close();
            apply_events(state, events);
        }
    }
}

fn activate_row(state: &mut AppState, index: usize) {
    tracing::debug!(key = %state.tree.row_key(index), "row activated");
    let events = state.tree.select_row(index);
    apply_events(state, events);
}

fn edit_input(state: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let current = state.tree.input_text();

    let next = match key.code {
        KeyCode::Char('u') if ctrl => String::new(),
        KeyCode::Char(c) if !ctrl && !alt => format!("{current}{c}"),
        KeyCode::Backspace => {
            let mut text = current.to_string();
            text.pop();
            text
        }
        _ => return,
    };
    set_input(state, next);
}

fn append_input(state: &mut AppState, text: &str) {
    let next = format!("{}{text}", state.tree.input_text());
    set_input(state, next);
}

/// Only real edits reach the widget; an unchanged text is not a transition.
fn set_input(state: &mut AppState, next: String) {
    if next == state.tree.input_text() {
        return;
    }
    let events = state.tree.set_search_term(next);
    apply_events(state, events);
}

/// React to what the widget reported.
pub fn apply_events(state: &mut AppState, events: Vec<SelectTreeEvent>) {
    for event in events {
        match event {
            SelectTreeEvent::Selected(node) => {
                if node.is_leaf() {
                    tracing::info!(value = node.value(), "selected");
                    state.status_message = Some(format!("Selected {}", node.label()));
                    state.selections.push(node);
                    if !state.keep_open {
                        state.should_quit = true;
                    }
                } else {
                    tracing::debug!(value = node.value(), "opened branch");
                    state.status_message = Some(format!("Opened {}", node.label()));
                }
            }
            SelectTreeEvent::Changed => {
                // The row list changed under the highlight.
                state.list_state.reset();
            }
            SelectTreeEvent::ClosePopup => {
                state.should_quit = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::select_tree::{Mode, SelectTree, SelectTreeProps};
    use crate::core::tree::TreeNode;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn items() -> Vec<TreeNode> {
        vec![
            TreeNode::leaf("Liver", "liver"),
            TreeNode::branch(
                "Organs",
                "organs",
                vec![TreeNode::leaf("Heart", "heart"), TreeNode::leaf("Lung", "lung")],
            ),
        ]
    }

    fn app(props: SelectTreeProps) -> AppState {
        let mut state = AppState::new(SelectTree::new(props), AppConfig::default());
        state.area = Rect::new(0, 0, 80, 24);
        state
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn click_at(state: &mut AppState, column: u16, row: u16) {
        handle_mouse(
            state,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn layout(state: &AppState) -> PopupLayout {
        PopupLayout::compute(state.area, PopupShape::of(&state.tree))
    }

    #[test]
    fn focus_starts_on_input_when_auto_focused() {
        assert_eq!(app(SelectTreeProps::new(items())).focus, Focus::Input);
        assert_eq!(app(SelectTreeProps::new(items()).auto_focus(false)).focus, Focus::List);
        assert_eq!(app(SelectTreeProps::new(items()).search_enabled(false)).focus, Focus::List);
    }

    #[test]
    fn typing_filters_and_enter_selects_leaf() {
        let mut state = app(SelectTreeProps::new(items()));
        type_text(&mut state, "hea");
        assert_eq!(state.tree.search_term(), Some("hea"));

        press(&mut state, KeyCode::Enter);
        assert_eq!(state.selections, vec![TreeNode::leaf("Heart", "heart")]);
        assert!(state.should_quit);
        assert_eq!(state.tree.mode(), Mode::Root);
    }

    #[test]
    fn j_and_k_type_while_input_is_focused() {
        let mut state = app(SelectTreeProps::new(items()));
        type_text(&mut state, "jk");
        assert_eq!(state.tree.search_term(), Some("jk"));
        assert_eq!(state.list_state.selected, 0);
    }

    #[test]
    fn backspace_edits_and_ctrl_u_clears() {
        let mut state = app(SelectTreeProps::new(items()));
        type_text(&mut state, "liv");
        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.tree.search_term(), Some("li"));
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(state.tree.search_term(), Some(""));
        assert_eq!(state.tree.mode(), Mode::Root);
    }

    #[test]
    fn backspace_on_empty_input_is_not_a_transition() {
        let mut state = app(SelectTreeProps::new(items()));
        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.tree.search_term(), None);
    }

    #[test]
    fn list_navigation_drills_and_backs_out() {
        let mut state = app(SelectTreeProps::new(items()).auto_focus(false));
        press(&mut state, KeyCode::Char('j'));
        assert_eq!(state.list_state.selected, 1);

        press(&mut state, KeyCode::Enter);
        assert_eq!(state.tree.mode(), Mode::Drilled);
        assert!(!state.should_quit);
        assert_eq!(state.list_state.selected, 0);
        assert_eq!(state.status_message.as_deref(), Some("Opened Organs"));

        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.tree.mode(), Mode::Root);
    }

    #[test]
    fn typing_in_list_focus_moves_to_input() {
        let mut state = app(SelectTreeProps::new(items()).auto_focus(false));
        press(&mut state, KeyCode::Char('x'));
        assert_eq!(state.focus, Focus::Input);
        assert_eq!(state.tree.search_term(), Some("x"));
    }

    #[test]
    fn tab_toggles_focus_only_with_search() {
        let mut state = app(SelectTreeProps::new(items()));
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::List);

        let mut state = app(SelectTreeProps::new(items()).search_enabled(false));
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::List);
    }

    #[test]
    fn escape_and_ctrl_c_quit_without_selection() {
        let mut state = app(SelectTreeProps::new(items()));
        press(&mut state, KeyCode::Esc);
        assert!(state.should_quit);
        assert!(state.selections.is_empty());

        let mut state = app(SelectTreeProps::new(items()));
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut state = app(SelectTreeProps::new(items()));
        handle_key(
            &mut state,
            KeyEvent {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Release,
                state: KeyEventState::NONE,
            },
        );
        assert!(!state.should_quit);
    }

    #[test]
    fn free_text_enter_saves_typed_label() {
        let mut state = app(SelectTreeProps::new(vec![]).label("Cy"));
        type_text(&mut state, "st");
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.selections, vec![TreeNode::leaf("Cyst", "Cyst")]);
    }

    #[test]
    fn keep_open_collects_several_selections() {
        let mut state = app(SelectTreeProps::new(items()).auto_focus(false));
        state.keep_open = true;
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.selections.len(), 2);
        assert!(!state.should_quit);
    }

    #[test]
    fn clicking_rows_breadcrumb_and_close() {
        let mut state = app(SelectTreeProps::new(items()));
        let list = layout(&state).list.unwrap();
        click_at(&mut state, list.x + 2, list.y + 1);
        assert_eq!(state.tree.mode(), Mode::Drilled);
        assert_eq!(state.focus, Focus::List);

        let crumb = layout(&state).breadcrumb.unwrap();
        click_at(&mut state, crumb.x, crumb.y);
        assert_eq!(state.tree.mode(), Mode::Root);

        let close = layout(&state).close;
        click_at(&mut state, close.x + 1, close.y);
        assert!(state.should_quit);
    }

    #[test]
    fn clicking_input_focuses_it() {
        let mut state = app(SelectTreeProps::new(items()).auto_focus(false));
        let input = layout(&state).input.unwrap();
        click_at(&mut state, input.x + 3, input.y);
        assert_eq!(state.focus, Focus::Input);
    }

    #[test]
    fn clicking_disabled_save_does_nothing() {
        let mut state = app(SelectTreeProps::new(vec![]));
        let save = layout(&state).save.unwrap();
        click_at(&mut state, save.x, save.y);
        assert!(state.selections.is_empty());

        type_text(&mut state, "Mass");
        click_at(&mut state, save.x, save.y);
        assert_eq!(state.selections, vec![TreeNode::leaf("Mass", "Mass")]);
    }

    #[test]
    fn clicking_below_last_row_is_ignored() {
        let mut state = app(SelectTreeProps::new(items()));
        state.tree.set_search_term("zzz");
        let list = layout(&state).list.unwrap();
        click_at(&mut state, list.x, list.y);
        assert!(state.selections.is_empty());
        assert!(!state.should_quit);
    }

    #[test]
    fn paste_appends_without_newlines() {
        let mut state = app(SelectTreeProps::new(items()).auto_focus(false));
        handle_paste(&mut state, "he\nart");
        assert_eq!(state.focus, Focus::Input);
        assert_eq!(state.tree.search_term(), Some("heart"));
    }

    #[test]
    fn changed_resets_highlight() {
        let mut state = app(SelectTreeProps::new(items()).auto_focus(false));
        press(&mut state, KeyCode::Down);
        assert_eq!(state.list_state.selected, 1);
        handle_paste(&mut state, "l");
        assert_eq!(state.list_state.selected, 0);
    }
}
