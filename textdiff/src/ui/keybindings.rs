//! Keybinding dispatcher for textdiff.
//!
//! Translates raw crossterm events into `AppState` mutations and returns a
//! `KeyAction` telling the event loop whether to continue or quit. The
//! dispatcher branches first on `state.mode` so that HelpOverlay, ConfirmClear,
//! Insert and Normal each have an isolated handler.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, Mode, PanelFocus};

/// Control-flow signal returned from the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::ConfirmClear => handle_confirm_clear(key, state),
        Mode::Normal => handle_normal(key, state),
        Mode::Insert => handle_insert(key, state),
    }
}

/// Routes a bracketed paste into the open form. Ignored outside Insert mode.
pub fn handle_paste(text: &str, state: &mut AppState) {
    if state.mode != Mode::Insert {
        return;
    }
    if let Some(form) = state.form.as_mut() {
        form.paste(text);
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

/// Scroll keys first, then keys of the focused panel, then global keys.
fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }
    let panel = match state.focus {
        PanelFocus::Groups => handle_groups_key(key, state),
        PanelFocus::TextSets => handle_text_sets_key(key, state),
        PanelFocus::Diff => None,
    };
    if let Some(action) = panel {
        return action;
    }

    match key.code {
        KeyCode::Char('H') | KeyCode::BackTab => state.focus = state.focus.prev(),
        KeyCode::Char('L') | KeyCode::Tab => state.focus = state.focus.next(),

        KeyCode::Char('p') => state.toggle_ignore_punctuation(),
        KeyCode::Char('v') => state.toggle_diff(),

        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
        }
        KeyCode::Char('q') => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::Continue
}

fn handle_groups_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    match key.code {
        KeyCode::Enter => state.activate_selected_group(),
        KeyCode::Char('n') => state.add_group(),
        KeyCode::Char('d') => state.remove_selected_group(),
        KeyCode::Char('r') => state.begin_rename_group(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

fn handle_text_sets_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    match key.code {
        KeyCode::Char(' ') => state.toggle_selected_text_set(),
        KeyCode::Char('a') => state.begin_add_text_set(),
        KeyCode::Char('r') => state.begin_rename_text_set(),
        KeyCode::Char('d') => state.remove_selected_text_set(),
        KeyCode::Char('J') => state.move_selected_text_set(1),
        KeyCode::Char('K') => state.move_selected_text_set(-1),
        KeyCode::Char('b') => state.make_selected_base(),
        KeyCode::Char('A') => state.select_all(),
        KeyCode::Char('N') => state.select_none(),
        KeyCode::Char('C') => state.request_clear(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

/// j / k / g / G and Ctrl-d / Ctrl-u on the focused panel.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        KeyCode::Char('j') | KeyCode::Down => state.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_up(1),
        KeyCode::Char('g') | KeyCode::Home => state.scroll_top(),
        KeyCode::Char('G') | KeyCode::End => state.scroll_bottom(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => state.help_scroll = state.help_scroll.saturating_add(1),
        KeyCode::Char('k') => state.help_scroll = state.help_scroll.saturating_sub(1),
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

/// `y` clears the active group; `n` or `Esc` backs out. Other keys are ignored.
fn handle_confirm_clear(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => state.confirm_clear(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Insert mode
// ---------------------------------------------------------------------------

fn handle_insert(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc => state.cancel_form(),
        KeyCode::Enter => state.submit_form(),
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(form) = state.form.as_mut() {
                form.next_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = state.form.as_mut() {
                form.backspace();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(form) = state.form.as_mut() {
                form.push(c);
            }
        }
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Left click focuses the panel under the cursor; the wheel scrolls the
/// focused panel (or the help overlay) by 3 lines.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if state.mode == Mode::Normal => {
            let pos = Position { x: mouse.column, y: mouse.row };
            let [groups, text_sets, diff] = state.panel_rects;
            if groups.width > 0 && groups.contains(pos) {
                state.focus = PanelFocus::Groups;
            } else if text_sets.width > 0 && text_sets.contains(pos) {
                state.focus = PanelFocus::TextSets;
            } else if diff.width > 0 && diff.contains(pos) {
                state.focus = PanelFocus::Diff;
            }
        }
        MouseEventKind::ScrollUp if state.mode == Mode::HelpOverlay => {
            state.help_scroll = state.help_scroll.saturating_sub(3);
        }
        MouseEventKind::ScrollDown if state.mode == Mode::HelpOverlay => {
            state.help_scroll = state.help_scroll.saturating_add(3);
        }
        MouseEventKind::ScrollUp if state.mode == Mode::Normal => state.scroll_up(3),
        MouseEventKind::ScrollDown if state.mode == Mode::Normal => state.scroll_down(3),
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use textdiff_core::{DiffOptions, GroupStore, Source};

    fn press(state: &mut AppState, code: KeyCode) -> KeyAction {
        handle_key(KeyEvent::new(code, KeyModifiers::NONE), state)
    }

    fn state() -> AppState {
        let mut store = GroupStore::new();
        store.active_mut().add_text_set("A", "the cat sat", Source::Manual);
        store.active_mut().add_text_set("B", "the dog sat", Source::Manual);
        AppState::new(store, DiffOptions::default(), 8)
    }

    #[test]
    fn space_toggles_and_marks_dirty() {
        let mut state = state();
        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Char(' '));
        let group = state.store.active();
        let b = group.text_sets().at(1).unwrap().id().clone();
        assert!(group.is_selected(&b));
        assert!(state.dirty);
    }

    #[test]
    fn typing_in_form_does_not_trigger_commands() {
        let mut state = state();
        press(&mut state, KeyCode::Char('a'));
        assert_eq!(state.mode, Mode::Insert);
        for c in "q d".chars() {
            assert_eq!(press(&mut state, KeyCode::Char(c)), KeyAction::Continue);
        }
        press(&mut state, KeyCode::Tab);
        handle_paste("pasted\ntext", &mut state);
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.mode, Mode::Normal);
        let added = state.store.active().text_sets().at(2).unwrap();
        assert_eq!(added.name(), "q d");
        assert_eq!(added.content(), "pasted\ntext");
    }

    #[test]
    fn escape_cancels_form() {
        let mut state = state();
        press(&mut state, KeyCode::Char('r'));
        press(&mut state, KeyCode::Char('x'));
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.store.active().text_sets().at(0).unwrap().name(), "A");
    }

    #[test]
    fn group_keys_only_apply_when_groups_focused() {
        let mut state = state();
        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.store.len(), 1);

        press(&mut state, KeyCode::Char('H'));
        assert_eq!(state.focus, PanelFocus::Groups);
        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.store.len(), 2);
        assert_eq!(state.store.active().name(), "Group 2");
    }

    #[test]
    fn clear_asks_first() {
        let mut state = state();
        press(&mut state, KeyCode::Char('C'));
        assert_eq!(state.mode, Mode::ConfirmClear);
        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.store.active().text_sets().len(), 2);

        press(&mut state, KeyCode::Char('C'));
        press(&mut state, KeyCode::Char('y'));
        assert!(state.store.active().text_sets().is_empty());
    }

    #[test]
    fn ctrl_d_scrolls_instead_of_deleting() {
        let mut state = state();
        handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL), &mut state);
        assert_eq!(state.store.active().text_sets().len(), 2);
    }

    #[test]
    fn q_quits_from_normal_only() {
        let mut state = state();
        press(&mut state, KeyCode::Char('?'));
        assert_eq!(press(&mut state, KeyCode::Char('q')), KeyAction::Continue);
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(press(&mut state, KeyCode::Char('q')), KeyAction::Quit);
    }

    #[test]
    fn diff_toggles_do_not_dirty_the_workspace() {
        let mut state = state();
        press(&mut state, KeyCode::Char('p'));
        press(&mut state, KeyCode::Char('v'));
        assert!(state.options.ignore_punctuation);
        assert!(!state.options.diff_enabled);
        assert!(!state.dirty);
    }
}
