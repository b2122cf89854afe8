//! UI rendering module for textdiff.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; each
//! panel has its own module.

mod layout;
pub mod diff_view;
pub mod group_list;
pub mod help;
pub mod input;
pub mod keybindings;
pub mod text_set_list;

use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, render_status_bar};

/// Renders one complete frame: panels, status bar, then any overlay on top.
///
/// Called exactly once per `AppEvent::Render`. Panel rects and the diff
/// viewport height are written back into `state` for the next key or mouse
/// event; the one-frame lag is not noticeable.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    state.sync_lists();
    let [groups, text_sets, diff, status_bar] = compute_layout(frame.area(), state.focus);
    state.panel_rects = [groups, text_sets, diff];

    if groups.width > 0 {
        group_list::render_group_list(frame, groups, state, theme);
    }
    if text_sets.width > 0 {
        text_set_list::render_text_set_list(frame, text_sets, state, theme);
    }
    if diff.width > 0 {
        diff_view::render_diff(frame, diff, state, theme);
    }

    render_status_bar(frame, status_bar, state, theme);

    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::Insert => {
            if let Some(form) = &state.form {
                input::render_form(frame, form, theme);
            }
        }
        Mode::ConfirmClear => input::render_confirm_clear(frame, state.store.active().name(), theme),
        Mode::Normal => {}
    }
}
