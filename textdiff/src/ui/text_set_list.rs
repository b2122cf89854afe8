//! Text Sets panel for the active group.
//!
//! Each row shows the selection box, a base marker on position 0, the name
//! and a source badge, e.g. `[x] ★ Reference  manual`. The row order is the
//! display order; `J`/`K` and `b` change it.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};
use textdiff_core::{Source, TextSet};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

pub fn render_text_set_list(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::TextSets;
    let group = state.store.active();
    let title = format!("Text Sets ({}/{})", group.selected_count(), group.text_sets().len());

    let items: Vec<ListItem> = if group.text_sets().is_empty() {
        vec![ListItem::new(Line::styled("No text sets. Press a to add one.", Style::default().fg(theme.muted)))]
    } else {
        group
            .text_sets()
            .iter()
            .enumerate()
            .map(|(index, t)| text_set_item(t, index == 0, group.is_selected(t.id()), theme))
            .collect()
    };

    let list = List::new(items)
        .block(panel_block(title, is_focused, theme))
        .highlight_style(Style::default().fg(theme.focus_border).add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(list, area, &mut state.text_set_list_state);
}

fn text_set_item(text_set: &TextSet, is_base: bool, is_selected: bool, theme: &Theme) -> ListItem<'static> {
    let check = if is_selected {
        Span::styled("[x] ", Style::default().fg(theme.checked))
    } else {
        Span::styled("[ ] ", Style::default().fg(theme.muted))
    };
    let base = if is_base {
        Span::styled("★ ", Style::default().fg(theme.marker))
    } else {
        Span::raw("  ")
    };
    let badge_fg = match text_set.source() {
        Source::Manual => theme.manual,
        Source::Transcribed => theme.transcribed,
    };
    ListItem::new(Line::from(vec![
        check,
        base,
        Span::raw(text_set.name().to_owned()),
        Span::styled(format!("  {}", text_set.source().label()), Style::default().fg(badge_fg)),
    ]))
}
