//! Groups panel: every group with its counts, the active one marked.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};
use textdiff_core::DiffGroup;

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

pub fn render_group_list(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Groups;
    let title = format!("Groups ({})", state.store.len());
    let active = state.store.active_id().clone();

    let items: Vec<ListItem> = state
        .store
        .groups()
        .iter()
        .map(|g| group_item(g, g.id() == &active, theme))
        .collect();

    let list = List::new(items)
        .block(panel_block(title, is_focused, theme))
        .highlight_style(Style::default().fg(theme.focus_border).add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(list, area, &mut state.group_list_state);
}

/// `▶ Interviews  3 sets · 2 sel`
fn group_item(group: &DiffGroup, is_active: bool, theme: &Theme) -> ListItem<'static> {
    let marker = if is_active {
        Span::styled("▶ ", Style::default().fg(theme.marker))
    } else {
        Span::raw("  ")
    };
    let name = if is_active {
        Span::styled(group.name().to_owned(), Style::default().add_modifier(Modifier::BOLD))
    } else {
        Span::raw(group.name().to_owned())
    };
    let mut counts = format!("  {} sets", group.text_sets().len());
    if group.selected_count() > 0 {
        counts.push_str(&format!(" · {} sel", group.selected_count()));
    }
    ListItem::new(Line::from(vec![
        marker,
        name,
        Span::styled(counts, Style::default().fg(theme.muted)),
    ]))
}
