//! Responsive 3-panel layout engine for textdiff.
//!
//! Pure layout arithmetic, recomputed inside `terminal.draw()` on every render so
//! each frame reflects the current terminal size.
//!
//! # Panel geometry
//!
//! At `>= 100` columns Groups / Text Sets / Diff sit side by side at 20 / 30 / 50.
//! Narrower terminals collapse the side panels: only the focused panel is drawn,
//! at full width.
//!
//! In the wide layout `Spacing::Overlap(1)` combined with
//! `Block::merge_borders(MergeStrategy::Fuzzy)` makes adjacent panel borders
//! share a single column.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode, PanelFocus};
use crate::theme::Theme;

const WIDE_LAYOUT_MIN_WIDTH: u16 = 100;

/// Returns `[groups, text_sets, diff, status_bar]` for the current frame.
///
/// Collapsed panels come back with zero width; callers skip drawing them.
pub fn compute_layout(area: Rect, focus: PanelFocus) -> [Rect; 4] {
    let [main_area, status_bar] =
        area.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let horizontal = if area.width >= WIDE_LAYOUT_MIN_WIDTH {
        Layout::horizontal([
            Constraint::Percentage(20),
            Constraint::Percentage(30),
            Constraint::Percentage(50),
        ])
        .spacing(Spacing::Overlap(1))
    } else {
        let width = |panel: PanelFocus| {
            if focus == panel { Constraint::Fill(1) } else { Constraint::Length(0) }
        };
        Layout::horizontal([
            width(PanelFocus::Groups),
            width(PanelFocus::TextSets),
            width(PanelFocus::Diff),
        ])
    };

    let [groups, text_sets, diff] = main_area.layout(&horizontal);
    [groups, text_sets, diff, status_bar]
}

/// Inner `Rect` of a panel after removing the 1-cell border on each side.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel.
///
/// Focused panels get `BorderType::Thick`. `MergeStrategy::Fuzzy` is required
/// because `Exact` produces wrong junctions when `Thick` meets `Plain`.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.focus_border)
    } else {
        Style::default().fg(theme.idle_border)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar: mode, active group, diff flags, and the
/// current status message if any.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Insert => (" INSERT ", theme.mode_insert),
        Mode::Normal | Mode::ConfirmClear | Mode::HelpOverlay => {
            (" NORMAL ", theme.mode_normal)
        }
    };

    let mut spans = vec![
        Span::styled(mode_text, Style::default().fg(mode_fg).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {} ", state.store.active().name())),
    ];
    if state.options.ignore_punctuation {
        spans.push(Span::raw("│ ignore punctuation "));
    }
    if !state.options.diff_enabled {
        spans.push(Span::raw("│ diff off "));
    }
    if let Some(msg) = state.status() {
        spans.push(Span::styled(format!("│ {msg}"), Style::default().fg(theme.message)));
    } else {
        spans.push(Span::raw("│ ? help  q quit"));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.bar_bg).fg(theme.bar_fg)),
        area,
    );
}
