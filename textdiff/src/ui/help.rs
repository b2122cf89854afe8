//! Help overlay renderer for textdiff.
//!
//! Drawn inside the same `terminal.draw()` closure as the panels: `Clear`
//! erases the area first, which gives the modal effect without a second draw.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal on top of the panels.
///
/// Skipped on terminals narrower than 40 columns to avoid a zero-height `Rect`.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help: j/k scroll, ? or Esc to dismiss ")
        .border_style(Style::default().fg(theme.focus_border));

    frame.render_widget(
        Paragraph::new(build_help_text(theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text(theme: &Theme) -> Text<'static> {
    let section = |title: &'static str| {
        Line::styled(title, Style::default().fg(theme.heading).add_modifier(Modifier::BOLD))
    };
    Text::from(vec![
        section("Navigation"),
        Line::from("  j / k         Move cursor / scroll down, up"),
        Line::from("  g / G         Jump to top / bottom"),
        Line::from("  Ctrl-d / u    Half page down / up"),
        Line::from("  H / L, Tab    Move panel focus left / right"),
        Line::from(""),
        section("Groups"),
        Line::from("  Enter         Make the group under the cursor active"),
        Line::from("  n             New group"),
        Line::from("  d             Delete group (the last one is kept)"),
        Line::from("  r             Rename group"),
        Line::from(""),
        section("Text Sets"),
        Line::from("  Space         Select / deselect for comparison"),
        Line::from("  A / N         Select all / none"),
        Line::from("  a             Add a text set (Tab switches field, Enter saves)"),
        Line::from("  r             Rename"),
        Line::from("  d             Delete"),
        Line::from("  J / K         Move down / up"),
        Line::from("  b             Move to the top, making it the base"),
        Line::from("  C             Clear the whole group (asks first)"),
        Line::from(""),
        section("Diff"),
        Line::from("  p             Toggle ignore punctuation and case"),
        Line::from("  v             Toggle diffing on / off"),
        Line::from("  The first selected text set is the base."),
        Line::from(""),
        section("General"),
        Line::from("  ?             Open / close this help"),
        Line::from("  q             Quit (the workspace is saved automatically)"),
    ])
}
