//! Modal dialogs: the Insert-mode form and the clear confirmation.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::app::{Form, FormField};
use crate::theme::Theme;

pub fn render_form(frame: &mut Frame, form: &Form, theme: &Theme) {
    let height = if form.has_content() { Constraint::Percentage(60) } else { Constraint::Length(5) };
    let area = frame.area().centered(Constraint::Percentage(70), height);
    frame.render_widget(Clear, area);

    let outer = Block::bordered()
        .title(form.title())
        .title_bottom(" Enter save · Tab field · Esc cancel ")
        .border_style(Style::default().fg(theme.focus_border));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if form.has_content() {
        let [name_area, content_area] =
            inner.layout(&Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]));
        render_field(frame, name_area, "Name", &form.name, form.field == FormField::Name, theme);
        render_field(frame, content_area, "Content", &form.content, form.field == FormField::Content, theme);
    } else {
        render_field(frame, inner, "Name", &form.name, true, theme);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool, theme: &Theme) {
    let border = if active { theme.focus_border } else { theme.idle_border };
    let block = Block::bordered()
        .title(label.to_owned())
        .border_style(Style::default().fg(border));
    let mut text = value.to_owned();
    if active {
        text.push('▏');
    }
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

pub fn render_confirm_clear(frame: &mut Frame, group_name: &str, theme: &Theme) {
    let area = frame.area().centered(Constraint::Length(48), Constraint::Length(5));
    frame.render_widget(Clear, area);
    let block = Block::bordered()
        .title(" Clear group ")
        .border_style(Style::default().fg(theme.delete));
    let lines = vec![
        Line::raw(format!("Remove every text set from {group_name}?")),
        Line::styled("y confirm · n cancel", Style::default().add_modifier(Modifier::BOLD)),
    ];
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}
