//! Diff panel renderer for textdiff.
//!
//! Shows the base text, then one block per compared text set: a heading with
//! the segment counts followed by the candidate's tokens, coloured by kind.
//! Deleted tokens are struck through, inserted ones underlined, so the result
//! stays readable on terminals without colour.
//!
//! Alignment goes through the app's `DiffCache`; redrawing an unchanged
//! selection costs one memo lookup per candidate.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use textdiff_core::{Comparison, DiffSegment, SegmentKind, TextSet};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_diff(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Diff;
    let inner = inner_rect(area);
    state.diff_viewport_height = inner.height;

    let AppState { store, cache, options, .. } = &mut *state;
    let group = store.active();
    let lines = match cache.compare(group, *options) {
        Some(cmp) => comparison_lines(&cmp, theme),
        None => vec![Line::styled(
            "Select text sets with Space to compare them.",
            Style::default().fg(theme.muted),
        )],
    };
    let title = format!("Diff ({} selected)", group.selected_count());

    state.diff_line_count = lines.len();
    frame.render_widget(panel_block(title, is_focused, theme), area);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((state.diff_scroll, 0)),
        inner,
    );
}

/// Lines for one comparison. With diffing off every text set is shown as-is.
pub fn comparison_lines(cmp: &Comparison<'_>, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![heading("Base", cmp.base, None, theme)];
    lines.extend(plain_lines(cmp.base.content(), theme));

    for candidate in &cmp.candidates {
        lines.push(Line::raw(""));
        if cmp.options.diff_enabled {
            let s = candidate.summary;
            let counts = format!("  ={} +{} -{}", s.equal, s.inserted, s.deleted);
            lines.push(heading("vs", candidate.text_set, Some(counts), theme));
            lines.push(segment_line(&candidate.segments, theme));
        } else {
            lines.push(heading("Text", candidate.text_set, None, theme));
            lines.extend(plain_lines(candidate.text_set.content(), theme));
        }
    }
    lines
}

fn heading(label: &str, text_set: &TextSet, counts: Option<String>, theme: &Theme) -> Line<'static> {
    let style = Style::default().fg(theme.heading).add_modifier(Modifier::BOLD);
    let mut spans = vec![
        Span::styled(format!("{label}: {}", text_set.name()), style),
        Span::styled(format!(" [{}]", text_set.source().label()), Style::default().fg(theme.muted)),
    ];
    if let Some(counts) = counts {
        spans.push(Span::styled(counts, Style::default().fg(theme.muted)));
    }
    Line::from(spans)
}

fn plain_lines(content: &str, theme: &Theme) -> Vec<Line<'static>> {
    let style = Style::default().fg(theme.equal);
    content.lines().map(|l| Line::styled(l.to_owned(), style)).collect()
}

/// All segments on one line, space separated; the paragraph wraps it.
fn segment_line(segments: &[DiffSegment], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(segments.len() * 2);
    for (n, seg) in segments.iter().enumerate() {
        if n > 0 {
            spans.push(Span::raw(" "));
        }
        let style = match seg.kind {
            SegmentKind::Equal => Style::default().fg(theme.equal),
            SegmentKind::Insert => Style::default()
                .fg(theme.insert)
                .add_modifier(Modifier::UNDERLINED),
            SegmentKind::Delete => Style::default()
                .fg(theme.delete)
                .add_modifier(Modifier::CROSSED_OUT),
        };
        spans.push(Span::styled(seg.token.clone(), style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textdiff_core::{DiffCache, DiffGroup, DiffOptions, Source};

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn candidate_tokens_carry_their_kind() {
        let theme = Theme::dark();
        let mut group = DiffGroup::new("g");
        group.add_text_set("A", "the cat sat", Source::Manual);
        group.add_text_set("B", "the dog sat", Source::Manual);
        group.select_all();
        let mut cache = DiffCache::default();
        let cmp = cache.compare(&group, DiffOptions::default()).unwrap();

        let lines = comparison_lines(&cmp, &theme);
        assert_eq!(text_of(&lines[0]), "Base: A [manual]");
        assert_eq!(text_of(&lines[1]), "the cat sat");
        assert_eq!(text_of(&lines[3]), "vs: B [manual]  =2 +1 -1");
        assert_eq!(text_of(&lines[4]), "the cat dog sat");

        let cat = lines[4].spans.iter().find(|s| s.content == "cat").unwrap();
        assert!(cat.style.add_modifier.contains(Modifier::CROSSED_OUT));
        let dog = lines[4].spans.iter().find(|s| s.content == "dog").unwrap();
        assert_eq!(dog.style.fg, Some(theme.insert));
    }

    #[test]
    fn disabled_diff_shows_raw_content() {
        let theme = Theme::dark();
        let mut group = DiffGroup::new("g");
        group.add_text_set("A", "one", Source::Manual);
        group.add_text_set("B", "two\nlines", Source::Transcribed);
        group.select_all();
        let mut cache = DiffCache::default();
        let off = DiffOptions { diff_enabled: false, ..DiffOptions::default() };
        let cmp = cache.compare(&group, off).unwrap();

        let texts: Vec<String> = comparison_lines(&cmp, &theme).iter().map(text_of).collect();
        assert_eq!(texts, ["Base: A [manual]", "one", "", "Text: B [transcribed]", "two", "lines"]);
    }
}
