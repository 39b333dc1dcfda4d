//! Animated header: a spinner driven by the fast rotation timer and an
//! emphasis bar driven by the slow pulse timer.

use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 12 || inner.height < 1 {
        return;
    }

    let anim = &state.animation;
    let mut spans: Vec<Span> = Vec::new();

    if anim.running {
        spans.push(Span::styled(
            format!(" {} ", anim.spinner_glyph()),
            Style::default().fg(Theme::ACCENT_TEAL),
        ));
    } else {
        spans.push(Span::styled(" ○ ", Theme::dim()));
    }

    spans.push(Span::styled("daydeck", Theme::title()));
    spans.push(Span::styled(
        format!("  {}", state.calendar.grid().title()),
        Style::default().fg(Theme::ACCENT_TEAL),
    ));

    // Pulse bar fills part of the remaining width
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let remaining = (inner.width as usize).saturating_sub(used + 2);
    if anim.running && remaining > 4 {
        let bar = anim.pulse_width(remaining as u16) as usize;
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "▁".repeat(bar),
            Style::default().fg(Theme::ACCENT_GREEN),
        ));
    } else if !anim.armed && remaining > 30 {
        spans.push(Span::styled(
            "  press any key to wake the header",
            Theme::dim(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
