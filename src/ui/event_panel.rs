//! Events for the selected day, in insertion order.

use crate::app::state::{AppState, FocusPanel};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Events;
    let title = format!(" Events — {} ", state.calendar.selected.format("%A, %B %-d"));
    let block = Block::default()
        .title(title)
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 10 || inner.height < 2 {
        return;
    }

    let events = state.selected_day_events();
    let mut lines: Vec<Line> = Vec::new();

    if events.is_empty() {
        lines.push(Line::from(Span::styled(" no events", Theme::dim())));
    }

    for (pos, event) in events.iter().enumerate() {
        let selected = focused && pos == state.event_cursor;
        let marker_style = Style::default().fg(Theme::event_color(event.color));
        let title_style = if selected {
            Theme::selected_row()
        } else {
            Theme::text().add_modifier(Modifier::BOLD)
        };

        let title = truncate(&event.title, inner.width.saturating_sub(4) as usize);
        lines.push(Line::from(vec![
            Span::styled("▌ ", marker_style),
            Span::styled(title, title_style),
        ]));

        let time = match (event.start_time.is_empty(), event.end_time.is_empty()) {
            (true, true) => String::new(),
            (false, true) => event.start_time.clone(),
            (true, false) => format!("- {}", event.end_time),
            (false, false) => format!("{} - {}", event.start_time, event.end_time),
        };
        if !time.is_empty() || !event.description.is_empty() {
            let mut detail = vec![Span::raw("  ")];
            if !time.is_empty() {
                detail.push(Span::styled(time, Style::default().fg(Theme::ACCENT_AMBER)));
                detail.push(Span::raw("  "));
            }
            if !event.description.is_empty() {
                let width = inner.width.saturating_sub(12) as usize;
                detail.push(Span::styled(
                    truncate(&event.description, width),
                    Theme::help_text(),
                ));
            }
            lines.push(Line::from(detail));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);

    if focused && inner.height > 3 {
        let help_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
        let help = Line::from(vec![
            Span::styled(" a", Theme::help_key()),
            Span::styled(" add  ", Theme::help_text()),
            Span::styled("e", Theme::help_key()),
            Span::styled(" edit  ", Theme::help_text()),
            Span::styled("d", Theme::help_key()),
            Span::styled(" delete", Theme::help_text()),
        ]);
        frame.render_widget(Paragraph::new(help), help_area);
    }
}

/// Trim to a display width, appending an ellipsis when cut.
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + 2 > max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}
