//! Add/edit event form, rendered as a centered popup over the dashboard.

use crate::app::state::{AppState, FormField};
use crate::calendar::store::EventColor;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn render(frame: &mut Frame, state: &AppState) {
    if !state.event_form.visible {
        return;
    }

    let area = frame.area();
    if area.width < 24 || area.height < 8 {
        return;
    }
    let popup_w = 52.min(area.width.saturating_sub(4));
    let popup_h = 14.min(area.height.saturating_sub(2));
    let popup_x = (area.width.saturating_sub(popup_w)) / 2;
    let popup_y = (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let form = &state.event_form;
    let title = if form.editing.is_some() {
        format!(" Edit Event — {} ", state.calendar.selected.format("%Y-%m-%d"))
    } else {
        format!(" Add Event — {} ", state.calendar.selected.format("%Y-%m-%d"))
    };
    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(Theme::ACCENT_TEAL));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    if inner.height < 8 || inner.width < 20 {
        return;
    }

    let rows: [(&str, FormField, &str); 4] = [
        ("Title", FormField::Title, form.title.text.as_str()),
        ("Start", FormField::StartTime, form.start_time.text.as_str()),
        ("End", FormField::EndTime, form.end_time.text.as_str()),
        ("Description", FormField::Description, form.description.text.as_str()),
    ];

    let mut lines: Vec<Line> = Vec::new();
    for (label, field, value) in rows {
        let active = form.field == field;
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<12}", label),
                if active { Theme::title() } else { Theme::help_text() },
            ),
            Span::styled(if active { "❯ " } else { "  " }, Style::default().fg(Theme::ACCENT_TEAL)),
            Span::styled(value.to_string(), Theme::text()),
        ]));
        lines.push(Line::default());
    }

    // Color selector row
    let color_active = form.field == FormField::Color;
    let mut color_spans: Vec<Span> = vec![
        Span::styled(
            format!(" {:<12}", "Color"),
            if color_active { Theme::title() } else { Theme::help_text() },
        ),
        Span::styled(if color_active { "❯ " } else { "  " }, Style::default().fg(Theme::ACCENT_TEAL)),
    ];
    for (i, color) in EventColor::ALL.iter().enumerate() {
        let chosen = i == form.color_index % EventColor::ALL.len();
        let style = Style::default().fg(Theme::event_color(*color));
        color_spans.push(Span::styled(if chosen { "◉" } else { "○" }, style));
        color_spans.push(Span::raw(" "));
    }
    color_spans.push(Span::styled(
        form.color().name().to_string(),
        Theme::help_text(),
    ));
    lines.push(Line::from(color_spans));

    frame.render_widget(Paragraph::new(lines), inner);

    // Cursor into the focused text field
    let field_row = match form.field {
        FormField::Title => Some((0u16, &form.title)),
        FormField::StartTime => Some((2, &form.start_time)),
        FormField::EndTime => Some((4, &form.end_time)),
        FormField::Description => Some((6, &form.description)),
        FormField::Color => None,
    };
    if let Some((row, input)) = field_row {
        // label (13) + chevron (2)
        let cursor_x = inner.x + 15 + input.display_column();
        let cursor_y = inner.y + row;
        if cursor_y < inner.bottom() {
            frame.set_cursor_position((cursor_x.min(inner.right() - 1), cursor_y));
        }
    }

    // Keybinding help
    let help_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
    let help = Line::from(vec![
        Span::styled(" Tab", Theme::help_key()),
        Span::styled(" next field  ", Theme::help_text()),
        Span::styled("←→", Theme::help_key()),
        Span::styled(" color  ", Theme::help_text()),
        Span::styled("Enter", Theme::help_key()),
        Span::styled(
            if form.editing.is_some() { " update  " } else { " save  " },
            Theme::help_text(),
        ),
        Span::styled("Esc", Theme::help_key()),
        Span::styled(" cancel", Theme::help_text()),
    ]);
    frame.render_widget(Paragraph::new(help), help_area);
}
