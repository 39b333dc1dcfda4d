//! Delete confirmation prompt. Deletion is destructive and has no undo, so it
//! never happens on a single keypress.

use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn render(frame: &mut Frame, state: &AppState) {
    let Some(pending) = state.confirm_delete else {
        return;
    };

    let area = frame.area();
    if area.width < 20 || area.height < 5 {
        return;
    }
    let popup_w = 44.min(area.width.saturating_sub(4));
    let popup_h = 5;
    let popup_x = (area.width.saturating_sub(popup_w)) / 2;
    let popup_y = (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Delete event ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::error());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    if inner.height < 2 {
        return;
    }

    let title = state
        .calendar
        .store
        .get(pending.date, pending.id)
        .map(|e| e.title.clone())
        .unwrap_or_default();
    let question = if title.is_empty() {
        " Delete this event?".to_string()
    } else {
        format!(" Delete \"{}\"?", title)
    };

    let lines = vec![
        Line::from(Span::styled(question, Theme::text())),
        Line::default(),
        Line::from(vec![
            Span::styled(" y", Theme::help_key()),
            Span::styled(" delete  ", Theme::help_text()),
            Span::styled("n", Theme::help_key()),
            Span::styled(" keep", Theme::help_text()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
