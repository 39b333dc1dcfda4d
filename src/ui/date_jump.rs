//! "Go to date" popup: one `YYYY-MM-DD` input.

use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn render(frame: &mut Frame, state: &AppState) {
    if !state.date_jump.visible {
        return;
    }

    let area = frame.area();
    if area.width < 20 || area.height < 5 {
        return;
    }
    let popup_w = 34.min(area.width.saturating_sub(4));
    let popup_h = 5;
    let popup_x = (area.width.saturating_sub(popup_w)) / 2;
    let popup_y = (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Go to date ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(Theme::ACCENT_TEAL));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    if inner.height < 2 {
        return;
    }

    let input = &state.date_jump.input;
    let line = Line::from(vec![
        Span::styled(" ❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
        Span::styled(input.text.as_str(), Theme::text()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
    frame.set_cursor_position((
        (inner.x + 3 + input.display_column()).min(inner.right() - 1),
        inner.y,
    ));

    let help_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
    let help = Line::from(vec![
        Span::styled(" YYYY-MM-DD  ", Theme::help_text()),
        Span::styled("Enter", Theme::help_key()),
        Span::styled(" go  ", Theme::help_text()),
        Span::styled("Esc", Theme::help_key()),
        Span::styled(" close", Theme::help_text()),
    ]);
    frame.render_widget(Paragraph::new(help), help_area);
}
