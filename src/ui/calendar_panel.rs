//! Month grid: leading blanks up to the weekday of the 1st, one cell per day,
//! today/selected highlights, and one colored dot per distinct event color.

use crate::app::state::{AppState, FocusPanel};
use crate::calendar::grid::{self, same_day};
use crate::ui::theme::Theme;
use chrono::NaiveDate;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Calendar;
    let block = Block::default()
        .title(" Calendar ")
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
    if inner.width < 21 || inner.height < 4 {
        return;
    }

    let month = state.calendar.grid();
    let cell_w = ((inner.width / 7) as usize).clamp(3, 8);
    let mut lines: Vec<Line> = Vec::new();

    // Month title, centered over the grid
    let title = month.title();
    let grid_w = cell_w * 7;
    let pad = grid_w.saturating_sub(title.chars().count()) / 2;
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::styled(title, Theme::title()),
    ]));

    // Weekday header
    let header: Vec<Span> = grid::weekday_labels()
        .iter()
        .map(|label| {
            Span::styled(
                format!("{:<width$}", &label[..cell_w.min(3)], width = cell_w),
                Style::default().fg(Theme::ACCENT_TEAL),
            )
        })
        .collect();
    lines.push(Line::from(header));

    // Week rows
    let mut day: u32 = 1;
    for week in 0..month.week_rows() {
        let mut spans: Vec<Span> = Vec::new();
        for weekday in 0..7 {
            let cell = week * 7 + weekday;
            if cell < month.leading_blanks || day > month.days {
                spans.push(Span::raw(" ".repeat(cell_w)));
                continue;
            }
            spans.extend(day_cell(state, month.year, month.month, day, cell_w));
            day += 1;
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);

    if focused && inner.height > month.week_rows() as u16 + 3 {
        let help_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
        let help = Line::from(vec![
            Span::styled(" ←↑↓→", Theme::help_key()),
            Span::styled(" day  ", Theme::help_text()),
            Span::styled("[/]", Theme::help_key()),
            Span::styled(" month  ", Theme::help_text()),
            Span::styled("g", Theme::help_key()),
            Span::styled(" go to  ", Theme::help_text()),
            Span::styled("t", Theme::help_key()),
            Span::styled(" today  ", Theme::help_text()),
            Span::styled("a", Theme::help_key()),
            Span::styled(" add", Theme::help_text()),
        ]);
        frame.render_widget(Paragraph::new(help), help_area);
    }
}

fn day_cell(state: &AppState, year: i32, month: u32, day: u32, cell_w: usize) -> Vec<Span<'static>> {
    // Day numbers stay in range by construction
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or(state.calendar.selected);
    let is_today = same_day(date, state.today);
    let is_selected = same_day(date, state.calendar.selected);

    let number_style = if is_selected {
        Theme::selected_day()
    } else if is_today {
        Theme::today()
    } else {
        Theme::text()
    };

    let mut spans = vec![Span::styled(format!("{:>2}", day), number_style)];

    // One dot per distinct color, bounded by the cell width
    let dots = state.calendar.store.dot_colors(date);
    let max_dots = cell_w.saturating_sub(3);
    let mut used = 0;
    for color in dots.iter().take(max_dots) {
        let mut style = Style::default().fg(Theme::event_color(*color));
        if is_selected {
            style = style.bg(Theme::ACCENT_TEAL);
        }
        spans.push(Span::styled("•", style));
        used += 1;
    }

    let fill = cell_w - 2 - used;
    if fill > 0 {
        let style = if is_selected {
            // extend the highlight across the first pad column
            Theme::selected_day()
        } else {
            Style::default()
        };
        spans.push(Span::styled(" ", style));
        if fill > 1 {
            spans.push(Span::raw(" ".repeat(fill - 1)));
        }
    }
    spans
}
