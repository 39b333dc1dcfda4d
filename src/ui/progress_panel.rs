//! Progress trackers: one labeled gauge per registry instance, in creation
//! order, plus an inline numerator/denominator editor.

use crate::app::state::{AppState, FocusPanel, ProgressField};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Progress;
    let block = Block::default()
        .title(" Progress ")
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
    if inner.width < 12 || inner.height < 2 {
        return;
    }

    if state.progress.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " no trackers — press a to add one",
            Theme::dim(),
        )));
        frame.render_widget(empty, inner);
        return;
    }

    // Two rows per instance: label line, gauge line
    let mut y = inner.y;
    for (pos, inst) in state.progress.iter().enumerate() {
        if y + 1 >= inner.bottom() {
            break;
        }
        let selected = focused && pos == state.progress_cursor;
        let editing = state.progress_edit.active == Some(inst.id);

        let label_area = Rect::new(inner.x, y, inner.width, 1);
        let mut spans = vec![Span::styled(
            format!(" {}", inst.label),
            if selected {
                Theme::title()
            } else {
                Theme::help_text()
            },
        )];
        if editing {
            spans.extend(editor_spans(state));
        } else {
            spans.push(Span::styled(
                format!("  {} / {}", inst.numerator, inst.denominator),
                Theme::text(),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), label_area);

        let gauge_area = Rect::new(inner.x + 1, y + 1, inner.width.saturating_sub(2), 1);
        let percent = inst.percent();
        let gauge = Gauge::default()
            .ratio(percent / 100.0)
            .label(format!("{:.0}%", percent))
            .gauge_style(Style::default().fg(if selected {
                Theme::ACCENT_TEAL
            } else {
                Theme::ACCENT_GREEN
            }));
        frame.render_widget(gauge, gauge_area);

        y += 2;
    }

    if focused && y < inner.bottom() {
        let help_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
        let help = Line::from(vec![
            Span::styled(" a", Theme::help_key()),
            Span::styled(" add  ", Theme::help_text()),
            Span::styled("d", Theme::help_key()),
            Span::styled(" remove  ", Theme::help_text()),
            Span::styled("e", Theme::help_key()),
            Span::styled(" edit  ", Theme::help_text()),
            Span::styled("+/-", Theme::help_key()),
            Span::styled(" step", Theme::help_text()),
        ]);
        frame.render_widget(Paragraph::new(help), help_area);
    }
}

fn editor_spans(state: &AppState) -> Vec<Span<'static>> {
    let edit = &state.progress_edit;
    let num_active = edit.field == ProgressField::Numerator;
    vec![
        Span::styled("  ".to_string(), Style::default()),
        Span::styled(
            format!("[{}]", edit.numerator.text),
            if num_active {
                Theme::selected_row()
            } else {
                Theme::text()
            },
        ),
        Span::styled(" / ".to_string(), Theme::help_text()),
        Span::styled(
            format!("[{}]", edit.denominator.text),
            if num_active {
                Theme::text()
            } else {
                Theme::selected_row()
            },
        ),
        Span::styled("  Tab switch · Enter done".to_string(), Theme::dim()),
    ]
}
