mod calendar_panel;
mod confirm;
mod date_jump;
mod event_form;
mod event_panel;
mod header;
mod layout;
mod progress_panel;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    header::render(frame, app_layout.header, state);
    calendar_panel::render(frame, app_layout.calendar, state);
    event_panel::render(frame, app_layout.events, state);
    progress_panel::render(frame, app_layout.progress, state);
    status_bar::render(frame, app_layout.status_bar, state);

    // Modals draw last, over the panels
    event_form::render(frame, state);
    date_jump::render(frame, state);
    confirm::render(frame, state);
}
