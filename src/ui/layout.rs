use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub calendar: Rect,
    pub events: Rect,
    pub progress: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: header | content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Animated header
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header = main_chunks[0];
    let content = main_chunks[1];
    let status_bar = main_chunks[2];

    // Horizontal: calendar grid | right column
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Min(34),        // Calendar (7 columns need the room)
            Constraint::Percentage(45), // Events + progress
        ])
        .split(content);

    let calendar = h_chunks[0];
    let right = h_chunks[1];

    // Right column: events panel | progress trackers
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55), // Events for the selected day
            Constraint::Min(8),         // Progress gauges
        ])
        .split(right);

    AppLayout {
        header,
        calendar,
        events: right_chunks[0],
        progress: right_chunks[1],
        status_bar,
    }
}
