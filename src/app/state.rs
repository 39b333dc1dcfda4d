use crate::animator::AnimationState;
use crate::calendar::store::{DayEvent, EventColor, EventDraft, EventId};
use crate::calendar::CalendarState;
use crate::config::AppConfig;
use crate::progress::{InstanceId, ProgressRegistry};
use chrono::{Local, NaiveDate};
use unicode_width::UnicodeWidthStr;

#[derive(Debug)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    /// Terminal column of the cursor. The cursor itself is a byte offset, so
    /// multibyte and wide characters need the display width of the prefix.
    pub fn display_column(&self) -> u16 {
        self.text[..self.cursor].width() as u16
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Calendar,
    Events,
    Progress,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    StartTime,
    EndTime,
    Description,
    Color,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::StartTime,
            FormField::StartTime => FormField::EndTime,
            FormField::EndTime => FormField::Description,
            FormField::Description => FormField::Color,
            FormField::Color => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Color,
            FormField::StartTime => FormField::Title,
            FormField::EndTime => FormField::StartTime,
            FormField::Description => FormField::EndTime,
            FormField::Color => FormField::Description,
        }
    }
}

/// The add/edit event form. A single slot: at most one event can be under
/// edit, and closing the form always clears it.
#[derive(Debug, Default)]
pub struct EventFormState {
    pub visible: bool,
    /// `Some` while editing an existing event, `None` while adding.
    pub editing: Option<EventId>,
    pub field: FormField,
    pub title: InputState,
    pub start_time: InputState,
    pub end_time: InputState,
    pub description: InputState,
    pub color_index: usize,
}

impl Default for FormField {
    fn default() -> Self {
        FormField::Title
    }
}

impl EventFormState {
    /// Open with empty fields and the configured default color.
    pub fn open_add(&mut self, default_color: EventColor) {
        self.visible = true;
        self.editing = None;
        self.field = FormField::Title;
        self.title.clear();
        self.start_time.clear();
        self.end_time.clear();
        self.description.clear();
        self.color_index = EventColor::ALL
            .iter()
            .position(|c| *c == default_color)
            .unwrap_or(0);
    }

    /// Open pre-filled from an existing event.
    pub fn open_edit(&mut self, event: &DayEvent) {
        self.visible = true;
        self.editing = Some(event.id);
        self.field = FormField::Title;
        self.title.set_text(&event.title);
        self.start_time.set_text(&event.start_time);
        self.end_time.set_text(&event.end_time);
        self.description.set_text(&event.description);
        self.color_index = EventColor::ALL
            .iter()
            .position(|c| *c == event.color)
            .unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.editing = None;
    }

    pub fn color(&self) -> EventColor {
        EventColor::ALL[self.color_index % EventColor::ALL.len()]
    }

    pub fn prev_color(&mut self) {
        self.color_index = (self.color_index + EventColor::ALL.len() - 1) % EventColor::ALL.len();
    }

    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % EventColor::ALL.len();
    }

    /// The text input under the form cursor, if the cursor is on one.
    pub fn focused_input_mut(&mut self) -> Option<&mut InputState> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::StartTime => Some(&mut self.start_time),
            FormField::EndTime => Some(&mut self.end_time),
            FormField::Description => Some(&mut self.description),
            FormField::Color => None,
        }
    }

    /// Snapshot the fields into a draft. No validation: empty titles and
    /// reversed time ranges save as typed.
    pub fn draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.text.clone(),
            start_time: self.start_time.text.clone(),
            end_time: self.end_time.text.clone(),
            description: self.description.text.clone(),
            color: self.color(),
        }
    }
}

/// A delete waiting on its confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingDelete {
    pub date: NaiveDate,
    pub id: EventId,
}

#[derive(Debug, Default)]
pub struct DateJumpState {
    pub visible: bool,
    pub input: InputState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressField {
    Numerator,
    Denominator,
}

/// Inline numeric editing of one progress instance. Both fields re-apply on
/// every keystroke.
#[derive(Debug)]
pub struct ProgressEditState {
    pub active: Option<InstanceId>,
    pub field: ProgressField,
    pub numerator: InputState,
    pub denominator: InputState,
}

impl Default for ProgressEditState {
    fn default() -> Self {
        Self {
            active: None,
            field: ProgressField::Numerator,
            numerator: InputState::new(),
            denominator: InputState::new(),
        }
    }
}

impl ProgressEditState {
    pub fn open(&mut self, id: InstanceId, numerator: u32, denominator: u32) {
        self.active = Some(id);
        self.field = ProgressField::Numerator;
        self.numerator.set_text(&numerator.to_string());
        self.denominator.set_text(&denominator.to_string());
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            ProgressField::Numerator => ProgressField::Denominator,
            ProgressField::Denominator => ProgressField::Numerator,
        };
    }

    pub fn focused_input_mut(&mut self) -> &mut InputState {
        match self.field {
            ProgressField::Numerator => &mut self.numerator,
            ProgressField::Denominator => &mut self.denominator,
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub calendar: CalendarState,
    pub progress: ProgressRegistry,
    pub animation: AnimationState,
    /// Cached calendar date of "now", refreshed on the background tick so the
    /// today marker survives midnight.
    pub today: NaiveDate,
    pub focus: FocusPanel,
    /// Display position of the selection in the event panel.
    pub event_cursor: usize,
    /// Display position of the selection in the progress panel.
    pub progress_cursor: usize,
    pub event_form: EventFormState,
    pub confirm_delete: Option<PendingDelete>,
    pub date_jump: DateJumpState,
    pub progress_edit: ProgressEditState,
    pub should_quit: bool,
    pub dirty: bool,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let mut progress = ProgressRegistry::new();
        for item in &config.progress.items {
            progress.add(item.label.clone(), item.numerator, item.denominator);
        }
        Self {
            config,
            calendar: CalendarState::new(),
            progress,
            animation: AnimationState::new(),
            today: Local::now().date_naive(),
            focus: FocusPanel::Calendar,
            event_cursor: 0,
            progress_cursor: 0,
            event_form: EventFormState::default(),
            confirm_delete: None,
            date_jump: DateJumpState::default(),
            progress_edit: ProgressEditState::default(),
            should_quit: false,
            dirty: true,
            status_message: None,
        }
    }

    /// True while a modal (form, confirm, jump, inline edit) owns the keys.
    pub fn modal_open(&self) -> bool {
        self.event_form.visible
            || self.confirm_delete.is_some()
            || self.date_jump.visible
            || self.progress_edit.active.is_some()
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Calendar => FocusPanel::Events,
            FocusPanel::Events => FocusPanel::Progress,
            FocusPanel::Progress => FocusPanel::Calendar,
        };
        self.dirty = true;
    }

    pub fn set_status(&mut self, text: String) {
        self.status_message = Some(text);
        self.dirty = true;
    }

    pub fn clear_status(&mut self) {
        if self.status_message.take().is_some() {
            self.dirty = true;
        }
    }

    /// Events on the selected day.
    pub fn selected_day_events(&self) -> &[DayEvent] {
        self.calendar.store.events_on(self.calendar.selected)
    }

    /// Keep the event cursor on a valid row after list changes.
    pub fn clamp_event_cursor(&mut self) {
        let len = self.selected_day_events().len();
        if len == 0 {
            self.event_cursor = 0;
        } else if self.event_cursor >= len {
            self.event_cursor = len - 1;
        }
    }

    pub fn selected_event_id(&self) -> Option<EventId> {
        self.selected_day_events().get(self.event_cursor).map(|e| e.id)
    }

    pub fn clamp_progress_cursor(&mut self) {
        let len = self.progress.len();
        if len == 0 {
            self.progress_cursor = 0;
        } else if self.progress_cursor >= len {
            self.progress_cursor = len - 1;
        }
    }

    pub fn selected_instance_id(&self) -> Option<InstanceId> {
        self.progress.id_at(self.progress_cursor)
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.clone();
        }
        let today = self.selected_day_events().len();
        let total = self.calendar.store.total_events();
        let anim = if self.animation.running { "on" } else { "off" };
        format!(
            "{} | {} of {} event{} | {} tracker{} | animation {}",
            self.calendar.selected.format("%Y-%m-%d"),
            today,
            total,
            if total == 1 { "" } else { "s" },
            self.progress.len(),
            if self.progress.len() == 1 { "" } else { "s" },
            anim
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::store::EventDraft;

    fn state() -> AppState {
        AppState::new(AppConfig::default())
    }

    #[test]
    fn test_initial_progress_from_config() {
        let st = state();
        assert_eq!(st.progress.len(), 1);
        assert_eq!(st.progress.iter().next().unwrap().label, "Progress Item 1");
    }

    #[test]
    fn test_event_cursor_clamps_after_delete() {
        let mut st = state();
        let day = st.calendar.selected;
        st.calendar.store.add(day, EventDraft::default());
        let id = st.calendar.store.add(day, EventDraft::default());
        st.event_cursor = 1;
        st.calendar.store.remove(day, id).unwrap();
        st.clamp_event_cursor();
        assert_eq!(st.event_cursor, 0);
        assert!(st.selected_event_id().is_some());
    }

    #[test]
    fn test_form_slot_clears_on_close() {
        let mut st = state();
        let day = st.calendar.selected;
        let id = st.calendar.store.add(day, EventDraft::default());
        let event = st.calendar.store.get(day, id).unwrap().clone();
        st.event_form.open_edit(&event);
        assert_eq!(st.event_form.editing, Some(id));
        st.event_form.close();
        assert_eq!(st.event_form.editing, None);
        assert!(!st.event_form.visible);
    }

    #[test]
    fn test_focus_cycles_all_panels() {
        let mut st = state();
        assert_eq!(st.focus, FocusPanel::Calendar);
        st.cycle_focus();
        assert_eq!(st.focus, FocusPanel::Events);
        st.cycle_focus();
        assert_eq!(st.focus, FocusPanel::Progress);
        st.cycle_focus();
        assert_eq!(st.focus, FocusPanel::Calendar);
    }

    #[test]
    fn test_input_state_editing() {
        let mut input = InputState::new();
        for c in "héllo".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.text, "héllo");
        input.delete_back();
        assert_eq!(input.text, "héll");
        input.move_home();
        input.delete_forward();
        assert_eq!(input.text, "éll");
        input.move_right();
        input.insert_char('x');
        assert_eq!(input.text, "éxll");
    }

    #[test]
    fn test_display_column_tracks_width_not_bytes() {
        let mut input = InputState::new();
        for c in "a月b".chars() {
            input.insert_char(c);
        }
        // 5 bytes of text, but 'a' + wide '月' + 'b' is 4 columns
        assert_eq!(input.cursor, 5);
        assert_eq!(input.display_column(), 4);
        input.move_left(); // before 'b'
        assert_eq!(input.display_column(), 3);
        input.move_left(); // before '月'
        assert_eq!(input.display_column(), 1);
        input.move_home();
        assert_eq!(input.display_column(), 0);
    }
}
