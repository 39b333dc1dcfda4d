use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::calendar::store::{format_date_key, parse_date_key};
use crate::progress::{parse_denominator, parse_numerator};
use chrono::Local;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use tracing::{debug, warn};

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            let mut actions = Vec::new();
            // The first interaction arms the animation, exactly once.
            if !state.animation.armed && is_interaction(&cevent) {
                state.animation.armed = true;
                actions.push(Action::StartAnimator);
            }
            actions.extend(handle_terminal(state, cevent));
            actions
        }
        AppEvent::SpinTick => {
            state.animation.spin_tick();
            state.dirty = true;
            vec![]
        }
        AppEvent::PulseTick => {
            state.animation.pulse_tick();
            state.dirty = true;
            vec![]
        }
        AppEvent::Tick => {
            let now = Local::now().date_naive();
            if now != state.today {
                state.today = now;
                state.dirty = true;
            }
            vec![]
        }
    }
}

fn is_interaction(event: &CEvent) -> bool {
    match event {
        CEvent::Key(_) => true,
        CEvent::Mouse(m) => matches!(m.kind, MouseEventKind::Down(_)),
        _ => false,
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    // Modals capture all input while open
    if state.confirm_delete.is_some() {
        return handle_confirm_key(state, key);
    }
    if state.event_form.visible {
        return handle_event_form_key(state, key);
    }
    if state.date_jump.visible {
        return handle_date_jump_key(state, key);
    }
    if state.progress_edit.active.is_some() {
        return handle_progress_edit_key(state, key);
    }

    match key.code {
        KeyCode::Char('q') => return vec![Action::Quit],
        KeyCode::Tab => {
            state.cycle_focus();
            return vec![];
        }
        KeyCode::BackTab => {
            // Three panels, so two forward steps is one back
            state.cycle_focus();
            state.cycle_focus();
            return vec![];
        }
        KeyCode::F(9) => {
            return if state.animation.running {
                vec![Action::StopAnimator]
            } else {
                state.animation.armed = true;
                vec![Action::StartAnimator]
            };
        }
        _ => {}
    }

    match state.focus {
        FocusPanel::Calendar => handle_calendar_key(state, key),
        FocusPanel::Events => handle_events_key(state, key),
        FocusPanel::Progress => handle_progress_key(state, key),
    }
}

fn handle_calendar_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            state.calendar.move_selection(-1);
            state.event_cursor = 0;
            state.clear_status();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.calendar.move_selection(1);
            state.event_cursor = 0;
            state.clear_status();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.calendar.move_selection(-7);
            state.event_cursor = 0;
            state.clear_status();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.calendar.move_selection(7);
            state.event_cursor = 0;
            state.clear_status();
        }
        // Month navigation leaves the selection alone
        KeyCode::PageUp | KeyCode::Char('p') | KeyCode::Char('[') => {
            state.calendar.prev_month();
        }
        KeyCode::PageDown | KeyCode::Char('n') | KeyCode::Char(']') => {
            state.calendar.next_month();
        }
        KeyCode::Char('t') => {
            state.calendar.jump_to(state.today);
            state.event_cursor = 0;
        }
        KeyCode::Char('g') => {
            state.date_jump.visible = true;
            state
                .date_jump
                .input
                .set_text(&format_date_key(state.calendar.selected));
        }
        KeyCode::Char('a') => {
            state.event_form.open_add(state.config.default_event_color());
        }
        KeyCode::Enter => {
            state.focus = FocusPanel::Events;
        }
        _ => {}
    }
    vec![]
}

fn handle_events_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.event_cursor = state.event_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.event_cursor += 1;
            state.clamp_event_cursor();
        }
        KeyCode::Char('a') => {
            state.event_form.open_add(state.config.default_event_color());
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = state.selected_event_id() {
                let event = state
                    .calendar
                    .store
                    .get(state.calendar.selected, id)
                    .cloned();
                if let Some(event) = event {
                    state.event_form.open_edit(&event);
                }
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = state.selected_event_id() {
                state.confirm_delete = Some(PendingDelete {
                    date: state.calendar.selected,
                    id,
                });
            }
        }
        _ => {}
    }
    vec![]
}

fn handle_progress_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.progress_cursor = state.progress_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.progress_cursor += 1;
            state.clamp_progress_cursor();
        }
        KeyCode::Char('a') => {
            let label = format!("Progress Item {}", state.progress.len() + 1);
            let id = state.progress.add(label, 0, 1);
            if let Some(pos) = state.progress.position_of(id) {
                state.progress_cursor = pos;
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = state.selected_instance_id() {
                if let Err(e) = state.progress.remove(id) {
                    warn!(%e, "remove progress instance");
                }
                state.clamp_progress_cursor();
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if let Some(id) = state.selected_instance_id() {
                if let Some(inst) = state.progress.get_mut(id) {
                    let n = inst.numerator as i64 + 1;
                    let d = inst.denominator as i64;
                    inst.set(n, d);
                }
            }
        }
        KeyCode::Char('-') => {
            if let Some(id) = state.selected_instance_id() {
                if let Some(inst) = state.progress.get_mut(id) {
                    let n = inst.numerator as i64 - 1;
                    let d = inst.denominator as i64;
                    inst.set(n, d);
                }
            }
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = state.selected_instance_id() {
                if let Some(inst) = state.progress.get(id) {
                    let (n, d) = (inst.numerator, inst.denominator);
                    state.progress_edit.open(id, n, d);
                }
            }
        }
        _ => {}
    }
    vec![]
}

fn handle_confirm_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Some(pending) = state.confirm_delete else {
        return vec![];
    };
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            state.confirm_delete = None;
            match state.calendar.store.remove(pending.date, pending.id) {
                Ok(()) => {
                    debug!(date = %pending.date, id = pending.id, "event deleted");
                    state.set_status("Event deleted".to_string());
                }
                // The event can only vanish if the store changed under a
                // stale prompt; report rather than panic.
                Err(e) => {
                    warn!(%e, "delete failed");
                    state.set_status(format!("Delete failed: {}", e));
                }
            }
            state.clamp_event_cursor();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.confirm_delete = None;
        }
        _ => {}
    }
    vec![]
}

fn handle_event_form_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Esc => {
            state.event_form.close();
        }
        KeyCode::Tab | KeyCode::Down => {
            state.event_form.field = state.event_form.field.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.event_form.field = state.event_form.field.prev();
        }
        KeyCode::Enter => {
            save_event_form(state);
        }
        KeyCode::Left => match state.event_form.field {
            FormField::Color => state.event_form.prev_color(),
            _ => {
                if let Some(input) = state.event_form.focused_input_mut() {
                    input.move_left();
                }
            }
        },
        KeyCode::Right => match state.event_form.field {
            FormField::Color => state.event_form.next_color(),
            _ => {
                if let Some(input) = state.event_form.focused_input_mut() {
                    input.move_right();
                }
            }
        },
        KeyCode::Home => {
            if let Some(input) = state.event_form.focused_input_mut() {
                input.move_home();
            }
        }
        KeyCode::End => {
            if let Some(input) = state.event_form.focused_input_mut() {
                input.move_end();
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = state.event_form.focused_input_mut() {
                input.delete_back();
            }
        }
        KeyCode::Delete => {
            if let Some(input) = state.event_form.focused_input_mut() {
                input.delete_forward();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = state.event_form.focused_input_mut() {
                input.insert_char(c);
            }
        }
        _ => {}
    }
    vec![]
}

fn save_event_form(state: &mut AppState) {
    let date = state.calendar.selected;
    let draft = state.event_form.draft();
    match state.event_form.editing {
        Some(id) => match state.calendar.store.update(date, id, draft) {
            Ok(()) => {
                debug!(date = %date, id, "event updated");
                state.set_status("Event updated".to_string());
            }
            Err(e) => {
                warn!(%e, "update failed");
                state.set_status(format!("Update failed: {}", e));
            }
        },
        None => {
            let id = state.calendar.store.add(date, draft);
            debug!(date = %date, id, "event added");
            state.set_status("Event saved".to_string());
        }
    }
    state.event_form.close();
    state.clamp_event_cursor();
}

fn handle_date_jump_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Esc => {
            state.date_jump.visible = false;
        }
        KeyCode::Enter => {
            let text = state.date_jump.input.text.clone();
            match parse_date_key(&text) {
                Ok(date) => {
                    state.calendar.jump_to(date);
                    state.event_cursor = 0;
                    state.date_jump.visible = false;
                    state.clear_status();
                }
                Err(_) => {
                    state.set_status(format!(
                        "Invalid date {:?} (expected YYYY-MM-DD)",
                        text.trim()
                    ));
                }
            }
        }
        KeyCode::Left => state.date_jump.input.move_left(),
        KeyCode::Right => state.date_jump.input.move_right(),
        KeyCode::Home => state.date_jump.input.move_home(),
        KeyCode::End => state.date_jump.input.move_end(),
        KeyCode::Backspace => state.date_jump.input.delete_back(),
        KeyCode::Delete => state.date_jump.input.delete_forward(),
        KeyCode::Char(c) => state.date_jump.input.insert_char(c),
        _ => {}
    }
    vec![]
}

fn handle_progress_edit_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.progress_edit.close();
            return vec![];
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.progress_edit.toggle_field();
            return vec![];
        }
        KeyCode::Left => {
            state.progress_edit.focused_input_mut().move_left();
            return vec![];
        }
        KeyCode::Right => {
            state.progress_edit.focused_input_mut().move_right();
            return vec![];
        }
        KeyCode::Backspace => {
            state.progress_edit.focused_input_mut().delete_back();
        }
        KeyCode::Delete => {
            state.progress_edit.focused_input_mut().delete_forward();
        }
        KeyCode::Char(c) => {
            state.progress_edit.focused_input_mut().insert_char(c);
        }
        _ => return vec![],
    }

    // Re-apply both fields after every edit, with the usual coercion
    if let Some(id) = state.progress_edit.active {
        let n = parse_numerator(&state.progress_edit.numerator.text) as i64;
        let d = parse_denominator(&state.progress_edit.denominator.text) as i64;
        if state.progress.set_progress(id, n, d).is_err() {
            // Instance removed while the editor was open
            state.progress_edit.close();
            state.set_status("Progress item no longer exists".to_string());
        }
    }
    vec![]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use chrono::NaiveDate;

    fn state() -> AppState {
        AppState::new(AppConfig::default())
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn press(st: &mut AppState, code: KeyCode) -> Vec<Action> {
        handle_event(st, key(code))
    }

    fn type_text(st: &mut AppState, text: &str) {
        for c in text.chars() {
            press(st, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_first_input_arms_animator_once() {
        let mut st = state();
        let actions = press(&mut st, KeyCode::Down);
        assert!(actions.contains(&Action::StartAnimator));
        let actions = press(&mut st, KeyCode::Down);
        assert!(!actions.contains(&Action::StartAnimator));
    }

    #[test]
    fn test_quit_keys() {
        let mut st = state();
        assert!(press(&mut st, KeyCode::Char('q')).contains(&Action::Quit));
        let mut st = state();
        let ctrl_c = AppEvent::Terminal(CEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(handle_event(&mut st, ctrl_c).contains(&Action::Quit));
    }

    #[test]
    fn test_month_navigation_keeps_selection() {
        let mut st = state();
        st.calendar.jump_to(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        press(&mut st, KeyCode::Char(']'));
        assert_eq!(st.calendar.cursor, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(st.calendar.selected, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        press(&mut st, KeyCode::Char('['));
        press(&mut st, KeyCode::Char('['));
        assert_eq!(st.calendar.cursor, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(st.calendar.selected, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_add_event_through_form() {
        let mut st = state();
        let day = st.calendar.selected;
        press(&mut st, KeyCode::Char('a'));
        assert!(st.event_form.visible);
        type_text(&mut st, "standup");
        press(&mut st, KeyCode::Enter);
        assert!(!st.event_form.visible);
        let events = st.calendar.store.events_on(day);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "standup");
        assert_eq!(events[0].color, st.config.default_event_color());
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut st = state();
        let day = st.calendar.selected;
        press(&mut st, KeyCode::Char('a'));
        type_text(&mut st, "old");
        press(&mut st, KeyCode::Enter);
        let id = st.calendar.store.events_on(day)[0].id;

        st.focus = FocusPanel::Events;
        press(&mut st, KeyCode::Char('e'));
        assert_eq!(st.event_form.editing, Some(id));
        // clear the prefilled title and retype
        for _ in 0.."old".len() {
            press(&mut st, KeyCode::Backspace);
        }
        type_text(&mut st, "new");
        press(&mut st, KeyCode::Enter);

        let events = st.calendar.store.events_on(day);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, id);
        assert_eq!(events[0].title, "new");
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut st = state();
        let day = st.calendar.selected;
        press(&mut st, KeyCode::Char('a'));
        press(&mut st, KeyCode::Enter);
        assert!(st.calendar.store.has_events(day));

        st.focus = FocusPanel::Events;
        press(&mut st, KeyCode::Char('d'));
        assert!(st.confirm_delete.is_some());
        // declining keeps the event
        press(&mut st, KeyCode::Char('n'));
        assert!(st.calendar.store.has_events(day));

        press(&mut st, KeyCode::Char('d'));
        press(&mut st, KeyCode::Char('y'));
        // last event gone, day entry dropped
        assert!(!st.calendar.store.has_events(day));
    }

    #[test]
    fn test_date_jump_parses_and_rejects() {
        let mut st = state();
        st.focus = FocusPanel::Calendar;
        press(&mut st, KeyCode::Char('g'));
        assert!(st.date_jump.visible);
        st.date_jump.input.clear();
        type_text(&mut st, "2031-07-04");
        press(&mut st, KeyCode::Enter);
        assert!(!st.date_jump.visible);
        assert_eq!(st.calendar.selected, NaiveDate::from_ymd_opt(2031, 7, 4).unwrap());
        assert_eq!(st.calendar.cursor, NaiveDate::from_ymd_opt(2031, 7, 1).unwrap());

        press(&mut st, KeyCode::Char('g'));
        st.date_jump.input.clear();
        type_text(&mut st, "garbage");
        press(&mut st, KeyCode::Enter);
        assert!(st.date_jump.visible);
        assert!(st.status_message.as_deref().unwrap_or("").contains("Invalid date"));
    }

    #[test]
    fn test_progress_inline_edit_applies_live() {
        let mut st = state();
        st.focus = FocusPanel::Progress;
        press(&mut st, KeyCode::Char('e'));
        let id = st.progress_edit.active.unwrap();

        st.progress_edit.numerator.clear();
        st.progress_edit.denominator.clear();
        type_text(&mut st, "7");
        press(&mut st, KeyCode::Tab);
        type_text(&mut st, "10");
        let inst = st.progress.get(id).unwrap();
        assert_eq!((inst.numerator, inst.denominator), (7, 10));
        assert_eq!(inst.percent(), 70.0);

        // denominator of 0 coerces to 1
        press(&mut st, KeyCode::Backspace);
        press(&mut st, KeyCode::Backspace);
        type_text(&mut st, "0");
        assert_eq!(st.progress.get(id).unwrap().denominator, 1);

        press(&mut st, KeyCode::Enter);
        assert!(st.progress_edit.active.is_none());
    }

    #[test]
    fn test_progress_add_and_remove() {
        let mut st = state();
        st.focus = FocusPanel::Progress;
        press(&mut st, KeyCode::Char('a'));
        assert_eq!(st.progress.len(), 2);
        assert_eq!(st.progress_cursor, 1);
        press(&mut st, KeyCode::Char('d'));
        assert_eq!(st.progress.len(), 1);
        assert_eq!(st.progress_cursor, 0);
    }

    #[test]
    fn test_animator_toggle_key() {
        let mut st = state();
        st.animation.armed = true; // skip the first-input arming
        st.animation.running = false;
        assert!(press(&mut st, KeyCode::F(9)).contains(&Action::StartAnimator));
        st.animation.running = true;
        assert!(press(&mut st, KeyCode::F(9)).contains(&Action::StopAnimator));
    }
}
