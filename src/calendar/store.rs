//! Per-day event storage.
//!
//! Events are grouped under their calendar date. Each event gets a stable
//! generated id at insertion time; edits and deletes address events by id, so
//! references held across a removal never shift onto a different event.
//!
//! Invariant: a date has an entry in the map only while it holds at least one
//! event. Removing the last event for a date removes the entry.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

pub type EventId = u64;

/// Fixed palette for event markers. The original default is green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventColor {
    #[default]
    Green,
    Blue,
    Red,
    Orange,
    Purple,
}

impl EventColor {
    pub const ALL: [EventColor; 5] = [
        EventColor::Green,
        EventColor::Blue,
        EventColor::Red,
        EventColor::Orange,
        EventColor::Purple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EventColor::Green => "green",
            EventColor::Blue => "blue",
            EventColor::Red => "red",
            EventColor::Orange => "orange",
            EventColor::Purple => "purple",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

/// Form-level event fields, before an id is assigned.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub color: EventColor,
}

#[derive(Debug, Clone)]
pub struct DayEvent {
    pub id: EventId,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub color: EventColor,
}

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("no event {id} on {date}")]
    UnknownEvent { date: NaiveDate, id: EventId },
}

/// Events keyed by calendar day, in insertion order per day.
#[derive(Debug, Default)]
pub struct EventStore {
    days: BTreeMap<NaiveDate, Vec<DayEvent>>,
    next_id: EventId,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> EventId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an event to `date`, creating the day entry if needed.
    pub fn add(&mut self, date: NaiveDate, draft: EventDraft) -> EventId {
        let id = self.allocate_id();
        self.days.entry(date).or_default().push(DayEvent {
            id,
            title: draft.title,
            start_time: draft.start_time,
            end_time: draft.end_time,
            description: draft.description,
            color: draft.color,
        });
        id
    }

    /// Overwrite the fields of the event `id` on `date`. Position and id are
    /// unchanged; no other event is touched.
    pub fn update(&mut self, date: NaiveDate, id: EventId, draft: EventDraft) -> Result<(), StoreError> {
        let event = self
            .days
            .get_mut(&date)
            .and_then(|list| list.iter_mut().find(|e| e.id == id))
            .ok_or(StoreError::UnknownEvent { date, id })?;
        event.title = draft.title;
        event.start_time = draft.start_time;
        event.end_time = draft.end_time;
        event.description = draft.description;
        event.color = draft.color;
        Ok(())
    }

    /// Remove the event `id` from `date`, dropping the day entry if it becomes
    /// empty.
    pub fn remove(&mut self, date: NaiveDate, id: EventId) -> Result<(), StoreError> {
        let list = self
            .days
            .get_mut(&date)
            .ok_or(StoreError::UnknownEvent { date, id })?;
        let pos = list
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::UnknownEvent { date, id })?;
        list.remove(pos);
        if list.is_empty() {
            self.days.remove(&date);
        }
        Ok(())
    }

    /// Events on `date` in insertion order. Empty slice when the day has none.
    pub fn events_on(&self, date: NaiveDate) -> &[DayEvent] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, date: NaiveDate, id: EventId) -> Option<&DayEvent> {
        self.days
            .get(&date)
            .and_then(|list| list.iter().find(|e| e.id == id))
    }

    pub fn has_events(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Distinct event colors on `date`, first-seen order. One grid dot per
    /// color.
    pub fn dot_colors(&self, date: NaiveDate) -> Vec<EventColor> {
        let mut colors = Vec::new();
        for event in self.events_on(date) {
            if !colors.contains(&event.color) {
                colors.push(event.color);
            }
        }
        colors
    }

    pub fn total_events(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

/// Date key format used throughout: `YYYY-MM-DD`.
pub fn format_date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` date key. Malformed input is a hard error rather than
/// an invalid date propagating into rendering.
pub fn parse_date_key(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(title: &str, color: EventColor) -> EventDraft {
        EventDraft {
            title: title.into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            description: String::new(),
            color,
        }
    }

    #[test]
    fn test_add_creates_day_entry() {
        let mut store = EventStore::new();
        let day = date(2024, 3, 15);
        assert!(!store.has_events(day));
        store.add(day, draft("standup", EventColor::Green));
        assert!(store.has_events(day));
        assert_eq!(store.events_on(day).len(), 1);
    }

    #[test]
    fn test_delete_last_event_drops_key() {
        let mut store = EventStore::new();
        let day = date(2024, 3, 15);
        let id = store.add(day, draft("standup", EventColor::Green));
        store.remove(day, id).unwrap();
        assert!(!store.has_events(day));
        assert!(store.events_on(day).is_empty());
    }

    #[test]
    fn test_delete_keeps_other_events() {
        let mut store = EventStore::new();
        let day = date(2024, 3, 15);
        let a = store.add(day, draft("a", EventColor::Green));
        let b = store.add(day, draft("b", EventColor::Blue));
        let c = store.add(day, draft("c", EventColor::Red));
        store.remove(day, b).unwrap();
        let titles: Vec<_> = store.events_on(day).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["a", "c"]);
        // remaining ids are still addressable
        assert!(store.get(day, a).is_some());
        assert!(store.get(day, c).is_some());
        // the removed id is stale
        assert_eq!(
            store.remove(day, b),
            Err(StoreError::UnknownEvent { date: day, id: b })
        );
    }

    #[test]
    fn test_update_replaces_only_target() {
        let mut store = EventStore::new();
        let day = date(2024, 3, 15);
        let a = store.add(day, draft("a", EventColor::Green));
        let b = store.add(day, draft("b", EventColor::Blue));
        store.update(day, a, draft("a2", EventColor::Purple)).unwrap();
        assert_eq!(store.events_on(day).len(), 2);
        assert_eq!(store.get(day, a).unwrap().title, "a2");
        assert_eq!(store.get(day, a).unwrap().color, EventColor::Purple);
        assert_eq!(store.get(day, b).unwrap().title, "b");
    }

    #[test]
    fn test_update_unknown_id_errors() {
        let mut store = EventStore::new();
        let day = date(2024, 3, 15);
        let err = store.update(day, 42, draft("x", EventColor::Green));
        assert_eq!(err, Err(StoreError::UnknownEvent { date: day, id: 42 }));
    }

    #[test]
    fn test_dot_colors_deduplicated() {
        let mut store = EventStore::new();
        let day = date(2024, 3, 15);
        store.add(day, draft("a", EventColor::Green));
        store.add(day, draft("b", EventColor::Blue));
        store.add(day, draft("c", EventColor::Green));
        assert_eq!(store.dot_colors(day), [EventColor::Green, EventColor::Blue]);
    }

    #[test]
    fn test_date_key_roundtrip() {
        let day = date(2024, 3, 5);
        let key = format_date_key(day);
        assert_eq!(key, "2024-03-05");
        assert_eq!(parse_date_key(&key).unwrap(), day);
        assert_eq!(parse_date_key(" 2024-03-05 ").unwrap(), day);
        assert!(parse_date_key("not-a-date").is_err());
        assert!(parse_date_key("2024-13-05").is_err());
    }

    #[test]
    fn test_default_color_is_green() {
        assert_eq!(EventColor::default(), EventColor::Green);
        assert_eq!(EventColor::from_name("green"), Some(EventColor::Green));
        assert_eq!(EventColor::from_name("teal"), None);
    }
}
