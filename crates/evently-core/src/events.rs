//! Event drafts, categories and listing helpers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate};

use crate::api::{Event, FilePart, MultipartForm};

/// Multipart field name for the cover image.
pub const COVER_IMAGE_FIELD: &str = "coverImage";

/// Event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Business,
    Entertainment,
    Education,
    Social,
    Other,
}

impl EventType {
    /// Returns all categories in display order.
    pub fn all() -> &'static [EventType] {
        &[
            EventType::Business,
            EventType::Entertainment,
            EventType::Education,
            EventType::Social,
            EventType::Other,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Business => "Business",
            EventType::Entertainment => "Entertainment",
            EventType::Education => "Education",
            EventType::Social => "Social",
            EventType::Other => "Other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = EventType::all().iter().map(|t| t.as_str()).collect();
                format!("Unknown event type '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// Staged date/time edits, committed to a draft only on confirm.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingDateTime {
    pub date: String,
    pub time: String,
}

/// In-progress event, owned by one creation session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub address: String,
    /// ISO calendar date (`YYYY-MM-DD`)
    pub date: String,
    /// ISO local time (`HH:MM`)
    pub time: String,
    pub event_type: Option<EventType>,
    pub online_sync: bool,
    pub cover_image: Option<FilePart>,
}

impl EventDraft {
    /// Copies a staged date/time into the draft.
    pub fn commit_date_time(&mut self, pending: &PendingDateTime) {
        self.date.clone_from(&pending.date);
        self.time.clone_from(&pending.time);
    }

    /// Returns the current date/time as a staging buffer.
    pub fn pending_date_time(&self) -> PendingDateTime {
        PendingDateTime {
            date: self.date.clone(),
            time: self.time.clone(),
        }
    }

    /// Builds the multipart submission: every scalar field stringified, plus
    /// the cover image under `coverImage` when one is set.
    pub fn to_form(&self) -> MultipartForm {
        let event_type = self.event_type.map_or("", EventType::as_str);
        let mut form = MultipartForm::new()
            .text("name", &self.name)
            .text("address", &self.address)
            .text("date", &self.date)
            .text("time", &self.time)
            .text("eventType", event_type)
            .text("onlineSync", self.online_sync.to_string());
        if let Some(cover) = &self.cover_image {
            let mut part = cover.clone();
            part.field = COVER_IMAGE_FIELD.to_string();
            form = form.file(part);
        }
        form
    }
}

/// Returns events whose name contains `term`, ignoring case, in input order.
pub fn filter_events<'a>(events: &'a [Event], term: &str) -> Vec<&'a Event> {
    let needle = term.to_lowercase();
    events
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .collect()
}

/// Formats an event date for display in local time.
///
/// Accepts RFC 3339 timestamps and plain calendar dates; anything else is
/// returned as-is.
pub fn display_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%b %-d, %Y %H:%M").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }
    raw.to_string()
}
