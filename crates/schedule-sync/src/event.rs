//! Calendar event records.
//!
//! [`RawEvent`] is what a store hands back: loosely typed, possibly malformed.
//! [`Event`] is the validated form every query runs on. The only ways to get
//! an `Event` are [`Event::new`] and `TryFrom<&RawEvent>`, both of which
//! enforce `start <= end`. Writes ([`NewEvent`], [`EventPatch`]) also require
//! a non-empty title.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, ScheduleError};
use crate::timestamp::{parse_field, parse_timestamp};

/// An event as stored, with timestamps left as strings.
///
/// Deserialization never rejects a row for its field types. A non-string
/// value (epoch millis, `{"$date": ..}`) is kept as its JSON text and fails
/// later, at validation, for that row alone. Missing fields are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default, alias = "_id", deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(Option::unwrap_or_default)
}

/// A validated event with UTC bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    id: String,
    title: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Event {
    /// Build an event, rejecting `start > end`.
    ///
    /// Zero-duration events (`start == end`) are accepted.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self> {
        if start > end {
            return Err(ScheduleError::InvalidRange { start, end });
        }
        Ok(Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Back to the stored representation, with RFC 3339 timestamps.
    pub fn to_raw(&self) -> RawEvent {
        RawEvent {
            id: self.id.clone(),
            title: self.title.clone(),
            start: Some(self.start.to_rfc3339()),
            end: Some(self.end.to_rfc3339()),
        }
    }
}

impl TryFrom<&RawEvent> for Event {
    type Error = ScheduleError;

    fn try_from(raw: &RawEvent) -> Result<Self> {
        let start = parse_field(raw.start.as_deref(), "start")?;
        let end = parse_field(raw.end.as_deref(), "end")?;
        Event::new(raw.id.clone(), raw.title.clone(), start, end)
    }
}

/// Input for creating an event. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub start: String,
    pub end: String,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// Validate into an [`Event`] carrying `id`.
    pub fn into_event(self, id: impl Into<String>) -> Result<Event> {
        require_title(&self.title)?;
        let start = parse_timestamp(&self.start)?;
        let end = parse_timestamp(&self.end)?;
        Event::new(id, self.title, start, end)
    }
}

/// Partial update addressed to an existing event. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.start.is_none() && self.end.is_none()
    }

    /// Apply the patch to a stored row and validate the result.
    ///
    /// The stored row may itself be malformed; the merged row must not be.
    pub fn apply(&self, raw: &RawEvent) -> Result<Event> {
        let merged = RawEvent {
            id: raw.id.clone(),
            title: self.title.clone().unwrap_or_else(|| raw.title.clone()),
            start: self.start.clone().or_else(|| raw.start.clone()),
            end: self.end.clone().or_else(|| raw.end.clone()),
        };
        require_title(&merged.title)?;
        Event::try_from(&merged)
    }
}

fn require_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(ScheduleError::EmptyTitle);
    }
    Ok(())
}

/// An event dropped during normalization, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEvent {
    pub id: String,
    pub reason: String,
}

/// The result of normalizing a stored event list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedEvents {
    pub events: Vec<Event>,
    pub skipped: Vec<SkippedEvent>,
}

/// Validate every stored event, keeping the good ones in order.
///
/// Events that fail validation are skipped and logged, never propagated.
pub fn normalize_events(raw: &[RawEvent]) -> NormalizedEvents {
    let mut out = NormalizedEvents::default();
    for row in raw {
        match Event::try_from(row) {
            Ok(event) => out.events.push(event),
            Err(err) => {
                log::warn!("event=skip_event id={} reason=\"{}\"", row.id, err);
                out.skipped.push(SkippedEvent {
                    id: row.id.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }
    out
}
