//! Detect overlapping and duplicated events in a schedule.
//!
//! Adjacent events (where one ends exactly when another starts) are NOT
//! conflicts, whatever boundary policy busy queries use.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::Event;

/// A detected conflict between two events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    pub event_a: Event,
    pub event_b: Event,
    pub overlap_minutes: i64,
}

fn conflict_between(a: &Event, b: &Event) -> Option<Conflict> {
    // a.start < b.end && b.start < a.end excludes the adjacent case.
    if a.start() < b.end() && b.start() < a.end() {
        let overlap_start = a.start().max(b.start());
        let overlap_end = a.end().min(b.end());
        Some(Conflict {
            event_a: a.clone(),
            event_b: b.clone(),
            overlap_minutes: (overlap_end - overlap_start).num_minutes(),
        })
    } else {
        None
    }
}

/// Find every overlapping pair within one schedule.
///
/// Each pair is reported once, with `event_a` earlier in the slice.
pub fn find_conflicts(events: &[Event]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for (i, a) in events.iter().enumerate() {
        for b in &events[i + 1..] {
            if let Some(conflict) = conflict_between(a, b) {
                conflicts.push(conflict);
            }
        }
    }
    conflicts
}

/// Find all pairwise conflicts between two event lists.
pub fn find_conflicts_between(events_a: &[Event], events_b: &[Event]) -> Vec<Conflict> {
    events_a
        .iter()
        .flat_map(|a| events_b.iter().filter_map(move |b| conflict_between(a, b)))
        .collect()
}

/// Drop events repeating an earlier event's title, start and end.
///
/// Keeps the first occurrence and preserves order. Returns the kept events
/// and how many were removed.
pub fn dedupe_events(events: Vec<Event>) -> (Vec<Event>, usize) {
    let mut seen: HashSet<(String, DateTime<Utc>, DateTime<Utc>)> = HashSet::new();
    let before = events.len();
    let kept: Vec<Event> = events
        .into_iter()
        .filter(|e| seen.insert((e.title().to_string(), e.start(), e.end())))
        .collect();
    let removed = before - kept.len();
    if removed > 0 {
        log::info!("event=dedupe removed={removed} kept={}", kept.len());
    }
    (kept, removed)
}
