//! Compute free time slots from event lists.
//!
//! Sorts events by start time, merges overlapping busy periods, then computes
//! the gaps between merged periods within a given window.
//!
//! Busy periods here are always `[start, end)`, whatever
//! [`BoundaryPolicy`](crate::availability::BoundaryPolicy) the engine runs
//! under. With the default `Inclusive` policy an owner is busy at an event's
//! end instant, yet a free slot may start at that same instant.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::Event;
use crate::window::Window;

/// A free time slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeSlot {
    fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

/// Merge overlapping or adjacent busy periods, clipped to the window.
///
/// Returns a sorted, non-overlapping list of `(start, end)` intervals.
/// Zero-duration events occupy no time and are ignored here.
pub fn merge_busy_periods(
    events: &[Event],
    window: &Window,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let (window_start, window_end) = (window.start(), window.end());

    let mut intervals: Vec<(DateTime<Utc>, DateTime<Utc>)> = events
        .iter()
        .filter(|e| e.start() < e.end() && e.start() < window_end && e.end() > window_start)
        .map(|e| (e.start().max(window_start), e.end().min(window_end)))
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    intervals.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

/// Find free time slots within `window`, given a list of busy events.
///
/// Events may overlap; overlapping busy periods are merged before computing
/// gaps. Returns free slots sorted by start time. A zero-length window has
/// no free slots.
pub fn find_free_slots(events: &[Event], window: &Window) -> Vec<FreeSlot> {
    let merged = merge_busy_periods(events, window);

    let mut free_slots = Vec::new();
    let mut cursor = window.start();

    for (busy_start, busy_end) in &merged {
        if cursor < *busy_start {
            free_slots.push(FreeSlot::between(cursor, *busy_start));
        }
        cursor = cursor.max(*busy_end);
    }

    // Trailing gap after the last busy period.
    if cursor < window.end() {
        free_slots.push(FreeSlot::between(cursor, window.end()));
    }

    free_slots
}

/// Find the first free slot of at least `min_duration_minutes` within the window.
pub fn find_first_free_slot(
    events: &[Event],
    window: &Window,
    min_duration_minutes: i64,
) -> Option<FreeSlot> {
    find_free_slots(events, window)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}
