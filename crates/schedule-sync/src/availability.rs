//! Busy/free classification over an owner's events.
//!
//! Every overlap test in the crate goes through [`overlaps`], so there is a
//! single place where the boundary policy is applied. The instant query is
//! the window query with a degenerate window, which keeps the two consistent
//! by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::window::Window;

/// Whether interval end points count as busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryPolicy {
    /// Events occupy `[start, end]`. An instant equal to either bound is busy,
    /// and a zero-duration event is busy at its single instant.
    #[default]
    Inclusive,
    /// Events occupy `[start, end)`. An instant equal to `end` is free, and a
    /// zero-duration event is never busy.
    HalfOpen,
}

/// Outcome of a busy query, carrying the first matching event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability<'a> {
    Busy(&'a Event),
    Free,
}

impl<'a> Availability<'a> {
    pub fn is_busy(&self) -> bool {
        matches!(self, Availability::Busy(_))
    }

    pub fn matching_event(&self) -> Option<&'a Event> {
        match self {
            Availability::Busy(event) => Some(event),
            Availability::Free => None,
        }
    }

    /// `"busy"` or `"free"`.
    pub fn label(&self) -> &'static str {
        if self.is_busy() {
            "busy"
        } else {
            "free"
        }
    }
}

/// Does `event` intersect `window` under `policy`?
///
/// - `Inclusive`: `event.start <= window.end && event.end >= window.start`.
/// - `HalfOpen`: the event is `[start, end)`; a non-empty window is
///   `[ws, we)` and matches when `start < we && end > ws`; a degenerate
///   window at `t` matches when `start <= t < end`. A zero-duration event
///   occupies nothing and never matches.
pub fn overlaps(event: &Event, window: &Window, policy: BoundaryPolicy) -> bool {
    match policy {
        BoundaryPolicy::Inclusive => {
            event.start() <= window.end() && event.end() >= window.start()
        }
        BoundaryPolicy::HalfOpen if window.is_instant() => {
            event.start() <= window.start() && window.start() < event.end()
        }
        BoundaryPolicy::HalfOpen => {
            event.start() < event.end()
                && event.start() < window.end()
                && event.end() > window.start()
        }
    }
}

/// Is the owner of `events` busy at any point of `window`?
///
/// Returns the first event, in sequence order, that overlaps the window.
pub fn is_busy_during_window<'a>(
    events: &'a [Event],
    window: &Window,
    policy: BoundaryPolicy,
) -> Availability<'a> {
    events
        .iter()
        .find(|event| overlaps(event, window, policy))
        .map_or(Availability::Free, Availability::Busy)
}

/// Is the owner of `events` busy at `instant`?
///
/// Equivalent to [`is_busy_during_window`] with `Window::instant(instant)`.
/// An empty slice is always free.
pub fn is_busy_at(
    events: &[Event],
    instant: DateTime<Utc>,
    policy: BoundaryPolicy,
) -> Availability<'_> {
    is_busy_during_window(events, &Window::instant(instant), policy)
}

/// Every event overlapping `window`, in sequence order.
pub fn events_during<'a>(
    events: &'a [Event],
    window: &Window,
    policy: BoundaryPolicy,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| overlaps(event, window, policy))
        .collect()
}
