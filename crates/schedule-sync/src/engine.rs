//! Owner-level availability queries.
//!
//! [`AvailabilityEngine`] wraps the pure checks in [`crate::availability`]
//! with the configured boundary policy, lenient normalization of stored
//! events, and the missing-owner policy.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::availability::{self, Availability};
use crate::clock::Clock;
use crate::config::{EngineConfig, MissingOwnerPolicy};
use crate::event::{normalize_events, Event, RawEvent};
use crate::store::EventStore;
use crate::window::Window;

/// Availability of one owner, detached from the event slice it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "event", rename_all = "kebab-case")]
pub enum OwnerStatus {
    Busy(Event),
    Free,
    /// The store has no schedule for the owner and the config asks to say so.
    Unknown,
}

impl OwnerStatus {
    /// `"busy"`, `"free"` or `"unknown"`.
    pub fn label(&self) -> &'static str {
        match self {
            OwnerStatus::Busy(_) => "busy",
            OwnerStatus::Free => "free",
            OwnerStatus::Unknown => "unknown",
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, OwnerStatus::Busy(_))
    }

    pub fn event(&self) -> Option<&Event> {
        match self {
            OwnerStatus::Busy(event) => Some(event),
            _ => None,
        }
    }
}

impl From<Availability<'_>> for OwnerStatus {
    fn from(availability: Availability<'_>) -> Self {
        match availability {
            Availability::Busy(event) => OwnerStatus::Busy(event.clone()),
            Availability::Free => OwnerStatus::Free,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityEngine {
    config: EngineConfig,
}

impl AvailabilityEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn busy_at<'a>(&self, events: &'a [Event], instant: DateTime<Utc>) -> Availability<'a> {
        availability::is_busy_at(events, instant, self.config.boundary)
    }

    pub fn busy_during<'a>(&self, events: &'a [Event], window: &Window) -> Availability<'a> {
        availability::is_busy_during_window(events, window, self.config.boundary)
    }

    /// Classify a stored schedule over `window`.
    ///
    /// `None` means the owner has no schedule at all and maps through the
    /// missing-owner policy. Malformed rows are skipped; an empty (or
    /// entirely malformed) schedule is free.
    pub fn status_of(&self, raw: Option<&[RawEvent]>, window: &Window) -> OwnerStatus {
        let Some(raw) = raw else {
            return match self.config.missing_owner {
                MissingOwnerPolicy::Free => OwnerStatus::Free,
                MissingOwnerPolicy::Unknown => OwnerStatus::Unknown,
            };
        };
        let normalized = normalize_events(raw);
        let status = OwnerStatus::from(self.busy_during(&normalized.events, window));
        log::debug!(
            "event=status_query events={} skipped={} status={}",
            normalized.events.len(),
            normalized.skipped.len(),
            status.label()
        );
        status
    }

    /// Is `owner` busy right now, according to `clock`?
    pub fn owner_status<S, C>(&self, store: &S, owner: &str, clock: &C) -> OwnerStatus
    where
        S: EventStore + ?Sized,
        C: Clock + ?Sized,
    {
        self.owner_status_during(store, owner, &Window::instant(clock.now()))
    }

    pub fn owner_status_during<S>(&self, store: &S, owner: &str, window: &Window) -> OwnerStatus
    where
        S: EventStore + ?Sized,
    {
        let snapshot = store.events_for(owner);
        if snapshot.is_none() {
            log::debug!("event=owner_missing owner={owner}");
        }
        self.status_of(snapshot.as_deref(), window)
    }

    /// Status of several owners at one instant read from `clock`.
    pub fn statuses<'o, S, C>(
        &self,
        store: &S,
        owners: &[&'o str],
        clock: &C,
    ) -> Vec<(&'o str, OwnerStatus)>
    where
        S: EventStore + ?Sized,
        C: Clock + ?Sized,
    {
        let window = Window::instant(clock.now());
        owners
            .iter()
            .map(|owner| (*owner, self.owner_status_during(store, owner, &window)))
            .collect()
    }
}
