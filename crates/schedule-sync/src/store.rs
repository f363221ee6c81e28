//! Event storage boundary.
//!
//! The engine only needs [`EventStore::events_for`], a snapshot read of one
//! owner's events. [`InMemoryEventStore`] adds the create/update/delete
//! lifecycle and the JSON schedule file format:
//!
//! ```json
//! { "alice": [ { "id": "e1", "title": "Standup",
//!                "start": "2025-10-22T09:00:00Z", "end": "2025-10-22T09:15:00Z" } ] }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ScheduleError};
use crate::event::{Event, EventPatch, NewEvent, RawEvent};

pub trait EventStore {
    /// A copy of `owner`'s events as of the read, or `None` if the owner is
    /// not known to the store.
    fn events_for(&self, owner: &str) -> Option<Vec<RawEvent>>;
}

/// Owner id to stored events, kept in memory.
///
/// Rows loaded from JSON are kept verbatim, malformed ones included; rows
/// written through [`create_event`](Self::create_event) and
/// [`update_event`](Self::update_event) are always valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryEventStore {
    owners: BTreeMap<String, Vec<RawEvent>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let store: Self = serde_json::from_str(json)?;
        log::debug!(
            "event=store_load owners={} events={}",
            store.owners.len(),
            store.owners.values().map(Vec::len).sum::<usize>()
        );
        Ok(store)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Register an owner with an empty schedule. Returns `false` if the owner
    /// already existed, in which case nothing changes.
    pub fn add_owner(&mut self, owner: impl Into<String>) -> bool {
        let owner = owner.into();
        if self.owners.contains_key(&owner) {
            return false;
        }
        self.owners.insert(owner, Vec::new());
        true
    }

    /// Remove an owner and all of their events.
    pub fn remove_owner(&mut self, owner: &str) -> Result<Vec<RawEvent>> {
        self.owners
            .remove(owner)
            .ok_or_else(|| ScheduleError::UnknownOwner(owner.to_string()))
    }

    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.owners.keys().map(String::as_str)
    }

    /// Validate and append a new event, assigning it a fresh id.
    pub fn create_event(&mut self, owner: &str, new: NewEvent) -> Result<Event> {
        let events = self.owner_mut(owner)?;
        let event = new.into_event(Uuid::new_v4().to_string())?;
        events.push(event.to_raw());
        log::debug!("event=create owner={owner} id={}", event.id());
        Ok(event)
    }

    /// Apply `patch` to the event `id`. The stored row is left untouched if
    /// the patched event fails validation.
    pub fn update_event(&mut self, owner: &str, id: &str, patch: &EventPatch) -> Result<Event> {
        let row = self
            .owner_mut(owner)?
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| unknown_event(owner, id))?;
        let event = patch.apply(row)?;
        *row = event.to_raw();
        log::debug!("event=update owner={owner} id={id}");
        Ok(event)
    }

    pub fn delete_event(&mut self, owner: &str, id: &str) -> Result<RawEvent> {
        let events = self.owner_mut(owner)?;
        let idx = events
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(|| unknown_event(owner, id))?;
        log::debug!("event=delete owner={owner} id={id}");
        Ok(events.remove(idx))
    }

    fn owner_mut(&mut self, owner: &str) -> Result<&mut Vec<RawEvent>> {
        self.owners
            .get_mut(owner)
            .ok_or_else(|| ScheduleError::UnknownOwner(owner.to_string()))
    }
}

fn unknown_event(owner: &str, id: &str) -> ScheduleError {
    ScheduleError::UnknownEvent {
        owner: owner.to_string(),
        id: id.to_string(),
    }
}

impl EventStore for InMemoryEventStore {
    fn events_for(&self, owner: &str) -> Option<Vec<RawEvent>> {
        self.owners.get(owner).cloned()
    }
}
