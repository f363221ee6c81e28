//! # schedule-sync
//!
//! Busy/free availability for owner calendars.
//!
//! Given an owner's events, the engine answers "is this owner busy at
//! instant T?" and "is this owner busy at any point of window [T1, T2]?".
//! Timestamps may arrive with or without an offset; naive ones are UTC.
//! Events whose timestamps cannot be parsed are skipped, never fatal.
//!
//! ## Modules
//!
//! - [`availability`]: Overlap tests and the boundary policy
//! - [`engine`]: Owner-level status queries over a store and a clock
//! - [`event`]: Raw and validated event records, normalization
//! - [`window`]: Instants, ranges, local days and weeks
//! - [`freebusy`]: Merged busy periods and free slots
//! - [`conflict`]: Overlapping and duplicate events within a schedule
//! - [`store`]: `EventStore` boundary and an in-memory implementation
//! - [`clock`]: Time sources
//! - [`config`]: Engine configuration (TOML)
//! - [`timestamp`]: ISO 8601 parsing and UTC normalization
//! - [`error`]: Error types

pub mod availability;
pub mod clock;
pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod event;
pub mod freebusy;
pub mod store;
pub mod timestamp;
pub mod window;

pub use availability::{is_busy_at, is_busy_during_window, Availability, BoundaryPolicy};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EngineConfig, MissingOwnerPolicy};
pub use conflict::{dedupe_events, find_conflicts, find_conflicts_between, Conflict};
pub use engine::{AvailabilityEngine, OwnerStatus};
pub use error::ScheduleError;
pub use event::{normalize_events, Event, EventPatch, NewEvent, RawEvent};
pub use freebusy::{find_first_free_slot, find_free_slots, FreeSlot};
pub use store::{EventStore, InMemoryEventStore};
pub use timestamp::{parse_timestamp, parse_timezone};
pub use window::Window;
