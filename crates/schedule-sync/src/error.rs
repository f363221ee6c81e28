//! Error types for schedule-sync operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("Missing {0} timestamp")]
    MissingTimestamp(&'static str),

    #[error("Event ends before it starts: {start} > {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Event title must not be empty")]
    EmptyTitle,

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Unknown owner: {0}")]
    UnknownOwner(String),

    #[error("Unknown event {id} for owner {owner}")]
    UnknownEvent { owner: String, id: String },

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Schedule JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
