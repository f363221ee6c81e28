//! Query windows: instants, explicit ranges, local days and local weeks.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{Result, ScheduleError};

/// A closed time range `[start, end]` in UTC.
///
/// Whether the end point itself counts is decided by the
/// [`BoundaryPolicy`](crate::availability::BoundaryPolicy) a query runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Window {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Window {
    /// # Errors
    /// Returns `ScheduleError::InvalidWindow` when `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(ScheduleError::InvalidWindow(format!(
                "start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// The degenerate window covering a single instant.
    pub fn instant(at: DateTime<Utc>) -> Self {
        Self { start: at, end: at }
    }

    /// Local midnight of `date` to local midnight of the following day.
    pub fn day(date: NaiveDate, tz: Tz) -> Result<Self> {
        let next = date
            .succ_opt()
            .ok_or_else(|| ScheduleError::InvalidWindow(format!("no day after {date}")))?;
        Self::new(local_midnight(date, tz)?, local_midnight(next, tz)?)
    }

    /// Monday 00:00 to the following Monday 00:00, local to `tz`, of the week
    /// containing `at`.
    pub fn week_of(at: DateTime<Utc>, tz: Tz) -> Result<Self> {
        let local = at.with_timezone(&tz).date_naive();
        let out_of_range = || ScheduleError::InvalidWindow(format!("no full week around {local}"));
        let monday = local
            .checked_sub_days(Days::new(u64::from(local.weekday().num_days_from_monday())))
            .ok_or_else(out_of_range)?;
        let next_monday = monday
            .checked_add_days(Days::new(7))
            .ok_or_else(out_of_range)?;
        Self::new(local_midnight(monday, tz)?, local_midnight(next_monday, tz)?)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// First instant of `date` in `tz`.
///
/// When a DST jump skips midnight the day starts at the first valid local
/// time after it, probed in 30-minute steps.
fn local_midnight(date: NaiveDate, tz: Tz) -> Result<DateTime<Utc>> {
    for (hour, min) in [(0, 0), (0, 30), (1, 0), (1, 30), (2, 0), (2, 30)] {
        let Some(local) = date.and_hms_opt(hour, min, 0) else {
            continue;
        };
        if let Some(dt) = tz.from_local_datetime(&local).earliest() {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    Err(ScheduleError::InvalidWindow(format!(
        "{date} has no valid start in {tz}"
    )))
}
