//! # Slot Generation
//!
//! Turns a seller's availability window into fixed-duration bookable slots.
//!
//! Slots start at the window's start time and follow each other without gaps.
//! Generation stops as soon as the rest of the window is shorter than one
//! slot; that trailing remainder is dropped rather than produced as a short
//! slot. A window that cannot hold a single slot is rejected.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{ConsultationError, ConsultationResult},
    models::{slot::NewSlot, window::AvailabilityWindow},
};

/// Consultation length in minutes, bounded to a single working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ConsultationDuration(u32);

impl ConsultationDuration {
    pub const MIN_MINUTES: u32 = 1;
    pub const MAX_MINUTES: u32 = 480;
    pub const DEFAULT_MINUTES: u32 = 30;

    pub fn from_minutes(minutes: u32) -> ConsultationResult<Self> {
        if (Self::MIN_MINUTES..=Self::MAX_MINUTES).contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(ConsultationError::Validation(format!(
                "Consultation duration must be between {} and {} minutes, got {}",
                Self::MIN_MINUTES,
                Self::MAX_MINUTES,
                minutes
            )))
        }
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.0))
    }
}

impl Default for ConsultationDuration {
    fn default() -> Self {
        Self(Self::DEFAULT_MINUTES)
    }
}

impl TryFrom<u32> for ConsultationDuration {
    type Error = ConsultationError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

impl From<ConsultationDuration> for u32 {
    fn from(duration: ConsultationDuration) -> Self {
        duration.0
    }
}

/// Checks the window against the calendar: the end must follow the start and
/// the date must not lie before `today`.
pub fn validate_window(window: &AvailabilityWindow, today: NaiveDate) -> ConsultationResult<()> {
    ensure_ordered(window)?;
    if window.date < today {
        return Err(ConsultationError::PastDate(window.date));
    }
    Ok(())
}

/// Partitions `window` into contiguous slots of exactly `duration`.
///
/// # Errors
///
/// * `ConsultationError::InvalidWindow` - the end is not after the start, or the
///   window is shorter than one slot
pub fn generate_slots(
    window: &AvailabilityWindow,
    duration: ConsultationDuration,
) -> ConsultationResult<Vec<NewSlot>> {
    ensure_ordered(window)?;

    let span = window.end_time - window.start_time;
    let step = duration.as_duration();
    let count = span.num_seconds() / step.num_seconds();
    if count == 0 {
        return Err(ConsultationError::InvalidWindow(format!(
            "window of {} minutes is shorter than the {}-minute consultation",
            span.num_minutes(),
            duration.minutes()
        )));
    }

    // count * step <= span, so no slot boundary wraps past midnight
    (0..count)
        .map(|i| {
            let index = i32::try_from(i).map_err(|_| {
                ConsultationError::InvalidWindow(format!("window holds too many slots ({})", count))
            })?;
            let start_time = window.start_time + step * index;
            Ok(NewSlot {
                seller_id: window.seller_id,
                date: window.date,
                start_time,
                end_time: start_time + step,
            })
        })
        .collect()
}

fn ensure_ordered(window: &AvailabilityWindow) -> ConsultationResult<()> {
    if window.end_time <= window.start_time {
        return Err(ConsultationError::InvalidWindow(format!(
            "end time {} must be after start time {}",
            window.end_time, window.start_time
        )));
    }
    Ok(())
}
