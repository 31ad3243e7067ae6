use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A contiguous block of time a seller declares open for consultations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub seller_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl AvailabilityWindow {
    pub fn new(seller_id: Uuid, date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            seller_id,
            date,
            start_time,
            end_time,
        }
    }

    /// Length of the window in whole minutes. Negative when the window is inverted.
    pub fn span_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAvailabilityRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl CreateAvailabilityRequest {
    pub fn into_window(self, seller_id: Uuid) -> AvailabilityWindow {
        AvailabilityWindow::new(seller_id, self.date, self.start_time, self.end_time)
    }
}
