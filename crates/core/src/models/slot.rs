use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted, individually bookable slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationSlot {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub is_booked: bool,
    pub booking_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl ConsultationSlot {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }

    pub fn is_bookable(&self) -> bool {
        self.is_available && !self.is_booked
    }
}

/// A slot produced by the generator, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSlot {
    pub seller_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl NewSlot {
    /// Half-open interval overlap on the same date.
    pub fn overlaps(&self, other: &ConsultationSlot) -> bool {
        self.date == other.date
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub available_only: bool,
}

impl SlotFilter {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            from: Some(date),
            to: Some(date),
            available_only: false,
        }
    }

    pub fn matches(&self, slot: &ConsultationSlot) -> bool {
        self.from.is_none_or(|from| slot.date >= from)
            && self.to.is_none_or(|to| slot.date <= to)
            && (!self.available_only || slot.is_bookable())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub is_booked: bool,
}

impl From<ConsultationSlot> for SlotResponse {
    fn from(slot: ConsultationSlot) -> Self {
        Self {
            id: slot.id,
            date: slot.date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            is_available: slot.is_available,
            is_booked: slot.is_booked,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAvailabilityResponse {
    pub duration_minutes: u32,
    pub slots: Vec<SlotResponse>,
}
