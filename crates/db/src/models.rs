use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::{Report, Result};
use serde::{Deserialize, Serialize};
use slotwise_core::models::{
    booking::Booking,
    profile::Profile,
    slot::ConsultationSlot,
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfile {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub consultation_duration: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbConsultationSlot {
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

/// Statuses are stored as text and parsed on the way out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbConsultationBooking {
    pub id: Uuid,
    pub slot_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub status: String,
    pub payment_status: String,
    pub payment_amount: i64,
    pub notes: Option<String>,
    pub meeting_link: Option<String>,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbProfile> for Profile {
    fn from(row: DbProfile) -> Self {
        Self {
            id: row.id,
            display_name: row.display_name,
            email: row.email,
            avatar_url: row.avatar_url,
            consultation_duration: row.consultation_duration,
        }
    }
}

impl From<DbConsultationSlot> for ConsultationSlot {
    fn from(row: DbConsultationSlot) -> Self {
        Self {
            id: row.id,
            seller_id: row.seller_id,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            is_available: row.is_available,
            is_booked: row.is_booked,
            booking_id: row.booking_id,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbConsultationBooking> for Booking {
    type Error = Report;

    fn try_from(row: DbConsultationBooking) -> Result<Self> {
        Ok(Self {
            id: row.id,
            slot_id: row.slot_id,
            buyer_id: row.buyer_id,
            seller_id: row.seller_id,
            status: row.status.parse()?,
            payment_status: row.payment_status.parse()?,
            payment_amount: row.payment_amount,
            notes: row.notes,
            meeting_link: row.meeting_link,
            booking_date: row.booking_date,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use slotwise_core::models::booking::{BookingStatus, PaymentStatus};

    fn row(status: &str, payment_status: &str) -> DbConsultationBooking {
        let now = Utc::now();
        DbConsultationBooking {
            id: Uuid::new_v4(),
            slot_id: Uuid::new_v4(),
            buyer_id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            status: status.to_string(),
            payment_status: payment_status.to_string(),
            payment_amount: 3000,
            notes: None,
            meeting_link: Some("https://meet.example.com/x".to_string()),
            booking_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_booking_row_conversion() {
        let booking = Booking::try_from(row("cancelled", "refunded")).unwrap();

        assert_eq!(booking.status, BookingStatus::Cancelled);
        assert_eq!(booking.payment_status, PaymentStatus::Refunded);
        assert_eq!(booking.meeting_link.as_deref(), Some("https://meet.example.com/x"));
    }

    #[test]
    fn test_booking_row_with_unknown_status_fails() {
        assert!(Booking::try_from(row("on_hold", "paid")).is_err());
    }
}
