use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    pub const ACTIVE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Pending and confirmed bookings hold their slot.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (*self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) | (Confirmed, Completed)
        )
    }

    /// Every status a booking may be in for a move to `next` to be allowed.
    /// Stores use this as the write-time guard of a transition.
    pub fn sources_of(next: BookingStatus) -> Vec<BookingStatus> {
        Self::ALL
            .into_iter()
            .filter(|status| status.can_transition_to(next))
            .collect()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(eyre::eyre!("Unknown booking status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "refunded" => Ok(PaymentStatus::Refunded),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(eyre::eyre!("Unknown payment status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub slot_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    /// Minor currency units.
    pub payment_amount: i64,
    pub notes: Option<String>,
    pub meeting_link: Option<String>,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn ends_at(&self) -> NaiveDateTime {
        self.booking_date.and_time(self.end_time)
    }

    pub fn involves(&self, user_id: Uuid) -> bool {
        self.buyer_id == user_id || self.seller_id == user_id
    }
}

/// Insert payload for a booking; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub slot_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_amount: i64,
    pub notes: Option<String>,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub slot_id: Uuid,
    #[serde(default)]
    pub payment_amount: i64,
    pub notes: Option<String>,
    /// Set when the checkout already captured the payment.
    #[serde(default)]
    pub paid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMeetingLinkRequest {
    pub meeting_link: Option<String>,
}
