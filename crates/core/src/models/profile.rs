use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::booking::Booking;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub consultation_duration: Option<i32>,
}

/// The public part of a profile shown next to a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartProfile {
    pub id: Uuid,
    pub display_name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

impl CounterpartProfile {
    pub fn unknown(id: Uuid) -> Self {
        Self {
            id,
            display_name: "Unknown user".to_string(),
            email: None,
            avatar_url: None,
        }
    }
}

impl From<Profile> for CounterpartProfile {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            display_name: profile.display_name,
            email: Some(profile.email),
            avatar_url: profile.avatar_url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerRole {
    Buyer,
    Seller,
}

impl ViewerRole {
    /// The user on the other side of `booking` from this role's point of view.
    pub fn counterpart_of(&self, booking: &Booking) -> Uuid {
        match self {
            ViewerRole::Buyer => booking.seller_id,
            ViewerRole::Seller => booking.buyer_id,
        }
    }
}

impl fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerRole::Buyer => f.write_str("buyer"),
            ViewerRole::Seller => f.write_str("seller"),
        }
    }
}

impl FromStr for ViewerRole {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(ViewerRole::Buyer),
            "seller" => Ok(ViewerRole::Seller),
            other => Err(eyre::eyre!("Unknown viewer role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingView {
    #[serde(flatten)]
    pub booking: Booking,
    pub counterpart: CounterpartProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingsOverview {
    pub role: ViewerRole,
    pub upcoming: Vec<BookingView>,
    pub past: Vec<BookingView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationDurationResponse {
    pub seller_id: Uuid,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConsultationDurationRequest {
    pub duration_minutes: u32,
}
