//! # Booking View Assembly
//!
//! Joins a viewer's bookings with the profile of the other party and splits
//! them into upcoming and past bookings.
//!
//! A booking is upcoming when its date is today or later and it still holds
//! its slot (pending or confirmed). Everything else is past. Upcoming bookings
//! are ordered soonest first; past bookings most recent first.

use std::{collections::HashMap, vec};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{
    booking::Booking,
    profile::{BookingView, BookingsOverview, CounterpartProfile, Profile, ViewerRole},
};

/// Both partitions of a viewer's bookings. Each side is a one-shot iterator.
#[derive(Debug)]
pub struct BookingPartitions {
    role: ViewerRole,
    upcoming: vec::IntoIter<BookingView>,
    past: vec::IntoIter<BookingView>,
}

impl BookingPartitions {
    pub fn role(&self) -> ViewerRole {
        self.role
    }

    pub fn into_parts(
        self,
    ) -> (
        impl Iterator<Item = BookingView>,
        impl Iterator<Item = BookingView>,
    ) {
        (self.upcoming, self.past)
    }

    pub fn into_overview(self) -> BookingsOverview {
        BookingsOverview {
            role: self.role,
            upcoming: self.upcoming.collect(),
            past: self.past.collect(),
        }
    }
}

pub fn is_upcoming(booking: &Booking, today: NaiveDate) -> bool {
    booking.booking_date >= today && booking.status.is_active()
}

/// Builds the viewer's partitions from `bookings` and the counterpart
/// `profiles`. Bookings whose counterpart has no profile keep a placeholder.
pub fn assemble(
    role: ViewerRole,
    bookings: Vec<Booking>,
    profiles: Vec<Profile>,
    today: NaiveDate,
) -> BookingPartitions {
    let profiles: HashMap<Uuid, Profile> = profiles.into_iter().map(|p| (p.id, p)).collect();

    let (mut upcoming, mut past): (Vec<_>, Vec<_>) = bookings
        .into_iter()
        .map(|booking| {
            let counterpart_id = role.counterpart_of(&booking);
            let counterpart = profiles
                .get(&counterpart_id)
                .cloned()
                .map(CounterpartProfile::from)
                .unwrap_or_else(|| CounterpartProfile::unknown(counterpart_id));
            BookingView {
                booking,
                counterpart,
            }
        })
        .partition(|view| is_upcoming(&view.booking, today));

    upcoming.sort_by_key(|v| (v.booking.booking_date, v.booking.start_time));
    past.sort_by(|a, b| {
        (b.booking.booking_date, b.booking.start_time).cmp(&(a.booking.booking_date, a.booking.start_time))
    });

    BookingPartitions {
        role,
        upcoming: upcoming.into_iter(),
        past: past.into_iter(),
    }
}
