//! # Booking Lifecycle
//!
//! Pure state transitions on a slot/booking pair. The store applies the same
//! checks again as conditional updates; these functions decide what a
//! transition produces and reject it early with a precise error.

use chrono::NaiveDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::{
    errors::{ConsultationError, ConsultationResult},
    models::{
        booking::{Booking, BookingStatus, CreateBookingRequest, NewBooking, PaymentStatus},
        slot::ConsultationSlot,
    },
};

/// Booking-relevant state of a slot, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Unbooked,
    Booked,
    /// Withdrawn by the seller without a booking.
    Unavailable,
}

impl SlotState {
    pub fn of(slot: &ConsultationSlot) -> Self {
        match (slot.is_available, slot.is_booked) {
            (_, true) => SlotState::Booked,
            (true, false) => SlotState::Unbooked,
            (false, false) => SlotState::Unavailable,
        }
    }
}

/// Builds the booking a buyer's claim on `slot` would create.
///
/// A captured payment produces a confirmed, paid booking; otherwise the
/// booking waits in `pending` until the payment settles.
pub fn book(
    slot: &ConsultationSlot,
    buyer_id: Uuid,
    request: &CreateBookingRequest,
    now: NaiveDateTime,
) -> ConsultationResult<NewBooking> {
    if slot.seller_id == buyer_id {
        return Err(ConsultationError::Validation(
            "Sellers cannot book their own consultation slots".to_string(),
        ));
    }
    if SlotState::of(slot) != SlotState::Unbooked {
        warn!("Rejected booking of slot {}: not available", slot.id);
        return Err(ConsultationError::SlotUnavailable(slot.id));
    }
    if slot.starts_at() <= now {
        return Err(ConsultationError::PastDate(slot.date));
    }
    if request.payment_amount < 0 {
        return Err(ConsultationError::Validation(
            "Payment amount cannot be negative".to_string(),
        ));
    }

    let (status, payment_status) = if request.paid {
        (BookingStatus::Confirmed, PaymentStatus::Paid)
    } else {
        (BookingStatus::Pending, PaymentStatus::Pending)
    };

    Ok(NewBooking {
        slot_id: slot.id,
        buyer_id,
        seller_id: slot.seller_id,
        status,
        payment_status,
        payment_amount: request.payment_amount,
        notes: request.notes.clone().filter(|n| !n.trim().is_empty()),
        booking_date: slot.date,
        start_time: slot.start_time,
        end_time: slot.end_time,
    })
}

/// Status pair a cancelled booking ends in.
pub fn cancel(booking: &Booking) -> ConsultationResult<(BookingStatus, PaymentStatus)> {
    transition(booking, BookingStatus::Cancelled)?;
    Ok((BookingStatus::Cancelled, PaymentStatus::Refunded))
}

/// Status pair after the buyer's payment settles.
pub fn confirm(booking: &Booking) -> ConsultationResult<(BookingStatus, PaymentStatus)> {
    transition(booking, BookingStatus::Confirmed)?;
    Ok((BookingStatus::Confirmed, PaymentStatus::Paid))
}

/// Completion is only possible once the consultation's end time has passed.
pub fn complete(booking: &Booking, now: NaiveDateTime) -> ConsultationResult<(BookingStatus, PaymentStatus)> {
    transition(booking, BookingStatus::Completed)?;
    if booking.ends_at() > now {
        return Err(ConsultationError::Validation(format!(
            "Booking {} cannot be completed before {}",
            booking.id,
            booking.ends_at()
        )));
    }
    Ok((BookingStatus::Completed, booking.payment_status))
}

/// Only unbooked slots may be deleted.
pub fn ensure_deletable(slot: &ConsultationSlot) -> ConsultationResult<()> {
    if slot.is_booked {
        return Err(ConsultationError::SlotInUse(slot.id));
    }
    Ok(())
}

fn transition(booking: &Booking, next: BookingStatus) -> ConsultationResult<()> {
    if !booking.status.is_active() {
        return Err(ConsultationError::BookingNotActive(booking.id));
    }
    if !booking.status.can_transition_to(next) {
        return Err(ConsultationError::Validation(format!(
            "Booking {} cannot move from {} to {}",
            booking.id, booking.status, next
        )));
    }
    Ok(())
}
