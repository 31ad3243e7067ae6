//! # Consultation Store
//!
//! The persistence seam for profiles, slots and bookings. Implementations
//! return `eyre::Result`; the service layer turns failures into
//! `ConsultationError::PersistenceFailure`.
//!
//! Every write that depends on a row's state is conditional on that state at
//! write time and reports whether it applied. Writes touching both a slot
//! and its booking happen as one unit.

pub mod memory;

use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use crate::models::{
    booking::{Booking, BookingStatus, NewBooking, PaymentStatus},
    profile::{Profile, ViewerRole},
    slot::{ConsultationSlot, NewSlot, SlotFilter},
};

#[async_trait]
pub trait ConsultationStore: Send + Sync {
    /// Seller's configured consultation duration in minutes, if any.
    async fn get_consultation_duration(&self, seller_id: Uuid) -> Result<Option<i32>>;

    async fn set_consultation_duration(&self, seller_id: Uuid, minutes: i32) -> Result<()>;

    async fn get_profiles(&self, ids: &[Uuid]) -> Result<Vec<Profile>>;

    async fn insert_slots(&self, slots: &[NewSlot]) -> Result<Vec<ConsultationSlot>>;

    async fn get_slot(&self, slot_id: Uuid) -> Result<Option<ConsultationSlot>>;

    async fn list_slots(&self, seller_id: Uuid, filter: &SlotFilter) -> Result<Vec<ConsultationSlot>>;

    /// Deletes the slot only if it is unbooked. Returns `false` otherwise.
    async fn delete_unbooked_slot(&self, slot_id: Uuid) -> Result<bool>;

    /// Claims the slot and records the booking as one unit: the slot is
    /// marked booked and references the new booking, or nothing changes.
    /// Returns `None` when the slot is not available and unbooked.
    async fn book_slot(&self, booking: &NewBooking) -> Result<Option<Booking>>;

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>>;

    /// Moves the booking to `status` only if it is currently in one of
    /// `expected`. Returns `None` when it was not.
    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        expected: &[BookingStatus],
        status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> Result<Option<Booking>>;

    /// Cancels the booking if it is in one of `expected` and, in the same
    /// unit, frees the slot that references it. Returns `None` when the
    /// booking was not in an expected status.
    async fn cancel_and_release(
        &self,
        booking_id: Uuid,
        expected: &[BookingStatus],
        payment_status: PaymentStatus,
    ) -> Result<Option<Booking>>;

    /// Sets the link on an active booking. Returns `None` when the booking
    /// is no longer active.
    async fn update_meeting_link(&self, booking_id: Uuid, meeting_link: Option<String>) -> Result<Option<Booking>>;

    /// Every booking where `user_id` is the buyer (or seller, per `role`).
    async fn list_bookings(&self, role: ViewerRole, user_id: Uuid) -> Result<Vec<Booking>>;
}
