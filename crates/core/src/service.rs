//! # Consultation Service
//!
//! Orchestrates the slot generator, the booking lifecycle and the view
//! assembler over a [`ConsultationStore`]. Every method is one user action:
//! it either completes or returns a [`ConsultationError`] scoped to that
//! action. Nothing is retried.
//!
//! The current time is passed in by the caller so that the same inputs always
//! give the same outcome.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    errors::{ConsultationError, ConsultationResult},
    lifecycle,
    models::{
        booking::{Booking, BookingStatus, CreateBookingRequest, PaymentStatus},
        profile::{BookingsOverview, ViewerRole},
        slot::{ConsultationSlot, SlotFilter},
        window::AvailabilityWindow,
    },
    slots::{self, ConsultationDuration},
    store::ConsultationStore,
    views,
};

#[derive(Clone)]
pub struct ConsultationService {
    store: Arc<dyn ConsultationStore>,
    default_duration: ConsultationDuration,
}

impl ConsultationService {
    pub fn new(store: Arc<dyn ConsultationStore>, default_duration: ConsultationDuration) -> Self {
        Self {
            store,
            default_duration,
        }
    }

    /// The seller's configured duration, or the service default when unset.
    pub async fn consultation_duration(&self, seller_id: Uuid) -> ConsultationResult<ConsultationDuration> {
        let stored = self.store.get_consultation_duration(seller_id).await?;
        match stored {
            Some(minutes) => {
                let minutes = u32::try_from(minutes).map_err(|_| {
                    ConsultationError::Validation(format!(
                        "Stored consultation duration {} is invalid",
                        minutes
                    ))
                })?;
                ConsultationDuration::from_minutes(minutes)
            }
            None => Ok(self.default_duration),
        }
    }

    pub async fn set_consultation_duration(
        &self,
        seller_id: Uuid,
        minutes: u32,
    ) -> ConsultationResult<ConsultationDuration> {
        let duration = ConsultationDuration::from_minutes(minutes)?;
        if self.store.get_profiles(&[seller_id]).await?.is_empty() {
            return Err(ConsultationError::NotFound(format!(
                "Profile with ID {} not found",
                seller_id
            )));
        }
        self.store
            .set_consultation_duration(seller_id, duration.minutes() as i32)
            .await?;
        info!("Seller {} consultation duration set to {} minutes", seller_id, minutes);
        Ok(duration)
    }

    /// Validates the window, splits it into slots of the seller's duration and
    /// persists them. Windows that overlap existing slots are rejected.
    pub async fn create_availability(
        &self,
        window: &AvailabilityWindow,
        today: NaiveDate,
    ) -> ConsultationResult<(ConsultationDuration, Vec<ConsultationSlot>)> {
        slots::validate_window(window, today)?;
        let duration = self.consultation_duration(window.seller_id).await?;
        let generated = slots::generate_slots(window, duration)?;

        let existing = self
            .store
            .list_slots(window.seller_id, &SlotFilter::for_date(window.date))
            .await?;
        if let Some(clash) = generated
            .iter()
            .find_map(|new| existing.iter().find(|slot| new.overlaps(slot)))
        {
            warn!(
                "Rejected availability for seller {} on {}: overlaps slot {}",
                window.seller_id, window.date, clash.id
            );
            return Err(ConsultationError::Validation(format!(
                "Window overlaps the existing slot {}-{}",
                clash.start_time, clash.end_time
            )));
        }

        let inserted = self.store.insert_slots(&generated).await?;
        info!(
            "Created {} slots of {} minutes for seller {} on {}",
            inserted.len(),
            duration.minutes(),
            window.seller_id,
            window.date
        );
        Ok((duration, inserted))
    }

    pub async fn list_slots(
        &self,
        seller_id: Uuid,
        filter: &SlotFilter,
    ) -> ConsultationResult<Vec<ConsultationSlot>> {
        Ok(self.store.list_slots(seller_id, filter).await?)
    }

    pub async fn delete_slot(&self, seller_id: Uuid, slot_id: Uuid) -> ConsultationResult<()> {
        let slot = self.require_slot(slot_id).await?;
        if slot.seller_id != seller_id {
            return Err(ConsultationError::Authorization(
                "Only the owning seller can delete a slot".to_string(),
            ));
        }
        lifecycle::ensure_deletable(&slot)?;

        if !self.store.delete_unbooked_slot(slot_id).await? {
            // booked between the read and the delete
            return Err(ConsultationError::SlotInUse(slot_id));
        }
        info!("Deleted slot {}", slot_id);
        Ok(())
    }

    /// Claims the slot for `buyer_id` and records the booking.
    ///
    /// The claim is conditional and atomic with the booking insert, so of two
    /// concurrent attempts only one succeeds; the other gets `SlotUnavailable`.
    pub async fn book_slot(
        &self,
        buyer_id: Uuid,
        request: &CreateBookingRequest,
        now: NaiveDateTime,
    ) -> ConsultationResult<Booking> {
        let slot = self.require_slot(request.slot_id).await?;
        let new_booking = lifecycle::book(&slot, buyer_id, request, now)?;

        let Some(booking) = self.store.book_slot(&new_booking).await? else {
            warn!("Slot {} was claimed concurrently", slot.id);
            return Err(ConsultationError::SlotUnavailable(slot.id));
        };

        info!(
            "Buyer {} booked slot {} ({}, {})",
            buyer_id, slot.id, booking.status, booking.payment_status
        );
        Ok(booking)
    }

    pub async fn confirm_booking(&self, buyer_id: Uuid, booking_id: Uuid) -> ConsultationResult<Booking> {
        let booking = self.require_booking(booking_id).await?;
        if booking.buyer_id != buyer_id {
            return Err(ConsultationError::Authorization(
                "Only the buyer can confirm payment for a booking".to_string(),
            ));
        }
        let (status, payment_status) = lifecycle::confirm(&booking)?;

        let booking = self.apply_transition(booking_id, status, payment_status).await?;
        info!("Booking {} confirmed", booking_id);
        Ok(booking)
    }

    /// Cancels an active booking, refunds it and frees its slot.
    pub async fn cancel_booking(&self, user_id: Uuid, booking_id: Uuid) -> ConsultationResult<Booking> {
        let booking = self.require_booking(booking_id).await?;
        if !booking.involves(user_id) {
            return Err(ConsultationError::Authorization(
                "Only the buyer or the seller can cancel a booking".to_string(),
            ));
        }
        let (status, payment_status) = lifecycle::cancel(&booking)?;

        let booking = self
            .store
            .cancel_and_release(booking_id, &BookingStatus::sources_of(status), payment_status)
            .await?
            .ok_or(ConsultationError::BookingNotActive(booking_id))?;

        info!("Booking {} cancelled by {}, slot {} released", booking_id, user_id, booking.slot_id);
        Ok(booking)
    }

    pub async fn complete_booking(
        &self,
        seller_id: Uuid,
        booking_id: Uuid,
        now: NaiveDateTime,
    ) -> ConsultationResult<Booking> {
        let booking = self.require_booking(booking_id).await?;
        if booking.seller_id != seller_id {
            return Err(ConsultationError::Authorization(
                "Only the seller can complete a booking".to_string(),
            ));
        }
        let (status, payment_status) = lifecycle::complete(&booking, now)?;

        let booking = self.apply_transition(booking_id, status, payment_status).await?;
        info!("Booking {} completed", booking_id);
        Ok(booking)
    }

    pub async fn update_meeting_link(
        &self,
        seller_id: Uuid,
        booking_id: Uuid,
        meeting_link: Option<&str>,
    ) -> ConsultationResult<Booking> {
        let booking = self.require_booking(booking_id).await?;
        if booking.seller_id != seller_id {
            return Err(ConsultationError::Authorization(
                "Only the seller can set the meeting link".to_string(),
            ));
        }
        if !booking.status.is_active() {
            return Err(ConsultationError::BookingNotActive(booking_id));
        }
        let meeting_link = meeting_link
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map(str::to_string);

        self.store
            .update_meeting_link(booking_id, meeting_link)
            .await?
            .ok_or(ConsultationError::BookingNotActive(booking_id))
    }

    /// The viewer's bookings joined with the other party's profile.
    pub async fn bookings_overview(
        &self,
        role: ViewerRole,
        viewer_id: Uuid,
        today: NaiveDate,
    ) -> ConsultationResult<BookingsOverview> {
        let bookings = self.store.list_bookings(role, viewer_id).await?;

        let mut counterpart_ids: Vec<Uuid> = bookings.iter().map(|b| role.counterpart_of(b)).collect();
        counterpart_ids.sort_unstable();
        counterpart_ids.dedup();
        let profiles = if counterpart_ids.is_empty() {
            Vec::new()
        } else {
            self.store.get_profiles(&counterpart_ids).await?
        };

        Ok(views::assemble(role, bookings, profiles, today).into_overview())
    }

    /// Writes a transition guarded by the statuses it may start from. A
    /// booking that moved on since it was read is no longer active for this
    /// transition.
    async fn apply_transition(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> ConsultationResult<Booking> {
        self.store
            .update_booking_status(
                booking_id,
                &BookingStatus::sources_of(status),
                status,
                payment_status,
            )
            .await?
            .ok_or(ConsultationError::BookingNotActive(booking_id))
    }

    async fn require_slot(&self, slot_id: Uuid) -> ConsultationResult<ConsultationSlot> {
        self.store
            .get_slot(slot_id)
            .await?
            .ok_or_else(|| ConsultationError::NotFound(format!("Slot with ID {} not found", slot_id)))
    }

    async fn require_booking(&self, booking_id: Uuid) -> ConsultationResult<Booking> {
        self.store
            .get_booking(booking_id)
            .await?
            .ok_or_else(|| ConsultationError::NotFound(format!("Booking with ID {} not found", booking_id)))
    }
}
