//! PostgreSQL implementation of [`ConsultationStore`] over the repository
//! functions.

use async_trait::async_trait;
use eyre::Result;
use slotwise_core::{
    models::{
        booking::{Booking, BookingStatus, NewBooking, PaymentStatus},
        profile::{Profile, ViewerRole},
        slot::{ConsultationSlot, NewSlot, SlotFilter},
    },
    store::ConsultationStore,
};
use uuid::Uuid;

use crate::{
    DbPool,
    repositories::{booking, profile, slot},
};

#[derive(Debug, Clone)]
pub struct PgConsultationStore {
    pool: DbPool,
}

impl PgConsultationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ConsultationStore for PgConsultationStore {
    async fn get_consultation_duration(&self, seller_id: Uuid) -> Result<Option<i32>> {
        profile::get_consultation_duration(&self.pool, seller_id).await
    }

    async fn set_consultation_duration(&self, seller_id: Uuid, minutes: i32) -> Result<()> {
        profile::set_consultation_duration(&self.pool, seller_id, minutes).await
    }

    async fn get_profiles(&self, ids: &[Uuid]) -> Result<Vec<Profile>> {
        let rows = profile::get_profiles_by_ids(&self.pool, ids).await?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn insert_slots(&self, slots: &[NewSlot]) -> Result<Vec<ConsultationSlot>> {
        let rows = slot::create_slots(&self.pool, slots).await?;
        Ok(rows.into_iter().map(ConsultationSlot::from).collect())
    }

    async fn get_slot(&self, slot_id: Uuid) -> Result<Option<ConsultationSlot>> {
        let row = slot::get_slot_by_id(&self.pool, slot_id).await?;
        Ok(row.map(ConsultationSlot::from))
    }

    async fn list_slots(&self, seller_id: Uuid, filter: &SlotFilter) -> Result<Vec<ConsultationSlot>> {
        let rows = slot::get_slots_by_seller(&self.pool, seller_id, filter).await?;
        Ok(rows.into_iter().map(ConsultationSlot::from).collect())
    }

    async fn delete_unbooked_slot(&self, slot_id: Uuid) -> Result<bool> {
        slot::delete_unbooked_slot(&self.pool, slot_id).await
    }

    async fn book_slot(&self, new_booking: &NewBooking) -> Result<Option<Booking>> {
        booking::book_slot(&self.pool, new_booking)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>> {
        booking::get_booking_by_id(&self.pool, booking_id)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        expected: &[BookingStatus],
        status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> Result<Option<Booking>> {
        booking::update_booking_status(&self.pool, booking_id, expected, status, payment_status)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn cancel_and_release(
        &self,
        booking_id: Uuid,
        expected: &[BookingStatus],
        payment_status: PaymentStatus,
    ) -> Result<Option<Booking>> {
        booking::cancel_and_release(&self.pool, booking_id, expected, payment_status)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn update_meeting_link(&self, booking_id: Uuid, meeting_link: Option<String>) -> Result<Option<Booking>> {
        booking::update_meeting_link(&self.pool, booking_id, meeting_link.as_deref())
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn list_bookings(&self, role: ViewerRole, user_id: Uuid) -> Result<Vec<Booking>> {
        booking::get_bookings_for_user(&self.pool, role, user_id)
            .await?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }
}
