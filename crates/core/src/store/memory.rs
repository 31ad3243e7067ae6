//! In-process `ConsultationStore` for local development and tests.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::Utc;
use eyre::{Result, eyre};
use uuid::Uuid;

use super::ConsultationStore;
use crate::models::{
    booking::{Booking, BookingStatus, NewBooking, PaymentStatus},
    profile::{Profile, ViewerRole},
    slot::{ConsultationSlot, NewSlot, SlotFilter},
};

#[derive(Debug, Default)]
struct Tables {
    profiles: HashMap<Uuid, Profile>,
    slots: HashMap<Uuid, ConsultationSlot>,
    bookings: HashMap<Uuid, Booking>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let store = Self::new();
        if let Ok(mut tables) = store.tables.lock() {
            tables.profiles.extend(profiles.into_iter().map(|p| (p.id, p)));
        }
        store
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| eyre!("In-memory store lock poisoned"))
    }
}

#[async_trait]
impl ConsultationStore for InMemoryStore {
    async fn get_consultation_duration(&self, seller_id: Uuid) -> Result<Option<i32>> {
        let tables = self.lock()?;
        Ok(tables
            .profiles
            .get(&seller_id)
            .and_then(|p| p.consultation_duration))
    }

    async fn set_consultation_duration(&self, seller_id: Uuid, minutes: i32) -> Result<()> {
        let mut tables = self.lock()?;
        let profile = tables
            .profiles
            .get_mut(&seller_id)
            .ok_or_else(|| eyre!("Profile {} not found", seller_id))?;
        profile.consultation_duration = Some(minutes);
        Ok(())
    }

    async fn get_profiles(&self, ids: &[Uuid]) -> Result<Vec<Profile>> {
        let tables = self.lock()?;
        Ok(ids
            .iter()
            .filter_map(|id| tables.profiles.get(id).cloned())
            .collect())
    }

    async fn insert_slots(&self, slots: &[NewSlot]) -> Result<Vec<ConsultationSlot>> {
        let mut tables = self.lock()?;
        let now = Utc::now();
        let inserted: Vec<_> = slots
            .iter()
            .map(|slot| ConsultationSlot {
                id: Uuid::new_v4(),
                seller_id: slot.seller_id,
                date: slot.date,
                start_time: slot.start_time,
                end_time: slot.end_time,
                is_available: true,
                is_booked: false,
                booking_id: None,
                created_at: now,
            })
            .collect();
        tables
            .slots
            .extend(inserted.iter().map(|slot| (slot.id, slot.clone())));
        Ok(inserted)
    }

    async fn get_slot(&self, slot_id: Uuid) -> Result<Option<ConsultationSlot>> {
        Ok(self.lock()?.slots.get(&slot_id).cloned())
    }

    async fn list_slots(&self, seller_id: Uuid, filter: &SlotFilter) -> Result<Vec<ConsultationSlot>> {
        let tables = self.lock()?;
        let mut slots: Vec<_> = tables
            .slots
            .values()
            .filter(|slot| slot.seller_id == seller_id && filter.matches(slot))
            .cloned()
            .collect();
        slots.sort_by_key(|slot| (slot.date, slot.start_time));
        Ok(slots)
    }

    async fn delete_unbooked_slot(&self, slot_id: Uuid) -> Result<bool> {
        let mut tables = self.lock()?;
        match tables.slots.get(&slot_id) {
            Some(slot) if !slot.is_booked => {
                tables.slots.remove(&slot_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn book_slot(&self, booking: &NewBooking) -> Result<Option<Booking>> {
        let mut tables = self.lock()?;
        let bookable = tables
            .slots
            .get(&booking.slot_id)
            .is_some_and(ConsultationSlot::is_bookable);
        let has_active = tables
            .bookings
            .values()
            .any(|b| b.slot_id == booking.slot_id && b.status.is_active());
        if !bookable || has_active {
            return Ok(None);
        }

        let now = Utc::now();
        let inserted = Booking {
            id: Uuid::new_v4(),
            slot_id: booking.slot_id,
            buyer_id: booking.buyer_id,
            seller_id: booking.seller_id,
            status: booking.status,
            payment_status: booking.payment_status,
            payment_amount: booking.payment_amount,
            notes: booking.notes.clone(),
            meeting_link: None,
            booking_date: booking.booking_date,
            start_time: booking.start_time,
            end_time: booking.end_time,
            created_at: now,
            updated_at: now,
        };
        if let Some(slot) = tables.slots.get_mut(&booking.slot_id) {
            slot.is_booked = true;
            slot.booking_id = Some(inserted.id);
        }
        tables.bookings.insert(inserted.id, inserted.clone());
        Ok(Some(inserted))
    }

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>> {
        Ok(self.lock()?.bookings.get(&booking_id).cloned())
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        expected: &[BookingStatus],
        status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> Result<Option<Booking>> {
        let mut tables = self.lock()?;
        let Some(booking) = tables
            .bookings
            .get_mut(&booking_id)
            .filter(|b| expected.contains(&b.status))
        else {
            return Ok(None);
        };
        booking.status = status;
        booking.payment_status = payment_status;
        booking.updated_at = Utc::now();
        Ok(Some(booking.clone()))
    }

    async fn cancel_and_release(
        &self,
        booking_id: Uuid,
        expected: &[BookingStatus],
        payment_status: PaymentStatus,
    ) -> Result<Option<Booking>> {
        let mut tables = self.lock()?;
        let Some(booking) = tables
            .bookings
            .get_mut(&booking_id)
            .filter(|b| expected.contains(&b.status))
        else {
            return Ok(None);
        };
        booking.status = BookingStatus::Cancelled;
        booking.payment_status = payment_status;
        booking.updated_at = Utc::now();
        let cancelled = booking.clone();

        if let Some(slot) = tables
            .slots
            .get_mut(&cancelled.slot_id)
            .filter(|slot| slot.booking_id == Some(booking_id))
        {
            slot.is_booked = false;
            slot.is_available = true;
            slot.booking_id = None;
        }
        Ok(Some(cancelled))
    }

    async fn update_meeting_link(&self, booking_id: Uuid, meeting_link: Option<String>) -> Result<Option<Booking>> {
        let mut tables = self.lock()?;
        let Some(booking) = tables
            .bookings
            .get_mut(&booking_id)
            .filter(|b| b.status.is_active())
        else {
            return Ok(None);
        };
        booking.meeting_link = meeting_link;
        booking.updated_at = Utc::now();
        Ok(Some(booking.clone()))
    }

    async fn list_bookings(&self, role: ViewerRole, user_id: Uuid) -> Result<Vec<Booking>> {
        let tables = self.lock()?;
        Ok(tables
            .bookings
            .values()
            .filter(|b| match role {
                ViewerRole::Buyer => b.buyer_id == user_id,
                ViewerRole::Seller => b.seller_id == user_id,
            })
            .cloned()
            .collect())
    }
}
