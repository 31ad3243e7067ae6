use async_trait::async_trait;
use mockall::mock;
use slotwise_core::{
    models::{
        booking::{Booking, BookingStatus, NewBooking, PaymentStatus},
        profile::{Profile, ViewerRole},
        slot::{ConsultationSlot, NewSlot, SlotFilter},
    },
    store::ConsultationStore,
};
use uuid::Uuid;

// Mock store for testing failure paths without a database
mock! {
    pub ConsultationStore {}

    #[async_trait]
    impl ConsultationStore for ConsultationStore {
        async fn get_consultation_duration(&self, seller_id: Uuid) -> eyre::Result<Option<i32>>;

        async fn set_consultation_duration(&self, seller_id: Uuid, minutes: i32) -> eyre::Result<()>;

        async fn get_profiles(&self, ids: &[Uuid]) -> eyre::Result<Vec<Profile>>;

        async fn insert_slots(&self, slots: &[NewSlot]) -> eyre::Result<Vec<ConsultationSlot>>;

        async fn get_slot(&self, slot_id: Uuid) -> eyre::Result<Option<ConsultationSlot>>;

        async fn list_slots(
            &self,
            seller_id: Uuid,
            filter: &SlotFilter,
        ) -> eyre::Result<Vec<ConsultationSlot>>;

        async fn delete_unbooked_slot(&self, slot_id: Uuid) -> eyre::Result<bool>;

        async fn book_slot(&self, booking: &NewBooking) -> eyre::Result<Option<Booking>>;

        async fn get_booking(&self, booking_id: Uuid) -> eyre::Result<Option<Booking>>;

        async fn update_booking_status(
            &self,
            booking_id: Uuid,
            expected: &[BookingStatus],
            status: BookingStatus,
            payment_status: PaymentStatus,
        ) -> eyre::Result<Option<Booking>>;

        async fn cancel_and_release(
            &self,
            booking_id: Uuid,
            expected: &[BookingStatus],
            payment_status: PaymentStatus,
        ) -> eyre::Result<Option<Booking>>;

        async fn update_meeting_link(
            &self,
            booking_id: Uuid,
            meeting_link: Option<String>,
        ) -> eyre::Result<Option<Booking>>;

        async fn list_bookings(&self, role: ViewerRole, user_id: Uuid) -> eyre::Result<Vec<Booking>>;
    }
}
