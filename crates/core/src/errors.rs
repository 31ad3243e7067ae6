use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ConsultationError {
    #[error("Invalid availability window: {0}")]
    InvalidWindow(String),

    #[error("Date {0} is in the past")]
    PastDate(NaiveDate),

    #[error("Slot {0} is not available for booking")]
    SlotUnavailable(Uuid),

    #[error("Slot {0} has a booking and cannot be deleted")]
    SlotInUse(Uuid),

    #[error("Booking {0} is not active")]
    BookingNotActive(Uuid),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(#[from] eyre::Report),
}

pub type ConsultationResult<T> = Result<T, ConsultationError>;
