pub mod booking;
pub mod profile;
pub mod slot;
