pub mod booking;
pub mod profile;
pub mod slot;
pub mod window;
