//! # Slotwise Core
//!
//! Domain logic for consultation booking: turning seller availability into
//! bookable slots, the booking lifecycle, and per-role booking views.

pub mod errors;
pub mod lifecycle;
pub mod models;
pub mod service;
pub mod slots;
pub mod store;
pub mod views;
