pub mod api;
pub mod client;

pub use api::{BookingApi, HttpBookingApi};
pub use client::BackendClient;
