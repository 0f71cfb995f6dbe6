//! Booking lifecycle: pre-book, book, look up, cancel.

mod client;
mod guests;
pub mod models;
mod params;
pub mod parser;

pub use client::Order;
pub use guests::{format_name, Guest, GuestKind, MAX_GUESTS_PER_KIND};
pub use models::{Booking, CancellationPaymentMethod, CancellationResult, PreBookResult};
pub use params::{BookParams, BookingQuery, CreditCard, PreBookParams, Stay};
