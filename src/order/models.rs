//! Booking records.

use crate::models::{CancellationPolicy, Listed, Note, Price};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A held offer, valid for a short time, that [`Order::book`](super::Order::book) turns into a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreBookResult {
    /// Always true; a rejected pre-book is returned as an error
    pub status: bool,
    pub pre_book_code: String,
    /// Current total price, which may differ from the searched price
    pub price: f64,
    pub currency: Option<String>,
    pub notes: Vec<Note>,
    pub cancellation_policies: Vec<CancellationPolicy>,
}

/// A confirmed booking as returned by `BookV2` and `GetBookingInformation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_number: String,
    pub hotel_id: u64,
    pub hotel_name: Option<String>,
    pub hotel_address: Option<String>,
    pub hotel_phone: Option<String>,
    pub number_of_rooms: Option<u32>,
    pub room_type: Option<String>,
    pub room_english_type: Option<String>,
    pub meal_id: Option<u32>,
    pub meal: Option<String>,
    pub meal_label: Option<String>,
    pub english_meal: Option<String>,
    pub english_meal_label: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub prices: Vec<Price>,
    pub currency: Option<String>,
    pub booking_date: Option<NaiveDateTime>,
    pub booking_date_timezone: Option<String>,
    pub cancellation_policies: Vec<CancellationPolicy>,
    /// Last moment the booking can be cancelled for free, Central European Time
    pub earliest_non_free_cancellation_cet: Option<NaiveDateTime>,
    /// Same deadline in the hotel's local time
    pub earliest_non_free_cancellation_local: Option<NaiveDateTime>,
    pub your_ref: Option<String>,
    pub voucher: Option<String>,
    pub booked_by: Option<String>,
    pub transfer_booked: bool,
    pub payment_method: Option<String>,
    pub hotel_notes: Vec<Note>,
    pub english_hotel_notes: Vec<Note>,
    pub room_notes: Vec<Note>,
    pub english_room_notes: Vec<Note>,
    pub invoice_ref: Option<String>,
}

impl Listed for Booking {
    const LIST_KEY: &'static str = "bookings";
}

impl Booking {
    /// Number of nights booked, if both dates are known.
    pub fn nights(&self) -> Option<i64> {
        Some((self.check_out? - self.check_in?).num_days())
    }
}

/// Outcome of a cancellation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationResult {
    /// Status code reported by the service; positive on success
    pub code: i32,
    pub payment_methods: Vec<CancellationPaymentMethod>,
}

impl CancellationResult {
    pub fn is_cancelled(&self) -> bool {
        self.code > 0
    }
}

/// Fee charged for the cancellation under one payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationPaymentMethod {
    pub id: u32,
    pub name: String,
    pub fee: Option<Price>,
}
