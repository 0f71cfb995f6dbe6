//! XML parsers for pre-book, book, booking lookup, and cancellation responses.
//!
//! Each of these can fail twice: with the top-level error envelope, or with an
//! `<Error>` element inside an otherwise normal result document.

use super::models::{Booking, CancellationPaymentMethod, CancellationResult, PreBookResult};
use crate::error::{Error, Result};
use crate::models::{CancellationPolicy, Listing, Note};
use crate::xml::{
    self, check_inner, convert, date, datetime, flag, optional, required, text, XmlCancellationPolicy,
    XmlInnerError, XmlNote, XmlPrice,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlPreBookResult {
    #[serde(rename = "Notes")]
    notes: Option<XmlNotes>,
    #[serde(rename = "PreBookCode")]
    pre_book_code: Option<String>,
    #[serde(rename = "Price")]
    price: Option<XmlPrice>,
    #[serde(rename = "CancellationPolicies")]
    cancellation_policies: Option<XmlCancellationPolicies>,
    #[serde(rename = "Error")]
    error: Option<XmlInnerError>,
}

/// Note containers; the child element is named after its container.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlNotes {
    #[serde(alias = "Note", alias = "hotelNote", alias = "englishHotelNote", alias = "roomNote", alias = "englishRoomNote")]
    note: Vec<XmlNote>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlCancellationPolicies {
    #[serde(alias = "CancellationPolicy")]
    cancellationpolicy: Vec<XmlCancellationPolicy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlBookResult {
    booking: Option<XmlBooking>,
    #[serde(rename = "Error")]
    error: Option<XmlInnerError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlBookingInformationResult {
    bookings: Option<XmlBookings>,
    #[serde(rename = "Error")]
    error: Option<XmlInnerError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlBookings {
    booking: Vec<XmlBooking>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlBooking {
    bookingnumber: Option<String>,
    #[serde(rename = "hotel.id")]
    hotel_id: Option<String>,
    #[serde(rename = "hotel.name")]
    hotel_name: Option<String>,
    #[serde(rename = "hotel.address")]
    hotel_address: Option<String>,
    #[serde(rename = "hotel.phone")]
    hotel_phone: Option<String>,
    numberofrooms: Option<String>,
    #[serde(rename = "room.type")]
    room_type: Option<String>,
    #[serde(rename = "room.englishType")]
    room_english_type: Option<String>,
    #[serde(rename = "mealId")]
    meal_id: Option<String>,
    meal: Option<String>,
    #[serde(rename = "mealLabel")]
    meal_label: Option<String>,
    #[serde(rename = "englishMeal")]
    english_meal: Option<String>,
    #[serde(rename = "englishMealLabel")]
    english_meal_label: Option<String>,
    checkindate: Option<String>,
    checkoutdate: Option<String>,
    prices: Option<XmlPrices>,
    currency: Option<String>,
    bookingdate: Option<String>,
    #[serde(rename = "bookingdate.timezone")]
    bookingdate_timezone: Option<String>,
    cancellationpolicies: Option<XmlCancellationPolicies>,
    #[serde(rename = "earliestNonFreeCancellationDate.CET")]
    earliest_non_free_cancellation_cet: Option<String>,
    #[serde(rename = "earliestNonFreeCancellationDate.Local")]
    earliest_non_free_cancellation_local: Option<String>,
    yourref: Option<String>,
    voucher: Option<String>,
    #[serde(rename = "bookedBy")]
    booked_by: Option<String>,
    transferbooked: Option<String>,
    paymentmethod: Option<String>,
    #[serde(rename = "hotelNotes")]
    hotel_notes: Option<XmlNotes>,
    #[serde(rename = "englishHotelNotes")]
    english_hotel_notes: Option<XmlNotes>,
    #[serde(rename = "roomNotes")]
    room_notes: Option<XmlNotes>,
    #[serde(rename = "englishRoomNotes")]
    english_room_notes: Option<XmlNotes>,
    invoiceref: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlPrices {
    price: Vec<XmlPrice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlCancelResult {
    #[serde(rename = "Code")]
    code: Option<String>,
    #[serde(rename = "CancellationPaymentMethod")]
    payment_methods: Vec<XmlCancellationPaymentMethod>,
    #[serde(rename = "Error")]
    error: Option<XmlInnerError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlCancellationPaymentMethod {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@name")]
    name: Option<String>,
    cancellationfee: Option<XmlPrice>,
}

/// Parses a `PreBookV2` response.
pub fn parse_pre_book(xml: &str) -> Result<PreBookResult> {
    let result: XmlPreBookResult = xml::decode(xml, "preBookResult")?;
    check_inner(result.error)?;

    let price = result.price.ok_or_else(|| Error::shape("missing `Price`"))?;
    let notes = notes(&result.notes)?;
    let cancellation_policies = policies(&result.cancellation_policies)?;

    Ok(PreBookResult {
        status: true,
        pre_book_code: required("PreBookCode", &result.pre_book_code)?,
        price: required("Price", &price.amount)?,
        currency: text(&price.currency),
        notes,
        cancellation_policies,
    })
}

/// Parses a `BookV2` response.
pub fn parse_book(xml: &str) -> Result<Booking> {
    let result: XmlBookResult = xml::decode(xml, "bookResult")?;
    check_inner(result.error)?;

    let booking = result.booking.ok_or_else(|| Error::shape("missing `booking`"))?;
    parse_booking(&booking)
}

/// Parses a `GetBookingInformation` response.
pub fn parse_booking_information(xml: &str) -> Result<Listing<Booking>> {
    let result: XmlBookingInformationResult = xml::decode(xml, "getBookingInformationResult")?;
    check_inner(result.error)?;

    let bookings = convert(&result.bookings.unwrap_or_default().booking, parse_booking)?;
    debug!("Parsed {} bookings", bookings.len());
    Ok(Listing::new(bookings))
}

/// Parses a `CancelBooking` response.
pub fn parse_cancel(xml: &str) -> Result<CancellationResult> {
    let result: XmlCancelResult = xml::decode(xml, "result")?;
    check_inner(result.error)?;

    let payment_methods = convert(&result.payment_methods, |m| {
        Ok(CancellationPaymentMethod {
            id: required("CancellationPaymentMethod id", &m.id)?,
            name: text(&m.name).unwrap_or_default(),
            fee: m.cancellationfee.as_ref().map(|f| f.to_price("cancellationfee")).transpose()?,
        })
    })?;

    Ok(CancellationResult { code: required("Code", &result.code)?, payment_methods })
}

fn parse_booking(b: &XmlBooking) -> Result<Booking> {
    let prices = match &b.prices {
        Some(p) => convert(&p.price, |p| p.to_price("price"))?,
        None => Vec::new(),
    };

    Ok(Booking {
        booking_number: required("bookingnumber", &b.bookingnumber)?,
        hotel_id: required("hotel.id", &b.hotel_id)?,
        hotel_name: text(&b.hotel_name),
        hotel_address: text(&b.hotel_address),
        hotel_phone: text(&b.hotel_phone),
        number_of_rooms: optional("numberofrooms", &b.numberofrooms)?,
        room_type: text(&b.room_type),
        room_english_type: text(&b.room_english_type),
        meal_id: optional("mealId", &b.meal_id)?,
        meal: text(&b.meal),
        meal_label: text(&b.meal_label),
        english_meal: text(&b.english_meal),
        english_meal_label: text(&b.english_meal_label),
        check_in: date("checkindate", &b.checkindate)?,
        check_out: date("checkoutdate", &b.checkoutdate)?,
        prices,
        currency: text(&b.currency),
        booking_date: datetime("bookingdate", &b.bookingdate)?,
        booking_date_timezone: text(&b.bookingdate_timezone),
        cancellation_policies: policies(&b.cancellationpolicies)?,
        earliest_non_free_cancellation_cet: datetime(
            "earliestNonFreeCancellationDate.CET",
            &b.earliest_non_free_cancellation_cet,
        )?,
        earliest_non_free_cancellation_local: datetime(
            "earliestNonFreeCancellationDate.Local",
            &b.earliest_non_free_cancellation_local,
        )?,
        your_ref: text(&b.yourref),
        voucher: text(&b.voucher),
        booked_by: text(&b.booked_by),
        transfer_booked: flag("transferbooked", &b.transferbooked)?,
        payment_method: text(&b.paymentmethod),
        hotel_notes: notes(&b.hotel_notes)?,
        english_hotel_notes: notes(&b.english_hotel_notes)?,
        room_notes: notes(&b.room_notes)?,
        english_room_notes: notes(&b.english_room_notes)?,
        invoice_ref: text(&b.invoiceref),
    })
}

fn notes(container: &Option<XmlNotes>) -> Result<Vec<Note>> {
    match container {
        Some(n) => convert(&n.note, XmlNote::to_note),
        None => Ok(Vec::new()),
    }
}

fn policies(container: &Option<XmlCancellationPolicies>) -> Result<Vec<CancellationPolicy>> {
    match container {
        Some(p) => convert(&p.cancellationpolicy, XmlCancellationPolicy::to_policy),
        None => Ok(Vec::new()),
    }
}
