//! Booking lifecycle accessor: pre-book, book, look up, cancel.

use super::guests::{write_slots, Guest};
use super::models::{Booking, CancellationResult, PreBookResult};
use super::params::{BookParams, BookingQuery, PreBookParams};
use super::parser;
use crate::error::{Error, Result};
use crate::models::Listing;
use crate::transport::{Connection, Endpoint};
use tracing::{info, warn};

/// Drives the booking flow.
///
/// A booking is made in two steps: [`Order::pre_book`] holds an offer and
/// returns a code, then [`Order::book`] confirms it with guest names.
#[derive(Debug, Clone)]
pub struct Order {
    conn: Connection,
}

impl Order {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Holds a room offer and returns its current price and conditions.
    pub async fn pre_book(&self, params: &PreBookParams) -> Result<PreBookResult> {
        info!(
            "Pre-booking room {} meal {} ({} - {})",
            params.stay.room_id, params.stay.meal_id, params.stay.check_in, params.stay.check_out
        );

        let mut query = self.conn.query();
        params.write(&mut query);
        let xml = self.conn.fetch(Endpoint::PreBook, &query).await?;
        let result = parser::parse_pre_book(&xml)?;

        if result.price != params.search_price {
            warn!("Price changed since search: {} -> {}", params.search_price, result.price);
        }
        Ok(result)
    }

    /// Confirms a pre-booked offer for `guests`.
    ///
    /// Fails without contacting the service if the pre-book code is empty or
    /// more than nine guests of one kind are given.
    pub async fn book(&self, params: &BookParams, guests: &[Guest]) -> Result<Booking> {
        if params.pre_book_code.trim().is_empty() {
            return Err(Error::invalid("a pre-book code is required; call pre_book first"));
        }

        let mut query = self.conn.query();
        params.write(&mut query);
        write_slots(&mut query, guests)?;

        info!("Booking room {} for {} guests", params.stay.room_id, guests.len());
        let xml = self.conn.fetch(Endpoint::Book, &query).await?;
        let booking = parser::parse_book(&xml)?;

        info!("Booked: {}", booking.booking_number);
        Ok(booking)
    }

    /// Fetches a single booking; fails if nothing matches.
    pub async fn get(&self, filter: &BookingQuery) -> Result<Booking> {
        self.find(filter)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::shape("no booking in response"))
    }

    /// Fetches every booking matching `filter`.
    pub async fn find(&self, filter: &BookingQuery) -> Result<Listing<Booking>> {
        info!("Fetching booking information");
        let mut query = self.conn.query();
        filter.write(&mut query);
        let xml = self.conn.fetch(Endpoint::BookingInformation, &query).await?;
        parser::parse_booking_information(&xml)
    }

    /// Cancels a booking.
    pub async fn cancel(&self, booking_id: &str, language: &str) -> Result<CancellationResult> {
        info!("Cancelling booking {}", booking_id);
        let mut query = self.conn.query();
        query.set("bookingID", booking_id).set("language", language);
        let xml = self.conn.fetch(Endpoint::Cancel, &query).await?;
        let result = parser::parse_cancel(&xml)?;

        if !result.is_cancelled() {
            warn!("Cancellation of {} returned code {}", booking_id, result.code);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::order::params::Stay;
    use crate::transport::mock::MockTransport;
    use chrono::NaiveDate;

    const BOOKING: &str = "<bookResult><booking>\
        <bookingnumber>3782883</bookingnumber><hotel.id>427666</hotel.id>\
        <checkindate>2024-06-01T00:00:00</checkindate><checkoutdate>2024-06-02T00:00:00</checkoutdate>\
        </booking></bookResult>";

    fn stay() -> Stay {
        Stay::new(
            176936782,
            3,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
        )
    }

    #[test]
    fn test_book_requires_pre_book_code() {
        let transport = MockTransport::new(BOOKING);
        let order = Order::new(transport.connection());

        let params = BookParams::new(stay(), "  ", "support@example.com");
        let err = tokio_test::block_on(order.book(&params, &[Guest::adult("Mehdi", "Ait Mouh")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_book_guest_overflow_sends_nothing() {
        let transport = MockTransport::new(BOOKING);
        let order = Order::new(transport.connection());

        let guests: Vec<_> = (0..10).map(|i| Guest::adult(format!("Guest{i}"), "Doe")).collect();
        let params = BookParams::new(stay(), "code", "support@example.com");
        let err = order.book(&params, &guests).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_book() {
        let transport = MockTransport::new(BOOKING);
        let order = Order::new(transport.connection());

        let params = BookParams::new(stay(), "8483484f", "support@example.com");
        let booking = order.book(&params, &[Guest::adult("Mehdi", "Aït Moûh")]).await.unwrap();
        assert_eq!(booking.booking_number, "3782883");
        assert_eq!(booking.nights(), Some(1));

        let (endpoint, query) = transport.last();
        assert_eq!(endpoint, Endpoint::Book);
        assert_eq!(query.get("adultGuest1LastName"), Some("Ait Mouh"));
        assert_eq!(query.get("childrenGuest9FirstName"), Some(""));
    }

    #[tokio::test]
    async fn test_get_returns_first_booking() {
        let transport = MockTransport::new(
            "<getBookingInformationResult><bookings>\
             <booking><bookingnumber>1</bookingnumber><hotel.id>5</hotel.id></booking>\
             <booking><bookingnumber>2</bookingnumber><hotel.id>6</hotel.id></booking>\
             </bookings></getBookingInformationResult>",
        );
        let order = Order::new(transport.connection());

        let booking = order.get(&BookingQuery::by_id("1", "en")).await.unwrap();
        assert_eq!(booking.booking_number, "1");

        let (endpoint, query) = transport.last();
        assert_eq!(endpoint, Endpoint::BookingInformation);
        assert_eq!(query.get("bookingID"), Some("1"));
    }

    #[tokio::test]
    async fn test_get_nothing_found() {
        let transport = MockTransport::new("<getBookingInformationResult><bookings/></getBookingInformationResult>");
        let order = Order::new(transport.connection());

        let err = order.get(&BookingQuery::by_reference("DERF89", "en")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[tokio::test]
    async fn test_cancel_sends_four_params() {
        let transport = MockTransport::new("<result><Code>1</Code></result>");
        let order = Order::new(transport.connection());

        let result = order.cancel("3782883", "en").await.unwrap();
        assert_eq!(result.code, 1);

        let (endpoint, query) = transport.last();
        assert_eq!(endpoint, Endpoint::Cancel);
        assert_eq!(query.keys().collect::<Vec<_>>(), ["userName", "password", "bookingID", "language"]);
    }

    #[tokio::test]
    async fn test_pre_book_protocol_error() {
        let transport = MockTransport::new(
            "<SearchResponse><ReturnStatus><Exception>Invalid roomId</Exception></ReturnStatus></SearchResponse>",
        );
        let order = Order::new(transport.connection());

        let err = order.pre_book(&PreBookParams::new(stay(), 38.0)).await.unwrap_err();
        assert!(matches!(err, Error::Protocol(m) if m == "Invalid roomId"));
    }
}
