//! Request parameters for pre-booking, booking, and booking lookup.

use crate::transport::{Query, DATE_FORMAT};
use chrono::NaiveDate;
use std::fmt;

/// Offer selection shared by pre-book and book requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Stay {
    pub room_id: u64,
    pub meal_id: u32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: u32,
    pub adults: u32,
    pub children: u32,
    pub infant: u32,
    pub children_ages: Vec<u32>,
    pub customer_country: String,
    pub currency: String,
    pub language: String,
}

impl Stay {
    /// One room for two adults, priced in EUR for an English-speaking GB customer.
    pub fn new(room_id: u64, meal_id: u32, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            room_id,
            meal_id,
            check_in,
            check_out,
            rooms: 1,
            adults: 2,
            children: 0,
            infant: 0,
            children_ages: Vec::new(),
            customer_country: "GB".to_string(),
            currency: "EUR".to_string(),
            language: "en".to_string(),
        }
    }

    pub fn occupancy(mut self, rooms: u32, adults: u32, children_ages: impl IntoIterator<Item = u32>) -> Self {
        self.rooms = rooms;
        self.adults = adults;
        self.children_ages = children_ages.into_iter().collect();
        self.children = self.children_ages.len() as u32;
        self
    }

    pub fn market(
        mut self,
        language: impl Into<String>,
        currency: impl Into<String>,
        customer_country: impl Into<String>,
    ) -> Self {
        self.language = language.into();
        self.currency = currency.into();
        self.customer_country = customer_country.into();
        self
    }

    fn write(&self, query: &mut Query) {
        query
            .set("currency", &self.currency)
            .set("language", &self.language)
            .set("checkInDate", self.check_in.format(DATE_FORMAT))
            .set("checkOutDate", self.check_out.format(DATE_FORMAT))
            .set("rooms", self.rooms)
            .set("roomId", self.room_id)
            .set("mealId", self.meal_id)
            .set("adults", self.adults)
            .set("children", self.children)
            .set("infant", self.infant)
            .set("customerCountry", &self.customer_country)
            .optional_list("childrenAges", &self.children_ages);
    }
}

/// Parameters for [`Order::pre_book`](super::Order::pre_book).
#[derive(Debug, Clone, PartialEq)]
pub struct PreBookParams {
    pub stay: Stay,
    /// Total price seen in the search, in `stay.currency`
    pub search_price: f64,
    pub hotel_id: Option<u64>,
    pub room_type_id: Option<u64>,
    pub block_super_deal: Option<bool>,
    pub show_price_breakdown: Option<bool>,
    pub b2c: Option<bool>,
    pub special_request: Option<String>,
    pub your_ref: Option<String>,
}

impl PreBookParams {
    pub fn new(stay: Stay, search_price: f64) -> Self {
        Self {
            stay,
            search_price,
            hotel_id: None,
            room_type_id: None,
            block_super_deal: None,
            show_price_breakdown: None,
            b2c: None,
            special_request: None,
            your_ref: None,
        }
    }

    pub fn your_ref(mut self, reference: impl Into<String>) -> Self {
        self.your_ref = Some(reference.into());
        self
    }

    pub(crate) fn write(&self, query: &mut Query) {
        self.stay.write(query);
        query
            .set("searchPrice", self.search_price)
            .optional("hotelId", self.hotel_id)
            .optional("roomtypeId", self.room_type_id)
            .optional("blockSuperDeal", self.block_super_deal.map(u8::from))
            .optional("showPriceBreakdown", self.show_price_breakdown.map(u8::from))
            .optional("B2C", self.b2c.map(u8::from))
            .optional("specialrequest", self.special_request.as_deref())
            .optional("yourRef", self.your_ref.as_deref());
    }
}

/// Card details for bookings paid by credit card.
#[derive(Clone, PartialEq, Eq)]
pub struct CreditCard {
    pub card_type: String,
    pub number: String,
    pub holder: String,
    pub cvv2: String,
    pub exp_year: u16,
    pub exp_month: u8,
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last4 = self.number.get(self.number.len().saturating_sub(4)..).unwrap_or_default();
        f.debug_struct("CreditCard")
            .field("card_type", &self.card_type)
            .field("number", &format!("****{}", last4))
            .field("holder", &self.holder)
            .field("cvv2", &"***")
            .finish_non_exhaustive()
    }
}

/// Parameters for [`Order::book`](super::Order::book).
#[derive(Debug, Clone, PartialEq)]
pub struct BookParams {
    pub stay: Stay,
    /// Code returned by the pre-book step
    pub pre_book_code: String,
    /// Agency contact address
    pub email: String,
    pub customer_email: Option<String>,
    pub payment_method_id: u32,
    pub credit_card: Option<CreditCard>,
    pub b2c: Option<bool>,
    pub special_request: Option<String>,
    pub your_ref: Option<String>,
    pub invoice_ref: Option<String>,
    pub commission_amount_in_hotel_currency: Option<f64>,
}

impl BookParams {
    /// Books the offer held by `pre_book_code`, paid by invoice (method 1).
    pub fn new(stay: Stay, pre_book_code: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            stay,
            pre_book_code: pre_book_code.into(),
            email: email.into(),
            customer_email: None,
            payment_method_id: 1,
            credit_card: None,
            b2c: None,
            special_request: None,
            your_ref: None,
            invoice_ref: None,
            commission_amount_in_hotel_currency: None,
        }
    }

    pub fn your_ref(mut self, reference: impl Into<String>) -> Self {
        self.your_ref = Some(reference.into());
        self
    }

    pub fn credit_card(mut self, payment_method_id: u32, card: CreditCard) -> Self {
        self.payment_method_id = payment_method_id;
        self.credit_card = Some(card);
        self
    }

    pub(crate) fn write(&self, query: &mut Query) {
        self.stay.write(query);
        query
            .set("preBookCode", &self.pre_book_code)
            .set("email", &self.email)
            .set("paymentMethodId", self.payment_method_id)
            .optional("customerEmail", self.customer_email.as_deref())
            .optional("b2c", self.b2c.map(u8::from))
            .optional("specialrequest", self.special_request.as_deref())
            .optional("yourRef", self.your_ref.as_deref())
            .optional("invoiceRef", self.invoice_ref.as_deref())
            .optional("commissionAmountInHotelCurrency", self.commission_amount_in_hotel_currency);

        let card = self.credit_card.as_ref();
        query
            .optional("creditCardType", card.map(|c| c.card_type.as_str()))
            .optional("creditCardNumber", card.map(|c| c.number.as_str()))
            .optional("creditCardHolder", card.map(|c| c.holder.as_str()))
            .optional("creditCardCVV2", card.map(|c| c.cvv2.as_str()))
            .optional("creditCardExpYear", card.map(|c| c.exp_year))
            .optional("creditCardExpMonth", card.map(|c| c.exp_month));
    }
}

/// Selection for [`Order::get`](super::Order::get) and [`Order::find`](super::Order::find).
///
/// Look up a single booking by id or reference, or list bookings created or
/// arriving within a date range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingQuery {
    pub language: String,
    pub booking_id: Option<String>,
    pub reference: Option<String>,
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
    pub arrival_from: Option<NaiveDate>,
    pub arrival_to: Option<NaiveDate>,
    pub show_guests: bool,
}

impl BookingQuery {
    pub fn by_id(booking_id: impl Into<String>, language: impl Into<String>) -> Self {
        Self { booking_id: Some(booking_id.into()), language: language.into(), ..Self::default() }
    }

    pub fn by_reference(reference: impl Into<String>, language: impl Into<String>) -> Self {
        Self { reference: Some(reference.into()), language: language.into(), ..Self::default() }
    }

    pub fn created_between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.created_from = Some(from);
        self.created_to = Some(to);
        self
    }

    pub fn arriving_between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.arrival_from = Some(from);
        self.arrival_to = Some(to);
        self
    }

    pub fn show_guests(mut self, show: bool) -> Self {
        self.show_guests = show;
        self
    }

    pub(crate) fn write(&self, query: &mut Query) {
        let day = |d: Option<NaiveDate>| d.map(|d| d.format(DATE_FORMAT).to_string());
        query
            .optional("bookingID", self.booking_id.as_deref())
            .optional("reference", self.reference.as_deref())
            .optional("createdDateFrom", day(self.created_from))
            .optional("createdDateTo", day(self.created_to))
            .optional("arrivalDateFrom", day(self.arrival_from))
            .optional("arrivalDateTo", day(self.arrival_to))
            .set("showGuests", u8::from(self.show_guests))
            .set("language", &self.language);
    }
}
