//! Availability search parameters.

use crate::transport::{Query, DATE_FORMAT};
use chrono::NaiveDate;

/// Parameters for [`Search::search`](super::Search::search).
///
/// The first block of fields is always sent; the rest only when set.
/// Setting `hotel_ids` switches the search from destination to hotel list,
/// in which case `destinationID` goes out empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub destination_id: u64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: u32,
    pub adults: u32,
    pub children: u32,
    /// e.g. "Hotel", "Apartment", or "Hotel,Apartment"
    pub accommodation_types: String,
    /// ISO 3166 code of the guest's market
    pub customer_country: String,
    pub language: String,
    pub currencies: String,

    pub hotel_ids: Vec<u64>,
    pub children_ages: Vec<u32>,
    pub infant: Option<u32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_star_rating: Option<u32>,
    pub max_star_rating: Option<u32>,
    pub feature_ids: Vec<u32>,
    pub meal_ids: Vec<u32>,
    pub theme_ids: Vec<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub exact_destination_match: Option<bool>,
    pub block_superdeal: Option<bool>,
    pub reference_point_latitude: Option<f64>,
    pub reference_point_longitude: Option<f64>,
    pub total_rooms_in_batch: Option<u32>,
}

impl SearchParams {
    /// One room for two adults, priced in EUR for an English-speaking GB customer.
    pub fn new(destination_id: u64, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            destination_id,
            check_in,
            check_out,
            rooms: 1,
            adults: 2,
            children: 0,
            accommodation_types: "Hotel".to_string(),
            customer_country: "GB".to_string(),
            language: "en".to_string(),
            currencies: "EUR".to_string(),
            hotel_ids: Vec::new(),
            children_ages: Vec::new(),
            infant: None,
            min_price: None,
            max_price: None,
            min_star_rating: None,
            max_star_rating: None,
            feature_ids: Vec::new(),
            meal_ids: Vec::new(),
            theme_ids: Vec::new(),
            sort_by: None,
            sort_order: None,
            exact_destination_match: None,
            block_superdeal: None,
            reference_point_latitude: None,
            reference_point_longitude: None,
            total_rooms_in_batch: None,
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
        currencies: impl Into<String>,
        customer_country: impl Into<String>,
    ) -> Self {
        self.language = language.into();
        self.currencies = currencies.into();
        self.customer_country = customer_country.into();
        self
    }

    /// Restricts the search to specific hotels.
    pub fn hotel_ids(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.hotel_ids = ids.into_iter().collect();
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn star_rating(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_star_rating = min;
        self.max_star_rating = max;
        self
    }

    pub fn sort(mut self, by: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort_by = Some(by.into());
        self.sort_order = Some(order.into());
        self
    }

    /// Sorts distances from a point, used with `sort("distance", ..)`.
    pub fn reference_point(mut self, latitude: f64, longitude: f64) -> Self {
        self.reference_point_latitude = Some(latitude);
        self.reference_point_longitude = Some(longitude);
        self
    }

    /// Length of stay in nights.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub(crate) fn write(&self, query: &mut Query) {
        let destination = if self.hotel_ids.is_empty() {
            self.destination_id.to_string()
        } else {
            String::new()
        };

        query
            .set("destinationID", destination)
            .set("checkInDate", self.check_in.format(DATE_FORMAT))
            .set("checkOutDate", self.check_out.format(DATE_FORMAT))
            .set("numberOfRooms", self.rooms)
            .set("numberOfAdults", self.adults)
            .set("numberOfChildren", self.children)
            .set("accommodationTypes", &self.accommodation_types)
            .set("CustomerCountry", &self.customer_country)
            .set("language", &self.language)
            .set("currencies", &self.currencies)
            .optional_list("hotelIDs", &self.hotel_ids)
            .optional_list("childrenAges", &self.children_ages)
            .optional("infant", self.infant)
            .optional("minPrice", self.min_price)
            .optional("maxPrice", self.max_price)
            .optional("minStarRating", self.min_star_rating)
            .optional("maxStarRating", self.max_star_rating)
            .optional_list("featureIds", &self.feature_ids)
            .optional_list("mealIds", &self.meal_ids)
            .optional_list("themeIds", &self.theme_ids)
            .optional("sortBy", self.sort_by.as_deref())
            .optional("sortOrder", self.sort_order.as_deref())
            .optional("exactDestinationMatch", self.exact_destination_match)
            .optional("blockSuperdeal", self.block_superdeal.map(u8::from))
            .optional("referencePointLatitude", self.reference_point_latitude)
            .optional("referencePointLongitude", self.reference_point_longitude)
            .optional("totalRoomsInBatch", self.total_rooms_in_batch);
    }
}
