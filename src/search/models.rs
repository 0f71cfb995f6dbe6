//! Availability records returned by a search.

use crate::models::{CancellationPolicy, Price};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// Outcome of a search: every hotel with at least one bookable room.
///
/// Serializes as `{count, hotels}` with `count` taken from the hotel list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    hotels: Vec<Hotel>,
}

impl SearchResult {
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self { hotels }
    }

    pub fn count(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn into_hotels(self) -> Vec<Hotel> {
        self.hotels
    }

    /// Finds a hotel by id.
    pub fn hotel(&self, id: u64) -> Option<&Hotel> {
        self.hotels.iter().find(|h| h.id == id)
    }
}

impl Serialize for SearchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SearchResult", 2)?;
        state.serialize_field("count", &self.count())?;
        state.serialize_field("hotels", &self.hotels)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: u64,
    pub destination_id: Option<u64>,
    pub resort_id: Option<u64>,
    /// Whether an airport transfer can be added
    pub transfer: bool,
    pub room_types: Vec<RoomType>,
}

impl Hotel {
    /// Iterates over every room across all room types.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.room_types.iter().flat_map(|rt| rt.rooms.iter())
    }

    /// Lowest meal price in `currency` across all rooms.
    pub fn cheapest(&self, currency: &str) -> Option<f64> {
        self.rooms()
            .flat_map(|r| r.meals.iter())
            .flat_map(|m| m.prices.iter())
            .filter(|p| p.currency == currency)
            .map(|p| p.amount)
            .reduce(f64::min)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: u64,
    pub rooms: Vec<Room>,
}

/// A bookable room; `id` and a meal `id` together identify the offer to pre-book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: u64,
    pub beds: u32,
    pub extra_beds: u32,
    pub meals: Vec<MealOffer>,
    pub cancellation_policies: Vec<CancellationPolicy>,
    pub is_super_deal: bool,
    pub is_best_buy: bool,
}

/// A board option for a room, priced in each requested currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealOffer {
    pub id: u32,
    pub prices: Vec<Price>,
}
