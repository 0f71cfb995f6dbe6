//! XML parser for `SearchV2` responses.

use super::models::{Hotel, MealOffer, Room, RoomType, SearchResult};
use crate::error::Result;
use crate::xml::{self, convert, flag, optional, required, XmlCancellationPolicy, XmlPrice};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlSearchResult {
    hotels: Option<XmlHotels>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlHotels {
    hotel: Vec<XmlHotel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlHotel {
    #[serde(rename = "hotel.id")]
    id: Option<String>,
    destination_id: Option<String>,
    resort_id: Option<String>,
    transfer: Option<String>,
    roomtypes: Option<XmlRoomTypes>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlRoomTypes {
    roomtype: Vec<XmlRoomType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlRoomType {
    #[serde(rename = "roomtype.ID")]
    id: Option<String>,
    rooms: Option<XmlRooms>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlRooms {
    room: Vec<XmlRoom>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlRoom {
    id: Option<String>,
    beds: Option<String>,
    extrabeds: Option<String>,
    meals: Option<XmlMeals>,
    cancellation_policies: Option<XmlCancellationPolicies>,
    #[serde(rename = "isSuperDeal")]
    is_super_deal: Option<String>,
    #[serde(rename = "isBestBuy")]
    is_best_buy: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlMeals {
    meal: Vec<XmlMeal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlMeal {
    id: Option<String>,
    prices: Option<XmlPrices>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlPrices {
    price: Vec<XmlPrice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlCancellationPolicies {
    cancellation_policy: Vec<XmlCancellationPolicy>,
}

/// Parses a `SearchV2` response. No `<hotels>` node means no availability.
pub fn parse_search(xml: &str) -> Result<SearchResult> {
    let result: XmlSearchResult = xml::decode(xml, "searchresult")?;
    let hotels = convert(&result.hotels.unwrap_or_default().hotel, parse_hotel)?;

    debug!("Parsed {} hotels", hotels.len());
    Ok(SearchResult::new(hotels))
}

fn parse_hotel(h: &XmlHotel) -> Result<Hotel> {
    let room_types = match &h.roomtypes {
        Some(rt) => convert(&rt.roomtype, parse_room_type)?,
        None => Vec::new(),
    };

    Ok(Hotel {
        id: required("hotel.id", &h.id)?,
        destination_id: optional("destination_id", &h.destination_id)?,
        resort_id: optional("resort_id", &h.resort_id)?,
        transfer: flag("transfer", &h.transfer)?,
        room_types,
    })
}

fn parse_room_type(rt: &XmlRoomType) -> Result<RoomType> {
    let rooms = match &rt.rooms {
        Some(r) => convert(&r.room, parse_room)?,
        None => Vec::new(),
    };

    Ok(RoomType { id: required("roomtype.ID", &rt.id)?, rooms })
}

fn parse_room(r: &XmlRoom) -> Result<Room> {
    let meals = match &r.meals {
        Some(m) => convert(&m.meal, parse_meal)?,
        None => Vec::new(),
    };
    let cancellation_policies = match &r.cancellation_policies {
        Some(p) => convert(&p.cancellation_policy, XmlCancellationPolicy::to_policy)?,
        None => Vec::new(),
    };

    Ok(Room {
        id: required("room id", &r.id)?,
        beds: optional("beds", &r.beds)?.unwrap_or(0),
        extra_beds: optional("extrabeds", &r.extrabeds)?.unwrap_or(0),
        meals,
        cancellation_policies,
        is_super_deal: flag("isSuperDeal", &r.is_super_deal)?,
        is_best_buy: flag("isBestBuy", &r.is_best_buy)?,
    })
}

fn parse_meal(m: &XmlMeal) -> Result<MealOffer> {
    let prices = match &m.prices {
        Some(p) => convert(&p.price, |p| p.to_price("price"))?,
        None => Vec::new(),
    };

    Ok(MealOffer { id: required("meal id", &m.id)?, prices })
}
