//! Reference-data records: languages, features, meals, destinations, themes, hotels.

use crate::models::{Listed, Listing};
use serde::{Deserialize, Serialize};

/// A language the service can return content in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// ISO 639-1 code (en, fr, ...)
    pub iso_code: String,
    pub name: String,
}

/// A hotel facility that can be used as a search filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: u32,
    pub name: String,
}

/// A board type (room only, breakfast, half board, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub id: u32,
    pub name: String,
    /// Market-specific labels for the same board type
    pub labels: Vec<MealLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealLabel {
    pub id: u32,
    pub text: String,
}

/// A searchable destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: u64,
    /// Primary destination code
    pub code: String,
    /// Alternative codes (`DestinationCode.2` .. `DestinationCode.4`), empty ones dropped
    pub alternative_codes: Vec<String>,
    pub name: String,
    pub country_id: Option<u32>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub time_zone: Option<String>,
}

/// A hotel theme (beach, city, golf, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: u32,
    pub name: String,
}

/// Static description of a hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelInfo {
    pub id: u64,
    pub name: String,
    pub destination_id: Option<u64>,
    pub resort_id: Option<u64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    /// Star classification as published (e.g. "4")
    pub classification: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub feature_ids: Vec<u32>,
    pub theme_ids: Vec<u32>,
}

impl Listed for Language {}

impl Listed for Feature {
    const LIST_KEY: &'static str = "features";
}

impl Listed for Meal {
    const LIST_KEY: &'static str = "meals";
}

impl Listed for Destination {
    const LIST_KEY: &'static str = "destinations";
}

impl Listed for Theme {
    const LIST_KEY: &'static str = "themes";
}

impl Listed for HotelInfo {
    const LIST_KEY: &'static str = "hotels";
}

/// Every small reference list at once, for populating search forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceSnapshot {
    pub languages: Listing<Language>,
    pub features: Listing<Feature>,
    pub meals: Listing<Meal>,
    pub themes: Listing<Theme>,
}
