//! XML parsers for reference-data responses.

use super::models::{Destination, Feature, HotelInfo, Language, Meal, MealLabel, Theme};
use crate::error::Result;
use crate::models::Listing;
use crate::xml::{self, optional, required, text};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlLanguagesResult {
    languages: Option<XmlLanguages>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlLanguages {
    language: Vec<XmlLanguage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlLanguage {
    #[serde(rename = "@isoCode")]
    iso_code: Option<String>,
    #[serde(rename = "@name")]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlFeaturesResult {
    features: Option<XmlFeatures>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlFeatures {
    feature: Vec<XmlNamed>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlThemesResult {
    themes: Option<XmlThemes>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlThemes {
    theme: Vec<XmlNamed>,
}

/// `<feature id=".." name=".."/>`, `<theme .../>`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlNamed {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@name")]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlMealsResult {
    meals: Option<XmlMeals>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlMeals {
    meal: Vec<XmlMeal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlMeal {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@name")]
    name: Option<String>,
    labels: Option<XmlMealLabels>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlMealLabels {
    label: Vec<XmlMealLabel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlMealLabel {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@text")]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlDestinationsResult {
    #[serde(rename = "Destinations")]
    destinations: Option<XmlDestinations>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlDestinations {
    #[serde(rename = "Destination")]
    destination: Vec<XmlDestination>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlDestination {
    destination_id: Option<String>,
    #[serde(rename = "DestinationCode")]
    code: Option<String>,
    #[serde(rename = "DestinationCode.2")]
    code2: Option<String>,
    #[serde(rename = "DestinationCode.3")]
    code3: Option<String>,
    #[serde(rename = "DestinationCode.4")]
    code4: Option<String>,
    #[serde(rename = "DestinationName")]
    name: Option<String>,
    #[serde(rename = "CountryId")]
    country_id: Option<String>,
    #[serde(rename = "CountryName")]
    country_name: Option<String>,
    #[serde(rename = "CountryCode")]
    country_code: Option<String>,
    #[serde(rename = "TimeZone")]
    time_zone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlStaticHotelsResult {
    hotels: Option<XmlStaticHotels>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlStaticHotels {
    hotel: Vec<XmlStaticHotel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlStaticHotel {
    #[serde(rename = "hotel.id")]
    id: Option<String>,
    name: Option<String>,
    destination_id: Option<String>,
    resort_id: Option<String>,
    #[serde(rename = "hotel.address")]
    address: Option<String>,
    #[serde(rename = "hotel.addr.city")]
    city: Option<String>,
    #[serde(rename = "hotel.addr.zip")]
    zip: Option<String>,
    #[serde(rename = "hotel.addr.country")]
    country: Option<String>,
    #[serde(rename = "hotel.addr.countrycode")]
    country_code: Option<String>,
    classification: Option<String>,
    headline: Option<String>,
    description: Option<String>,
    coordinates: Option<XmlCoordinates>,
    features: Option<XmlFeatures>,
    themes: Option<XmlThemes>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlCoordinates {
    latitude: Option<String>,
    longitude: Option<String>,
}

/// Parses a `GetLanguages` response.
pub fn parse_languages(xml: &str) -> Result<Listing<Language>> {
    let result: XmlLanguagesResult = xml::decode(xml, "getLanguagesResult")?;
    let items = result
        .languages
        .unwrap_or_default()
        .language
        .iter()
        .map(|l| {
            Ok(Language {
                iso_code: required("isoCode", &l.iso_code)?,
                name: text(&l.name).unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} languages", items.len());
    Ok(Listing::new(items))
}

/// Parses a `GetFeatures` response.
pub fn parse_features(xml: &str) -> Result<Listing<Feature>> {
    let result: XmlFeaturesResult = xml::decode(xml, "getFeaturesResult")?;
    let items = result
        .features
        .unwrap_or_default()
        .feature
        .iter()
        .map(|f| Ok(Feature { id: required("feature id", &f.id)?, name: text(&f.name).unwrap_or_default() }))
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} features", items.len());
    Ok(Listing::new(items))
}

/// Parses a `GetMeals` response.
pub fn parse_meals(xml: &str) -> Result<Listing<Meal>> {
    let result: XmlMealsResult = xml::decode(xml, "getMealsResult")?;
    let items = result
        .meals
        .unwrap_or_default()
        .meal
        .iter()
        .map(|m| {
            let labels = m
                .labels
                .as_ref()
                .map(|l| l.label.as_slice())
                .unwrap_or_default()
                .iter()
                .map(|l| {
                    Ok(MealLabel { id: required("label id", &l.id)?, text: text(&l.text).unwrap_or_default() })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(Meal { id: required("meal id", &m.id)?, name: text(&m.name).unwrap_or_default(), labels })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} meals", items.len());
    Ok(Listing::new(items))
}

/// Parses a `GetDestinations` response.
pub fn parse_destinations(xml: &str) -> Result<Listing<Destination>> {
    let result: XmlDestinationsResult = xml::decode(xml, "getDestinationsResult")?;
    let items = result
        .destinations
        .unwrap_or_default()
        .destination
        .iter()
        .map(|d| {
            Ok(Destination {
                id: required("destination_id", &d.destination_id)?,
                code: text(&d.code).unwrap_or_default(),
                alternative_codes: [&d.code2, &d.code3, &d.code4].into_iter().filter_map(text).collect(),
                name: text(&d.name).unwrap_or_default(),
                country_id: optional("CountryId", &d.country_id)?,
                country_name: text(&d.country_name),
                country_code: text(&d.country_code),
                time_zone: text(&d.time_zone),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} destinations", items.len());
    Ok(Listing::new(items))
}

/// Parses a `GetThemes` response.
pub fn parse_themes(xml: &str) -> Result<Listing<Theme>> {
    let result: XmlThemesResult = xml::decode(xml, "getThemesResult")?;
    let items = result
        .themes
        .unwrap_or_default()
        .theme
        .iter()
        .map(|t| Ok(Theme { id: required("theme id", &t.id)?, name: text(&t.name).unwrap_or_default() }))
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} themes", items.len());
    Ok(Listing::new(items))
}

/// Parses a `GetStaticHotelsAndRooms` response.
pub fn parse_static_hotels(xml: &str) -> Result<Listing<HotelInfo>> {
    let result: XmlStaticHotelsResult = xml::decode(xml, "getStaticHotelsAndRoomsResult")?;
    let items = result
        .hotels
        .unwrap_or_default()
        .hotel
        .iter()
        .map(parse_static_hotel)
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} static hotels", items.len());
    Ok(Listing::new(items))
}

fn parse_static_hotel(h: &XmlStaticHotel) -> Result<HotelInfo> {
    let coordinates = h.coordinates.as_ref();
    let ids = |named: &[XmlNamed], field: &str| -> Result<Vec<u32>> {
        named.iter().map(|n| required(field, &n.id)).collect()
    };

    Ok(HotelInfo {
        id: required("hotel.id", &h.id)?,
        name: text(&h.name).unwrap_or_default(),
        destination_id: optional("destination_id", &h.destination_id)?,
        resort_id: optional("resort_id", &h.resort_id)?,
        address: text(&h.address),
        city: text(&h.city),
        zip: text(&h.zip),
        country: text(&h.country),
        country_code: text(&h.country_code),
        classification: text(&h.classification),
        headline: text(&h.headline),
        description: text(&h.description),
        latitude: coordinates.map(|c| optional("latitude", &c.latitude)).transpose()?.flatten(),
        longitude: coordinates.map(|c| optional("longitude", &c.longitude)).transpose()?.flatten(),
        feature_ids: ids(h.features.as_ref().map(|f| f.feature.as_slice()).unwrap_or_default(), "feature id")?,
        theme_ids: ids(h.themes.as_ref().map(|t| t.theme.as_slice()).unwrap_or_default(), "theme id")?,
    })
}
