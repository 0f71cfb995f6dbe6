//! Reference data: languages, features, meals, destinations, themes, static hotels.

mod client;
pub mod models;
mod params;
pub mod parser;

pub use client::Helper;
pub use models::{
    Destination, Feature, HotelInfo, Language, Meal, MealLabel, ReferenceSnapshot, Theme,
};
pub use params::{DestinationQuery, HotelQuery};
