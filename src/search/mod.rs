//! Hotel availability search.

mod client;
pub mod models;
mod params;
pub mod parser;

pub use client::Search;
pub use models::{Hotel, MealOffer, Room, RoomType, SearchResult};
pub use params::SearchParams;
