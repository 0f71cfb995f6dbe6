//! sunhotels - Async client for the Sunhotels XML hotel-inventory API
//!
//! Wraps the NonStaticXMLAPI web service: reference data lookups,
//! availability search, and the pre-book / book / cancel flow. Every call
//! builds its own query, issues one HTTP GET, and parses the XML reply into
//! typed records or a typed [`Error`].

pub mod client;
pub mod config;
pub mod error;
pub mod helper;
pub mod models;
pub mod order;
pub mod search;
pub mod transport;
mod xml;

pub use client::Client;
pub use config::Config;
pub use error::{Error, ErrorKind, Result, TransportError};
pub use helper::{DestinationQuery, Helper, HotelQuery};
pub use models::{CancellationPolicy, Listed, Listing, Note, Price};
pub use order::{format_name, BookParams, BookingQuery, Guest, GuestKind, Order, PreBookParams, Stay};
pub use search::{Search, SearchParams, SearchResult};
pub use transport::{Credentials, EmptyFieldPolicy, Endpoint, XmlTransport};
