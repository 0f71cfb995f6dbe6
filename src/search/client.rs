//! Availability search accessor.

use super::models::SearchResult;
use super::params::SearchParams;
use super::parser;
use crate::error::Result;
use crate::transport::{Connection, Endpoint};
use tracing::info;

/// Runs availability searches.
#[derive(Debug, Clone)]
pub struct Search {
    conn: Connection,
}

impl Search {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Searches for available rooms matching `params`.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResult> {
        if params.hotel_ids.is_empty() {
            info!(
                "Searching destination {} from {} ({} nights)",
                params.destination_id,
                params.check_in,
                params.nights()
            );
        } else {
            info!("Searching {} hotels from {} ({} nights)", params.hotel_ids.len(), params.check_in, params.nights());
        }

        let mut query = self.conn.query();
        params.write(&mut query);
        let xml = self.conn.fetch(Endpoint::Search, &query).await?;
        let result = parser::parse_search(&xml)?;

        info!("Found {} hotels with availability", result.count());
        Ok(result)
    }
}
