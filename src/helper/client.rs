//! Reference-data accessor.

use super::models::{Destination, Feature, HotelInfo, Language, Meal, ReferenceSnapshot, Theme};
use super::params::{DestinationQuery, HotelQuery};
use super::parser;
use crate::error::{Error, Result};
use crate::models::Listing;
use crate::transport::{Connection, Endpoint};
use tracing::info;

/// Fetches static lookup lists used to build search and booking requests.
#[derive(Debug, Clone)]
pub struct Helper {
    conn: Connection,
}

impl Helper {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Lists the languages content can be returned in.
    pub async fn languages(&self) -> Result<Listing<Language>> {
        info!("Fetching languages");
        let query = self.conn.query();
        let xml = self.conn.fetch(Endpoint::Languages, &query).await?;
        parser::parse_languages(&xml)
    }

    /// Lists hotel features, named in `language`.
    pub async fn features(&self, language: &str) -> Result<Listing<Feature>> {
        info!("Fetching features ({})", language);
        let mut query = self.conn.query();
        query.set("language", language);
        let xml = self.conn.fetch(Endpoint::Features, &query).await?;
        parser::parse_features(&xml)
    }

    /// Lists board types, named in `language`.
    pub async fn meals(&self, language: &str) -> Result<Listing<Meal>> {
        info!("Fetching meals ({})", language);
        let mut query = self.conn.query();
        query.set("language", language);
        let xml = self.conn.fetch(Endpoint::Meals, &query).await?;
        parser::parse_meals(&xml)
    }

    /// Lists destinations matching `filter`.
    pub async fn destinations(&self, filter: &DestinationQuery) -> Result<Listing<Destination>> {
        info!("Fetching destinations ({})", filter.language);
        let mut query = self.conn.query();
        filter.write(&mut query);
        let xml = self.conn.fetch(Endpoint::Destinations, &query).await?;
        parser::parse_destinations(&xml)
    }

    /// Lists hotel themes.
    pub async fn themes(&self) -> Result<Listing<Theme>> {
        info!("Fetching themes");
        let query = self.conn.query();
        let xml = self.conn.fetch(Endpoint::Themes, &query).await?;
        parser::parse_themes(&xml)
    }

    /// Fetches static descriptions for the hotels selected by `filter`.
    pub async fn hotels(&self, filter: &HotelQuery) -> Result<Listing<HotelInfo>> {
        info!("Fetching static hotel data ({} ids)", filter.hotel_ids.len());
        let mut query = self.conn.query();
        filter.write(&mut query);
        let xml = self.conn.fetch(Endpoint::StaticHotels, &query).await?;
        parser::parse_static_hotels(&xml)
    }

    /// Fetches the static description of a single hotel.
    pub async fn hotel(&self, language: &str, hotel_id: u64) -> Result<HotelInfo> {
        let hotels = self.hotels(&HotelQuery::new(language).hotel_ids([hotel_id])).await?;
        hotels
            .into_iter()
            .find(|h| h.id == hotel_id)
            .ok_or_else(|| Error::shape(format!("hotel {} not in response", hotel_id)))
    }

    /// Fetches languages, features, meals, and themes concurrently.
    pub async fn snapshot(&self, language: &str) -> Result<ReferenceSnapshot> {
        let (languages, features, meals, themes) = tokio::try_join!(
            self.languages(),
            self.features(language),
            self.meals(language),
            self.themes()
        )?;

        Ok(ReferenceSnapshot { languages, features, meals, themes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::transport::mock::MockTransport;

    const THEMES: &str = r#"<getThemesResult><themes><theme id="1" name="Beach"/><theme id="2" name="City"/></themes></getThemesResult>"#;

    #[tokio::test]
    async fn test_languages_sends_only_credentials() {
        let transport = MockTransport::new("<getLanguagesResult><languages/></getLanguagesResult>");
        let helper = Helper::new(transport.connection());

        let langs = helper.languages().await.unwrap();
        assert_eq!(langs.count(), 0);

        let (endpoint, query) = transport.last();
        assert_eq!(endpoint, Endpoint::Languages);
        assert_eq!(query.keys().collect::<Vec<_>>(), ["userName", "password"]);
    }

    #[tokio::test]
    async fn test_features_sends_language() {
        let transport = MockTransport::new(
            r#"<getFeaturesResult><features><feature id="5" name="Spa"/></features></getFeaturesResult>"#,
        );
        let helper = Helper::new(transport.connection());

        let features = helper.features("fr").await.unwrap();
        assert_eq!(features.count(), 1);
        assert_eq!(features.items()[0].name, "Spa");

        let (endpoint, query) = transport.last();
        assert_eq!(endpoint, Endpoint::Features);
        assert_eq!(query.get("language"), Some("fr"));
    }

    #[tokio::test]
    async fn test_destinations_query() {
        let transport = MockTransport::new("<getDestinationsResult/>");
        let helper = Helper::new(transport.connection());

        let destinations =
            helper.destinations(&DestinationQuery::new("en").sort("name", "asc")).await.unwrap();
        assert!(destinations.is_empty());

        let (endpoint, query) = transport.last();
        assert_eq!(endpoint, Endpoint::Destinations);
        assert_eq!(query.get("sortBy"), Some("name"));
        assert_eq!(query.get("destinationCode"), Some(""));
    }

    #[tokio::test]
    async fn test_themes_protocol_error() {
        let transport = MockTransport::new(
            "<SearchResponse><ReturnStatus><Exception>Invalid username or password</Exception></ReturnStatus></SearchResponse>",
        );
        let helper = Helper::new(transport.connection());

        let err = helper.themes().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(err.to_string().contains("Invalid username or password"));
    }

    #[tokio::test]
    async fn test_hotel_not_found_is_shape_error() {
        let transport = MockTransport::new("<getStaticHotelsAndRoomsResult><hotels/></getStaticHotelsAndRoomsResult>");
        let helper = Helper::new(transport.connection());

        let err = helper.hotel("en", 427666).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);

        let (endpoint, query) = transport.last();
        assert_eq!(endpoint, Endpoint::StaticHotels);
        assert_eq!(query.get("hotelIDs"), Some("427666"));
    }

    #[tokio::test]
    async fn test_snapshot_issues_four_requests() {
        let transport = MockTransport::routed(&[
            (Endpoint::Languages, r#"<getLanguagesResult><languages><language isoCode="en" name="English"/></languages></getLanguagesResult>"#),
            (Endpoint::Features, "<getFeaturesResult/>"),
            (Endpoint::Meals, r#"<getMealsResult><meals><meal id="1" name="No meals"/></meals></getMealsResult>"#),
            (Endpoint::Themes, THEMES),
        ]);
        let helper = Helper::new(transport.connection());

        let snapshot = helper.snapshot("en").await.unwrap();
        assert_eq!(snapshot.languages.count(), 1);
        assert!(snapshot.features.is_empty());
        assert_eq!(snapshot.meals.count(), 1);
        assert_eq!(snapshot.themes.count(), 2);

        let mut endpoints: Vec<_> = transport.requests().into_iter().map(|(e, _)| e.path()).collect();
        endpoints.sort();
        assert_eq!(endpoints, ["GetFeatures", "GetLanguages", "GetMeals", "GetThemes"]);
    }

    #[tokio::test]
    async fn test_snapshot_rejects_mismatched_document() {
        // Themes answered for every endpoint: the languages call must not read it as an empty list.
        let transport = MockTransport::new(THEMES);
        let helper = Helper::new(transport.connection());

        let err = helper.snapshot("en").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[tokio::test]
    async fn test_snapshot_serializes_named_lists() {
        let transport = MockTransport::routed(&[
            (Endpoint::Languages, "<getLanguagesResult/>"),
            (Endpoint::Features, "<getFeaturesResult/>"),
            (Endpoint::Meals, "<getMealsResult/>"),
            (Endpoint::Themes, THEMES),
        ]);
        let helper = Helper::new(transport.connection());

        let json = serde_json::to_value(helper.snapshot("en").await.unwrap()).unwrap();
        assert_eq!(json["languages"], serde_json::json!({ "count": 0, "items": [] }));
        assert_eq!(json["features"], serde_json::json!({ "count": 0, "features": [] }));
        assert_eq!(json["meals"], serde_json::json!({ "count": 0, "meals": [] }));
        assert_eq!(json["themes"]["count"], 2);
        assert_eq!(json["themes"]["themes"][1]["name"], "City");
    }
}
