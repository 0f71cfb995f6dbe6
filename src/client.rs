//! Entry point bundling the three accessors over one connection.

use crate::config::Config;
use crate::error::Result;
use crate::helper::Helper;
use crate::order::Order;
use crate::search::{Search, SearchParams, SearchResult};
use crate::transport::{Connection, Credentials, HttpTransport, XmlTransport};
use std::sync::Arc;
use tracing::debug;

/// Sunhotels API client.
///
/// Cheap to clone; every clone shares the same HTTP connection pool.
///
/// ```no_run
/// # async fn run() -> sunhotels::Result<()> {
/// use sunhotels::{Client, Config};
///
/// let client = Client::new(&Config::with_credentials("API_USERNAME", "API_PASSWORD"))?;
/// let languages = client.helper().languages().await?;
/// println!("{} languages", languages.count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    helper: Helper,
    order: Order,
    search: Search,
}

impl Client {
    /// Creates a client talking HTTP to the configured base URL.
    ///
    /// Fails with [`Error::Config`](crate::Error::Config) when credentials are
    /// missing or the proxy URL is invalid.
    pub fn new(config: &Config) -> Result<Self> {
        let credentials = config.credentials()?;
        let transport = HttpTransport::new(config)?;
        debug!("Client for {} at {}", credentials.username(), transport.base_url());

        let conn = Connection::new(credentials, Arc::new(transport)).with_policy(config.empty_fields);
        Ok(Self::from_connection(conn))
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(credentials: Credentials, transport: Arc<dyn XmlTransport>) -> Self {
        Self::from_connection(Connection::new(credentials, transport))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { helper: Helper::new(conn.clone()), order: Order::new(conn.clone()), search: Search::new(conn) }
    }

    /// Reference-data lookups.
    pub fn helper(&self) -> &Helper {
        &self.helper
    }

    /// Pre-booking, booking, and cancellation.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Searches for available rooms.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResult> {
        self.search.search(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::transport::mock::MockTransport;
    use crate::transport::Endpoint;

    #[test]
    fn test_new_requires_credentials() {
        let err = Client::new(&Config::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_new_with_credentials() {
        let client = Client::new(&Config::with_credentials("API_USERNAME", "API_PASSWORD")).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("API_USERNAME"));
        assert!(!debug.contains("API_PASSWORD"));
    }

    #[tokio::test]
    async fn test_accessors_share_transport() {
        let transport = MockTransport::routed(&[
            (Endpoint::Themes, "<getThemesResult/>"),
            (Endpoint::Search, "<searchresult/>"),
        ]);
        let client = Client::from_connection(transport.connection());

        client.helper().themes().await.unwrap();
        let params = SearchParams::new(
            244,
            chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2026, 6, 8).unwrap(),
        );
        assert!(client.search(&params).await.unwrap().is_empty());

        // Unrouted endpoints get an empty body, which has no root element.
        let err = client.order().cancel("1", "en").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);

        let endpoints: Vec<_> = transport.requests().into_iter().map(|(e, _)| e).collect();
        assert_eq!(endpoints, [Endpoint::Themes, Endpoint::Search, Endpoint::Cancel]);
    }
}
