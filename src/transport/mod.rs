//! Shared request plumbing: credentials, query assembly, and the transport seam.

mod endpoint;
mod http;
mod query;

pub use endpoint::Endpoint;
pub use http::{HttpTransport, DEFAULT_BASE_URL};
pub use query::{EmptyFieldPolicy, Query};

/// Query-string date format the service expects.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

use crate::error::{Result, TransportError};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Trait for fetching raw XML from the service - enables mocking for tests.
#[async_trait]
pub trait XmlTransport: Send + Sync {
    /// Issues a GET for `endpoint` with `query` and returns the response body.
    async fn get(&self, endpoint: Endpoint, query: &Query) -> Result<String, TransportError>;
}

/// Username/password pair issued by the service provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Immutable bundle every accessor holds: who we are and how we talk.
#[derive(Clone)]
pub struct Connection {
    credentials: Credentials,
    transport: Arc<dyn XmlTransport>,
    policy: EmptyFieldPolicy,
}

impl Connection {
    /// Creates a connection that omits absent optional fields.
    pub fn new(credentials: Credentials, transport: Arc<dyn XmlTransport>) -> Self {
        Self { credentials, transport, policy: EmptyFieldPolicy::default() }
    }

    /// Sets how absent optional fields are serialized.
    pub fn with_policy(mut self, policy: EmptyFieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn policy(&self) -> EmptyFieldPolicy {
        self.policy
    }

    /// Starts a fresh query for one call.
    pub(crate) fn query(&self) -> Query {
        Query::new(&self.credentials, self.policy)
    }

    /// Sends `query` to `endpoint` and returns the raw body.
    pub(crate) async fn fetch(&self, endpoint: Endpoint, query: &Query) -> Result<String> {
        debug!("{} ?{}", endpoint, query.redacted());
        let body = self.transport.get(endpoint, query).await?;
        debug!("{} returned {} bytes", endpoint, body.len());
        Ok(body)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("credentials", &self.credentials)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use mock::MockTransport;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("API_USERNAME", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("API_USERNAME"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_each_query_is_fresh() {
        let transport = MockTransport::new("");
        let conn = transport.connection();

        let mut first = conn.query();
        first.set("language", "en");
        let second = conn.query();

        assert!(!second.contains("language"));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_policy_carried_into_query() {
        let transport = MockTransport::new("");
        let conn = transport.connection().with_policy(EmptyFieldPolicy::SendEmpty);
        let mut query = conn.query();
        query.optional("infant", None::<u32>);
        assert_eq!(query.get("infant"), Some(""));
    }

    #[tokio::test]
    async fn test_fetch_records_request() {
        let transport = MockTransport::new("<ok/>");
        let conn = transport.connection();
        let mut query = conn.query();
        query.set("language", "en");

        let body = conn.fetch(Endpoint::Meals, &query).await.unwrap();
        assert_eq!(body, "<ok/>");

        let (endpoint, sent) = transport.last();
        assert_eq!(endpoint, Endpoint::Meals);
        assert_eq!(sent.get("language"), Some("en"));
    }
}
